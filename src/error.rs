//! Error type of the lattice construction, hopping assembly and band structure routines.

use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Common result type used throughout the crate.
pub type Result<T> = std::result::Result<T, MoireError>;

/// Errors that can occur while building a moiré structure or computing its bands.
///
/// None of them is recovered internally, they are returned to the caller together with the
/// offending integers or the index of the k-point.
#[derive(Debug, Error)]
pub enum MoireError {
    /// The supercells of the bottom and top layer of an approximant do not share a common
    /// periodicity, because `n_bottom` and `n_top` share a divisor or `n_top` is a multiple of 3.
    #[error("invalid approximant with n_bottom = {n_bottom} and n_top = {n_top}: {reason}")]
    InvalidApproximant {
        n_bottom: i64,
        n_top: i64,
        reason: &'static str,
    },

    /// The Wannier hopping model is only parametrized for bilayers.
    #[error("the Wannier hopping model requires at most two layers, but the structure has {n_layers}")]
    TooManyLayers { n_layers: usize },

    /// The Hermitian eigensolver failed for a single k-point.
    #[error("diagonalization of the Bloch Hamiltonian failed at k-point {k_index}: {source}")]
    NotConverged {
        k_index: usize,
        #[source]
        source: LinalgError,
    },

    /// Coordinate blocks of inconsistent shape were combined into one structure.
    #[error("inconsistent array shapes: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The input does not describe a valid calculation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

impl MoireError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }
}
