//! Bloch Hamiltonian and its diagonalization for a list of k-points.

mod hamiltonian;
mod kpath;
mod projection;
mod solver;

pub use hamiltonian::hamiltonian_k;
pub use kpath::{high_symmetry_path, high_symmetry_points};
pub use projection::{PlaneWaveProjector, SpectralProjector};
pub use solver::{HermitianSolver, LapackSolver};

use crate::defaults;
use crate::error::{MoireError, Result};
use crate::hopping::TightBindingModel;
use crate::utils::Timer;
use log::{debug, info};
use ndarray::prelude::*;
use ndarray_linalg::c64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What is computed besides the eigenvalues.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagonalizationOptions {
    #[serde(default = "default_eigenvectors")]
    pub eigenvectors: bool,
    #[serde(default = "default_spectral_weight")]
    pub spectral_weight: bool,
    /// electric field along the stacking axis in eV/Angstrom
    #[serde(default = "default_electric_field")]
    pub electric_field: f64,
    /// weight of every layer in the spectral projection, layers without an entry get 1
    #[serde(default)]
    pub layer_weights: Vec<f64>,
}

fn default_eigenvectors() -> bool {
    defaults::EIGENVECTORS
}
fn default_spectral_weight() -> bool {
    defaults::SPECTRAL_WEIGHT
}
fn default_electric_field() -> f64 {
    defaults::ELECTRIC_FIELD
}

impl Default for DiagonalizationOptions {
    fn default() -> Self {
        DiagonalizationOptions {
            eigenvectors: default_eigenvectors(),
            spectral_weight: default_spectral_weight(),
            electric_field: default_electric_field(),
            layer_weights: Vec::new(),
        }
    }
}

/// Result of the diagonalization, ordered like the input k-points.
#[derive(Debug, Clone)]
pub struct BandStructure {
    /// eigenvalues in ascending order, shape (n_kpoints, n_sites)
    pub energies: Array2<f64>,
    /// eigenvectors as columns, one matrix per k-point
    pub eigenvectors: Option<Vec<Array2<c64>>>,
    /// projected weight of every eigenstate, shape (n_kpoints, n_sites)
    pub spectral_weights: Option<Array2<f64>>,
}

impl BandStructure {
    pub fn n_kpoints(&self) -> usize {
        self.energies.nrows()
    }

    pub fn n_bands(&self) -> usize {
        self.energies.ncols()
    }
}

struct KPointSolution {
    energies: Array1<f64>,
    eigenvectors: Option<Array2<c64>>,
    weights: Option<Array1<f64>>,
}

/// Diagonalizes the Bloch Hamiltonian at every k-point (rows of `kpts`, 1/Angstrom) with
/// the [LapackSolver] and the [PlaneWaveProjector] for the spectral weights.
pub fn diagonalize_kpoints(
    model: &TightBindingModel,
    kpts: ArrayView2<f64>,
    options: &DiagonalizationOptions,
) -> Result<BandStructure> {
    diagonalize_kpoints_with(model, kpts, options, &PlaneWaveProjector, &LapackSolver)
}

/// Diagonalizes the Bloch Hamiltonian at every k-point in parallel. A failure of the
/// eigensolver aborts the calculation and is reported with the index of the k-point,
/// no partial result is returned.
pub fn diagonalize_kpoints_with<P: SpectralProjector, S: HermitianSolver>(
    model: &TightBindingModel,
    kpts: ArrayView2<f64>,
    options: &DiagonalizationOptions,
    projector: &P,
    solver: &S,
) -> Result<BandStructure> {
    if kpts.ncols() < 2 {
        return Err(MoireError::invalid_input(
            "k-points need at least two cartesian components",
        ));
    }
    let timer: Timer = Timer::start();
    let n_sites: usize = model.n_sites();
    let structure = model.structure();
    let species: Vec<u8> = structure.species();
    let need_vectors: bool = options.eigenvectors || options.spectral_weight;

    let solutions: Vec<KPointSolution> = kpts
        .outer_iter()
        .into_par_iter()
        .enumerate()
        .map(|(k_index, k)| -> Result<KPointSolution> {
            let h: Array2<c64> = hamiltonian_k(model, k, options.electric_field)?;
            let (energies, vectors): (Array1<f64>, Option<Array2<c64>>) = if need_vectors {
                let (e, v) = solver
                    .eigenpairs(h)
                    .map_err(|source| MoireError::NotConverged { k_index, source })?;
                (e, Some(v))
            } else {
                let e: Array1<f64> = solver
                    .eigenvalues(h)
                    .map_err(|source| MoireError::NotConverged { k_index, source })?;
                (e, None)
            };
            let weights: Option<Array1<f64>> = match (&vectors, options.spectral_weight) {
                (Some(v), true) => Some(projector.project(
                    k,
                    structure.layer_nsites_sublattice(),
                    &options.layer_weights,
                    v.view(),
                    structure.coords(),
                    &species,
                )),
                _ => None,
            };
            debug!("k-point {: >6} diagonalized", k_index);
            Ok(KPointSolution {
                energies,
                eigenvectors: if options.eigenvectors { vectors } else { None },
                weights,
            })
        })
        .collect::<Result<Vec<KPointSolution>>>()?;

    let n_k: usize = solutions.len();
    let mut energies: Array2<f64> = Array2::zeros((n_k, n_sites));
    let mut spectral_weights: Option<Array2<f64>> = if options.spectral_weight {
        Some(Array2::zeros((n_k, n_sites)))
    } else {
        None
    };
    let mut eigenvectors: Vec<Array2<c64>> = Vec::new();
    for (k_index, solution) in solutions.into_iter().enumerate() {
        energies.row_mut(k_index).assign(&solution.energies);
        if let (Some(all), Some(w)) = (spectral_weights.as_mut(), solution.weights) {
            all.row_mut(k_index).assign(&w);
        }
        if let Some(v) = solution.eigenvectors {
            eigenvectors.push(v);
        }
    }
    print_diagonalization_summary(n_k, n_sites, options, &timer);
    Ok(BandStructure {
        energies,
        eigenvectors: if options.eigenvectors { Some(eigenvectors) } else { None },
        spectral_weights,
    })
}

fn print_diagonalization_summary(n_k: usize, n_sites: usize, options: &DiagonalizationOptions, timer: &Timer) {
    info!("{:^80}", "");
    info!("{: ^80}", "Band Structure");
    info!("{:-^80}", "");
    info!("{: <25} {}", "number of k-points:", n_k);
    info!("{: <25} {}", "matrix dimension:", n_sites);
    info!("{: <25} {}", "eigenvectors:", options.eigenvectors);
    info!("{: <25} {}", "spectral weight:", options.spectral_weight);
    if options.electric_field != 0.0 {
        info!("{: <25} {:>14.8} eV/Angstrom", "electric field:", options.electric_field);
    }
    info!("{}", timer);
    info!("{:-^80}", "");
}
