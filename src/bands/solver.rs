use ndarray::prelude::*;
use ndarray_linalg::error::LinalgError;
use ndarray_linalg::{c64, EigValshInto, EighInto, UPLO};

/// Eigensolver for the dense Hermitian Bloch Hamiltonian of a single k-point.
///
/// The matrix is passed by value and only its lower triangle is referenced, so an
/// implementation may overwrite it in place.
pub trait HermitianSolver: Sync {
    /// Eigenvalues in ascending order.
    fn eigenvalues(&self, h: Array2<c64>) -> Result<Array1<f64>, LinalgError>;

    /// Eigenvalues in ascending order together with the eigenvectors as columns.
    fn eigenpairs(&self, h: Array2<c64>) -> Result<(Array1<f64>, Array2<c64>), LinalgError>;
}

/// Hermitian eigensolver (zheev) of the selected LAPACK backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackSolver;

impl HermitianSolver for LapackSolver {
    fn eigenvalues(&self, h: Array2<c64>) -> Result<Array1<f64>, LinalgError> {
        h.eigvalsh_into(UPLO::Lower)
    }

    fn eigenpairs(&self, h: Array2<c64>) -> Result<(Array1<f64>, Array2<c64>), LinalgError> {
        h.eigh_into(UPLO::Lower)
    }
}
