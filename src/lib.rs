//! Atomistic models of twisted bilayer (and multilayer) graphene moiré superlattices together
//! with their tight-binding band structure.
//!
//! The calculation is a three stage pipeline:
//! 1. a lattice builder ([CommensurateLattice], [ApproximantLattice] or [Graphene]) creates
//!    a [MoireStructure], optionally extended by [MoireStructure::append_layers],
//! 2. a [HoppingModel] turns the structure into an immutable [TightBindingModel],
//! 3. [diagonalize_kpoints] builds and diagonalizes the Bloch Hamiltonian for a list of k-points.

pub mod bands;
pub mod constants;
pub mod defaults;
pub mod error;
pub mod hopping;
pub mod io;
pub mod lattice;
pub mod sample;
mod utils;

pub use bands::*;
pub use error::{MoireError, Result};
pub use hopping::*;
pub use io::{build_model, Configuration};
pub use lattice::*;
pub use sample::SampleExport;
