//! Construction of layered moiré superlattices.
//!
//! Every construction implements [LatticeBuilder] and shares the sublattice merge of
//! [MoireStructure]: the two sublattices of every layer are repeated by an integer supercell
//! transformation and concatenated layer by layer.

mod approximant;
mod commensurate;
mod graphene;
mod multilayer;
mod primitives;
mod structure;

pub use approximant::ApproximantLattice;
pub use commensurate::{commensurate_rotation, twist_angle, CommensurateLattice};
pub use graphene::Graphene;
pub use multilayer::{LayerKind, LayerStack};
pub use primitives::{
    bottom_lattice_vectors, hexagonal_lattice_vectors, rotate_lattice_vectors, rotation_matrix,
    PrimitiveSublattice, RotationCenter, Supercell,
};
pub use structure::MoireStructure;

use crate::error::Result;
use crate::io::imprint::print_structure_summary;

/// Produces a merged (multi)layer structure from the layer parameters.
pub trait LatticeBuilder {
    fn build(&self) -> Result<MoireStructure>;
}

/// The available lattice constructions, selected in the configuration.
#[derive(Debug, Clone, Copy)]
pub enum LatticeKind {
    Commensurate(CommensurateLattice),
    Approximant(ApproximantLattice),
    Graphene(Graphene),
}

impl LatticeBuilder for LatticeKind {
    fn build(&self) -> Result<MoireStructure> {
        let structure: MoireStructure = match self {
            LatticeKind::Commensurate(builder) => builder.build()?,
            LatticeKind::Approximant(builder) => builder.build()?,
            LatticeKind::Graphene(builder) => builder.build()?,
        };
        print_structure_summary(&structure);
        Ok(structure)
    }
}
