use crate::defaults;
use crate::error::{MoireError, Result};
use crate::lattice::primitives::*;
use crate::lattice::structure::{LayerCells, MoireStructure};
use crate::lattice::LatticeBuilder;
use ndarray::prelude::*;

/// Primitive cell of a graphene monolayer with two sites. The interlayer spacing is only
/// used if layers are appended to the monolayer.
#[derive(Debug, Clone, Copy)]
pub struct Graphene {
    pub a: f64,
    pub h: f64,
}

impl Default for Graphene {
    fn default() -> Self {
        Graphene {
            a: defaults::GRAPHENE_LATTICE_CONSTANT,
            h: defaults::APPROXIMANT_INTERLAYER_SPACING,
        }
    }
}

impl Graphene {
    pub fn new(a: f64, h: f64) -> Self {
        Graphene { a, h }
    }
}

impl LatticeBuilder for Graphene {
    fn build(&self) -> Result<MoireStructure> {
        if self.a <= 0.0 {
            return Err(MoireError::invalid_input("lattice constant must be positive"));
        }
        let latt_vec: Array2<f64> = hexagonal_lattice_vectors(self.a);
        let [sub_a, sub_b] =
            PrimitiveSublattice::honeycomb(latt_vec.view(), RotationCenter::Hole, 0.0);
        let layer: LayerCells = LayerCells::new(
            sub_a.make_supercell([[1, 0], [0, 1]])?,
            sub_b.make_supercell([[1, 0], [0, 1]])?,
            latt_vec.view(),
        );
        MoireStructure::from_layers(vec![layer], self.a, self.h, None)
    }
}
