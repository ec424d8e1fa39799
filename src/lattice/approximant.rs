use crate::constants::SQRT3;
use crate::defaults;
use crate::error::{MoireError, Result};
use crate::lattice::primitives::*;
use crate::lattice::structure::{LayerCells, MoireStructure};
use crate::lattice::LatticeBuilder;
use crate::utils::gcd;
use log::debug;
use ndarray::prelude::*;

/// Periodic approximant of the (incommensurate) 30 degree twisted bilayer graphene.
///
/// The bottom layer is repeated in a sqrt(3) n_bottom x sqrt(3) n_bottom supercell and the top
/// layer in a n_top x n_top supercell with n_top = round(sqrt(3) n_bottom). The mismatch of
/// the two periodicities is absorbed into a slightly strained lattice constant of the top layer.
#[derive(Debug, Clone, Copy)]
pub struct ApproximantLattice {
    pub a: f64,
    pub h: f64,
    pub rotation_center: RotationCenter,
    pub n_bottom: i64,
}

impl Default for ApproximantLattice {
    fn default() -> Self {
        ApproximantLattice {
            a: defaults::LATTICE_CONSTANT,
            h: defaults::APPROXIMANT_INTERLAYER_SPACING,
            rotation_center: RotationCenter::Hole,
            n_bottom: defaults::APPROXIMANT_N_BOTTOM,
        }
    }
}

impl ApproximantLattice {
    pub fn new(a: f64, h: f64, rotation_center: RotationCenter, n_bottom: i64) -> Self {
        ApproximantLattice {
            a,
            h,
            rotation_center,
            n_bottom,
        }
    }

    /// Best integer approximant of sqrt(3) n_bottom.
    pub fn n_top(&self) -> i64 {
        (SQRT3 * self.n_bottom as f64).round() as i64
    }

    /// Lattice constant of the top layer for which both supercells close exactly.
    pub fn top_lattice_constant(&self) -> f64 {
        let b: f64 = self.a / SQRT3;
        3.0 * b * self.n_bottom as f64 / self.n_top() as f64
    }

    /// The supercells of both layers share a common periodicity only if n_bottom and n_top
    /// are coprime and n_top is not a multiple of 3.
    pub fn validate(&self) -> Result<()> {
        let n_top: i64 = self.n_top();
        if self.n_bottom < 1 {
            return Err(MoireError::InvalidApproximant {
                n_bottom: self.n_bottom,
                n_top,
                reason: "n_bottom has to be positive",
            });
        }
        if gcd(self.n_bottom, n_top) != 1 {
            return Err(MoireError::InvalidApproximant {
                n_bottom: self.n_bottom,
                n_top,
                reason: "n_bottom and n_top share a common divisor",
            });
        }
        if n_top % 3 == 0 {
            return Err(MoireError::InvalidApproximant {
                n_bottom: self.n_bottom,
                n_top,
                reason: "n_top is a multiple of 3",
            });
        }
        Ok(())
    }

    pub fn bottom_transform(&self) -> [[i64; 2]; 2] {
        let n: i64 = self.n_bottom;
        [[n, n], [-n, 2 * n]]
    }

    pub fn top_transform(&self) -> [[i64; 2]; 2] {
        let n: i64 = self.n_top();
        [[n, 0], [0, n]]
    }
}

impl LatticeBuilder for ApproximantLattice {
    fn build(&self) -> Result<MoireStructure> {
        self.validate()?;
        let a_top: f64 = self.top_lattice_constant();
        debug!(
            "{: <25} n_bottom = {}, n_top = {}, a_top = {:.8}",
            "30 degree approximant:",
            self.n_bottom,
            self.n_top(),
            a_top
        );
        let latt_vec_bott: Array2<f64> = bottom_lattice_vectors(self.a);
        let latt_vec_top: Array2<f64> = hexagonal_lattice_vectors(a_top);

        let [bott_a, bott_b] =
            PrimitiveSublattice::honeycomb(latt_vec_bott.view(), self.rotation_center, 0.0);
        let [top_a, top_b] =
            PrimitiveSublattice::honeycomb(latt_vec_top.view(), self.rotation_center, self.h);

        let bottom: LayerCells = LayerCells::new(
            bott_a.make_supercell(self.bottom_transform())?,
            bott_b.make_supercell(self.bottom_transform())?,
            latt_vec_bott.view(),
        );
        let top: LayerCells = LayerCells::new(
            top_a.make_supercell(self.top_transform())?,
            top_b.make_supercell(self.top_transform())?,
            latt_vec_top.view(),
        );
        MoireStructure::from_layers(
            vec![bottom, top],
            self.a,
            self.h,
            None,
        )
    }
}
