use crate::constants::SQRT3;
use crate::defaults;
use crate::error::{MoireError, Result};
use crate::lattice::primitives::*;
use crate::lattice::structure::{LayerCells, MoireStructure};
use crate::lattice::LatticeBuilder;
use log::debug;
use ndarray::prelude::*;

/// Exactly commensurate twisted bilayer graphene, PRB 86, 125414 (2012).
///
/// For two non-negative integers (m, n) the top layer is rotated by the angle
/// cos(theta) = (n^2 + m^2 + 4mn) / (2(n^2 + m^2 + mn)),
/// which maps lattice points of the bottom layer onto lattice points of the top layer. The
/// supercell contains 4(m^2 + n^2 + mn) sites. If m and n are not coprime the supercell is a
/// multiple of the smallest commensurate cell.
#[derive(Debug, Clone, Copy)]
pub struct CommensurateLattice {
    pub a: f64,
    pub h: f64,
    pub rotation_center: RotationCenter,
    pub m: i64,
    pub n: i64,
}

impl Default for CommensurateLattice {
    fn default() -> Self {
        CommensurateLattice {
            a: defaults::LATTICE_CONSTANT,
            h: defaults::INTERLAYER_SPACING,
            rotation_center: RotationCenter::Atom,
            m: defaults::COMMENSURATE_M,
            n: defaults::COMMENSURATE_N,
        }
    }
}

/// cos and sin of the commensurate rotation angle for the integers (m, n)
pub fn commensurate_rotation(m: i64, n: i64) -> (f64, f64) {
    let (m, n): (f64, f64) = (m as f64, n as f64);
    let denominator: f64 = 2.0 * (n.powi(2) + m.powi(2) + m * n);
    let cos: f64 = (n.powi(2) + m.powi(2) + 4.0 * m * n) / denominator;
    let sin: f64 = SQRT3 * (m.powi(2) - n.powi(2)) / denominator;
    (cos, sin)
}

/// Twist angle in degree of the commensurate structure (m, n), it lies in [0, 60].
pub fn twist_angle(m: i64, n: i64) -> f64 {
    let (m, n): (f64, f64) = (m as f64, n as f64);
    let cos: f64 = 0.5 * (m.powi(2) + 4.0 * m * n + n.powi(2)) / (n.powi(2) + m * n + m.powi(2));
    cos.min(1.0).acos().to_degrees()
}

impl CommensurateLattice {
    pub fn new(a: f64, h: f64, rotation_center: RotationCenter, m: i64, n: i64) -> Self {
        CommensurateLattice {
            a,
            h,
            rotation_center,
            m,
            n,
        }
    }

    /// Supercell transformation of the bottom layer.
    pub fn bottom_transform(&self) -> [[i64; 2]; 2] {
        [[self.m + self.n, -self.n], [self.n, self.m]]
    }

    /// Supercell transformation of the rotated top layer.
    pub fn top_transform(&self) -> [[i64; 2]; 2] {
        [[self.m + self.n, -self.m], [self.m, self.n]]
    }
}

impl LatticeBuilder for CommensurateLattice {
    fn build(&self) -> Result<MoireStructure> {
        if self.m < 0 || self.n < 0 || (self.m == 0 && self.n == 0) {
            return Err(MoireError::invalid_input(format!(
                "commensurate structure requires non-negative (m, n) not both zero, got ({}, {})",
                self.m, self.n
            )));
        }
        if self.a <= 0.0 {
            return Err(MoireError::invalid_input("lattice constant must be positive"));
        }
        let (cos, sin): (f64, f64) = commensurate_rotation(self.m, self.n);
        let latt_vec_bott: Array2<f64> = bottom_lattice_vectors(self.a);
        let latt_vec_top: Array2<f64> =
            rotate_lattice_vectors(latt_vec_bott.view(), rotation_matrix(cos, sin).view());

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
        let angle: f64 = twist_angle(self.m, self.n);
        debug!(
            "{: <25} ({}, {}) -> {:.6} deg",
            "commensurate rotation:", self.m, self.n, angle
        );
        MoireStructure::from_layers(
            vec![bottom, top],
            self.a,
            self.h,
            Some(angle),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_orthogonal() {
        for (m, n) in [(1, 0), (2, 1), (5, 3), (31, 30)].iter() {
            let (cos, sin) = commensurate_rotation(*m, *n);
            assert!((cos.powi(2) + sin.powi(2) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn known_twist_angles() {
        assert!((twist_angle(2, 1) - 21.786789298261).abs() < 1e-9);
        assert!((twist_angle(31, 30) - 1.0845490491576).abs() < 1e-9);
        assert!(twist_angle(1, 1).abs() < 1e-12);
    }

    #[test]
    fn bottom_and_top_supercells_coincide() {
        let builder: CommensurateLattice = CommensurateLattice::new(2.46, 3.35, RotationCenter::Hole, 3, 2);
        let (cos, sin) = commensurate_rotation(3, 2);
        let bottom: Array2<f64> = bottom_lattice_vectors(2.46);
        let top: Array2<f64> = rotate_lattice_vectors(bottom.view(), rotation_matrix(cos, sin).view());
        let [a, _] = PrimitiveSublattice::honeycomb(bottom.view(), RotationCenter::Hole, 0.0);
        let [b, _] = PrimitiveSublattice::honeycomb(top.view(), RotationCenter::Hole, 3.35);
        let cell_bottom = a.make_supercell(builder.bottom_transform()).unwrap();
        let cell_top = b.make_supercell(builder.top_transform()).unwrap();
        for (x, y) in cell_bottom.lattice.iter().zip(cell_top.lattice.iter()) {
            assert!((x - y).abs() < 1e-10);
        }
    }

    #[test]
    fn zero_integers_are_rejected() {
        let builder: CommensurateLattice = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 0, 0);
        assert!(matches!(builder.build(), Err(MoireError::InvalidInput(_))));
    }
}
