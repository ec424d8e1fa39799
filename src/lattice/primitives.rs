use crate::constants::{FRAC_TOLERANCE, SQRT3, VACUUM_HEIGHT};
use crate::error::Result;
use crate::utils::wrap_fractional;
use itertools::iproduct;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// Point of the layer around which the top layer is rotated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationCenter {
    /// The rotation axis passes through an atom of both layers.
    Atom,
    /// The rotation axis passes through the center of a hexagon.
    Hole,
}

impl RotationCenter {
    /// Fractional in-plane coordinates of the two sublattice sites of a primitive cell.
    pub fn sublattice_sites(&self) -> [[f64; 2]; 2] {
        match self {
            RotationCenter::Atom => [[0.0, 0.0], [1.0 / 3.0, 1.0 / 3.0]],
            RotationCenter::Hole => [[1.0 / 3.0, 1.0 / 3.0], [2.0 / 3.0, 2.0 / 3.0]],
        }
    }
}

/// Lattice vectors (rows) of the bottom layer, the two in-plane vectors enclose 60 degrees
/// and are symmetric around the x-axis.
pub fn bottom_lattice_vectors(a: f64) -> Array2<f64> {
    array![
        [a * SQRT3 / 2.0, -a / 2.0, 0.0],
        [a * SQRT3 / 2.0, a / 2.0, 0.0],
        [0.0, 0.0, VACUUM_HEIGHT]
    ]
}

/// Lattice vectors (rows) of a hexagonal layer with the first vector along the x-axis.
pub fn hexagonal_lattice_vectors(a: f64) -> Array2<f64> {
    array![
        [a, 0.0, 0.0],
        [a / 2.0, a * SQRT3 / 2.0, 0.0],
        [0.0, 0.0, VACUUM_HEIGHT]
    ]
}

/// Rotation around the stacking axis, given by the cosine and sine of the angle.
pub fn rotation_matrix(cos: f64, sin: f64) -> Array2<f64> {
    array![[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

/// Rotates every lattice vector (row) by the rotation matrix.
pub fn rotate_lattice_vectors(lattice: ArrayView2<f64>, rotation: ArrayView2<f64>) -> Array2<f64> {
    rotation.dot(&lattice.t()).reversed_axes()
}

/// A hexagonal lattice with a single site in the primitive cell. One layer of graphene
/// consists of two of these sublattices that share the lattice vectors.
#[derive(Debug, Clone)]
pub struct PrimitiveSublattice {
    /// lattice vectors as rows, the third one is the vacuum axis
    pub lattice: Array2<f64>,
    /// fractional in-plane coordinates of the site
    pub site: [f64; 2],
    /// cartesian coordinate along the stacking axis
    pub z: f64,
}

/// A sublattice that was repeated according to an integer supercell transformation.
#[derive(Debug, Clone)]
pub struct Supercell {
    pub lattice: Array2<f64>,
    /// cartesian coordinates of all sites, one row per site
    pub coords: Array2<f64>,
}

impl Supercell {
    pub fn n_sites(&self) -> usize {
        self.coords.nrows()
    }
}

impl PrimitiveSublattice {
    pub fn new(lattice: Array2<f64>, site: [f64; 2], z: f64) -> Self {
        PrimitiveSublattice { lattice, site, z }
    }

    /// The two sublattices of a honeycomb layer for the given rotation center.
    pub fn honeycomb(lattice: ArrayView2<f64>, center: RotationCenter, z: f64) -> [Self; 2] {
        let [site_a, site_b] = center.sublattice_sites();
        [
            Self::new(lattice.to_owned(), site_a, z),
            Self::new(lattice.to_owned(), site_b, z),
        ]
    }

    /// Repeats the sublattice in the supercell spanned by the rows of `transform` (in units of
    /// the primitive lattice vectors). The number of sites equals |det(transform)|, all of them
    /// are wrapped into the supercell. The vacuum axis is left untouched.
    pub fn make_supercell(&self, transform: [[i64; 2]; 2]) -> Result<Supercell> {
        let t: Array2<f64> = array![
            [transform[0][0] as f64, transform[0][1] as f64],
            [transform[1][0] as f64, transform[1][1] as f64]
        ];
        let det: f64 = t[[0, 0]] * t[[1, 1]] - t[[0, 1]] * t[[1, 0]];
        let t_inv: Array2<f64> = array![[t[[1, 1]], -t[[0, 1]]], [-t[[1, 0]], t[[0, 0]]]] / det;

        // new lattice vectors L' = S L for the in-plane part
        let in_plane: ArrayView2<f64> = self.lattice.slice(s![0..2, 0..2]);
        let mut lattice: Array2<f64> = self.lattice.clone();
        lattice.slice_mut(s![0..2, 0..2]).assign(&t.dot(&in_plane));

        // bounding box of the supercell in units of the primitive vectors
        let corners: [[i64; 2]; 4] = [
            [0, 0],
            transform[0],
            transform[1],
            [
                transform[0][0] + transform[1][0],
                transform[0][1] + transform[1][1],
            ],
        ];
        let i_min: i64 = corners.iter().map(|c| c[0]).min().unwrap_or(0) - 1;
        let i_max: i64 = corners.iter().map(|c| c[0]).max().unwrap_or(0) + 1;
        let j_min: i64 = corners.iter().map(|c| c[1]).min().unwrap_or(0) - 1;
        let j_max: i64 = corners.iter().map(|c| c[1]).max().unwrap_or(0) + 1;

        let supercell_in_plane: ArrayView2<f64> = lattice.slice(s![0..2, 0..2]);
        let mut positions: Vec<f64> = Vec::new();
        for (i, j) in iproduct!(i_min..=i_max, j_min..=j_max) {
            let p: Array1<f64> = array![i as f64 + self.site[0], j as f64 + self.site[1]];
            let frac: Array1<f64> = p.dot(&t_inv);
            let inside: bool = frac
                .iter()
                .all(|&f| f >= -FRAC_TOLERANCE && f < 1.0 - FRAC_TOLERANCE);
            if inside {
                let frac: Array1<f64> = frac.mapv(wrap_fractional);
                let xy: Array1<f64> = frac.dot(&supercell_in_plane);
                positions.extend_from_slice(&[xy[0], xy[1], self.z]);
            }
        }
        let n_sites: usize = positions.len() / 3;
        let coords: Array2<f64> = Array2::from_shape_vec((n_sites, 3), positions)?;
        Ok(Supercell { lattice, coords })
    }
}
