use crate::lattice::MoireStructure;
use itertools::iproduct;
use ndarray::prelude::*;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Site `j` in the cell (m, n) as seen from site `i` in the home cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborPair {
    pub i: usize,
    pub j: usize,
    pub m: i32,
    pub n: i32,
    /// r_j + m a1 + n a2 - r_i in Angstrom
    pub displacement: [f64; 3],
    pub distance: f64,
}

/// Every pair (i, j, m, n) is stored once: i < j for any cell, and i == j only in the
/// cells with m > 0, or m == 0 and n > 0. The on-site term (i == j, m == n == 0) is skipped.
pub fn is_canonical(i: usize, j: usize, m: i32, n: i32) -> bool {
    if i < j {
        true
    } else if i == j {
        m > 0 || (m == 0 && n > 0)
    } else {
        false
    }
}

/// Number of periodic images that have to be searched along both lattice vectors so that
/// no pair within `cutoff` is missed.
pub fn image_range(structure: &MoireStructure, cutoff: f64) -> [i32; 2] {
    let b: Array2<f64> = structure.reciprocal_vectors();
    let frac: Array2<f64> = structure.fractional_coords();
    let mut range: [i32; 2] = [0, 0];
    for k in 0..2 {
        let b_norm: f64 = b.row(k).dot(&b.row(k)).sqrt();
        let column: ArrayView1<f64> = frac.column(k);
        let spread: f64 = if column.is_empty() {
            0.0
        } else {
            column.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x))
                - column.fold(f64::INFINITY, |acc, &x| acc.min(x))
        };
        range[k] = (cutoff * b_norm / (2.0 * PI) + spread).ceil() as i32 + 1;
    }
    range
}

/// All canonical pairs of sites that are at most `cutoff` apart, including pairs between
/// periodic images. The pairs of every home site are searched in parallel, the result is
/// ordered by the home site.
pub fn neighbor_pairs(structure: &MoireStructure, cutoff: f64) -> Vec<NeighborPair> {
    let coords: ArrayView2<f64> = structure.coords();
    let latt: ArrayView2<f64> = structure.in_plane_lattice_vectors();
    let [m_max, n_max] = image_range(structure, cutoff);
    let images: Vec<(i32, i32, [f64; 2])> = iproduct!(-m_max..=m_max, -n_max..=n_max)
        .map(|(m, n)| {
            let shift: Array1<f64> = &latt.row(0) * m as f64 + &latt.row(1) * n as f64;
            (m, n, [shift[0], shift[1]])
        })
        .collect();
    let n_sites: usize = structure.n_sites();
    let cutoff_sq: f64 = cutoff * cutoff;

    (0..n_sites)
        .into_par_iter()
        .map(|i| {
            let mut pairs: Vec<NeighborPair> = Vec::new();
            let r_i: ArrayView1<f64> = coords.row(i);
            for j in i..n_sites {
                let r_j: ArrayView1<f64> = coords.row(j);
                let dz: f64 = r_j[2] - r_i[2];
                if dz * dz > cutoff_sq {
                    continue;
                }
                for (m, n, shift) in images.iter() {
                    if !is_canonical(i, j, *m, *n) {
                        continue;
                    }
                    let dx: f64 = r_j[0] + shift[0] - r_i[0];
                    let dy: f64 = r_j[1] + shift[1] - r_i[1];
                    let dist_sq: f64 = dx * dx + dy * dy + dz * dz;
                    if dist_sq <= cutoff_sq {
                        pairs.push(NeighborPair {
                            i,
                            j,
                            m: *m,
                            n: *n,
                            displacement: [dx, dy, dz],
                            distance: dist_sq.sqrt(),
                        });
                    }
                }
            }
            pairs
        })
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{CommensurateLattice, Graphene, LatticeBuilder, RotationCenter};

    #[test]
    fn canonical_direction() {
        assert!(is_canonical(0, 1, -3, 2));
        assert!(!is_canonical(1, 0, 0, 0));
        assert!(!is_canonical(2, 2, 0, 0));
        assert!(is_canonical(2, 2, 1, -1));
        assert!(is_canonical(2, 2, 0, 1));
        assert!(!is_canonical(2, 2, 0, -1));
        assert!(!is_canonical(2, 2, -1, 5));
    }

    #[test]
    fn graphene_has_three_nearest_neighbors_per_site() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let bond: f64 = 2.456 / 3.0_f64.sqrt();
        let pairs: Vec<NeighborPair> = neighbor_pairs(&structure, bond + 0.1);
        // three bonds per A site, every bond is stored once
        assert_eq!(pairs.len(), 3);
        for pair in pairs.iter() {
            assert!((pair.distance - bond).abs() < 1e-10);
            assert!(is_canonical(pair.i, pair.j, pair.m, pair.n));
        }
    }

    #[test]
    fn every_pair_is_found_once() {
        let structure: MoireStructure = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 2, 1)
            .build()
            .unwrap();
        let pairs: Vec<NeighborPair> = neighbor_pairs(&structure, 3.0);
        // each site has 3 + 6 + 3 neighbors within 3 Angstrom in its own layer
        assert_eq!(pairs.len(), structure.n_sites() * 12 / 2);
        let mut keys: Vec<(usize, usize, i32, i32)> =
            pairs.iter().map(|p| (p.i, p.j, p.m, p.n)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), pairs.len());
    }
}
