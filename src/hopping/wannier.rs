use crate::constants::*;
use crate::defaults;
use crate::error::{MoireError, Result};
use crate::hopping::neighbors::{neighbor_pairs, NeighborPair};
use crate::hopping::table::{HoppingTable, HoppingTableBuilder};
use crate::lattice::MoireStructure;
use log::debug;
use ndarray_linalg::c64;
use serde::{Deserialize, Serialize};

/// Parameters of the Wannier hopping model of twisted bilayer graphene.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WannierParameters {
    /// maximal distance of two sites with a hopping in Angstrom
    #[serde(default = "default_max_dist")]
    pub max_dist: f64,
    /// 1 flips the sign of the 1st, 3rd, 5th and 7th intralayer shell
    #[serde(default = "default_parity")]
    pub parity: u8,
    /// intralayer hoppings of the neighbor shells in eV, ordered by distance
    #[serde(default = "default_ts")]
    pub ts: Vec<f64>,
}

fn default_max_dist() -> f64 {
    defaults::WANNIER_MAX_DIST
}
fn default_parity() -> u8 {
    defaults::WANNIER_PARITY
}
fn default_ts() -> Vec<f64> {
    defaults::WANNIER_TS.to_vec()
}

impl Default for WannierParameters {
    fn default() -> Self {
        WannierParameters {
            max_dist: default_max_dist(),
            parity: default_parity(),
            ts: default_ts(),
        }
    }
}

impl WannierParameters {
    /// Intralayer hopping of the given shell (0 for nearest neighbors).
    fn shell_hopping(&self, shell: usize) -> Option<f64> {
        let t: f64 = *self.ts.get(shell)?;
        if self.parity == 1 && shell % 2 == 0 {
            Some(-t)
        } else {
            Some(t)
        }
    }
}

/// Index of the intralayer neighbor shell at distance `d`, if there is one.
pub fn intralayer_shell(d: f64, bond_length: f64) -> Option<usize> {
    let d_sq: f64 = (d / bond_length).powi(2);
    HONEYCOMB_SHELLS_SQUARED
        .iter()
        .position(|shell| (d_sq - shell).abs() <= SHELL_TOLERANCE * shell)
}

/// cos(3 theta) for theta the angle between the two in-plane vectors.
fn cos_3theta(r: [f64; 2], nn: [f64; 2]) -> f64 {
    let norm: f64 = (r[0] * r[0] + r[1] * r[1]).sqrt() * (nn[0] * nn[0] + nn[1] * nn[1]).sqrt();
    if norm < 1.0e-10 {
        return 1.0;
    }
    let c: f64 = ((r[0] * nn[0] + r[1] * nn[1]) / norm).max(-1.0).min(1.0);
    4.0 * c.powi(3) - 3.0 * c
}

/// Interlayer hopping between pz Wannier orbitals, PRB 93, 235153 (2016).
/// `r` is the in-plane displacement from site 1 to site 2, `nn_1` and `nn_2` the vectors
/// to a nearest neighbor of both sites and `a` the lattice constant.
pub fn interlayer_hopping(r: [f64; 2], nn_1: [f64; 2], nn_2: [f64; 2], a: f64) -> f64 {
    let r_bar: f64 = (r[0] * r[0] + r[1] * r[1]).sqrt() / a;
    let v0: f64 = WANNIER_LAMBDA0 * (-WANNIER_XI0 * r_bar.powi(2)).exp() * (WANNIER_KAPPA0 * r_bar).cos();
    let v3: f64 = WANNIER_LAMBDA3 * r_bar.powi(2) * (-WANNIER_XI3 * (r_bar - WANNIER_X3).powi(2)).exp();
    let v6: f64 = WANNIER_LAMBDA6
        * (-WANNIER_XI6 * (r_bar - WANNIER_X6).powi(2)).exp()
        * (WANNIER_KAPPA6 * r_bar).sin();

    let cos3_12: f64 = cos_3theta(r, nn_1);
    let cos3_21: f64 = cos_3theta([-r[0], -r[1]], nn_2);
    // cos(6 theta) = 2 cos^2(3 theta) - 1
    let cos6_12: f64 = 2.0 * cos3_12.powi(2) - 1.0;
    let cos6_21: f64 = 2.0 * cos3_21.powi(2) - 1.0;
    v0 + v3 * (cos3_12 + cos3_21) + v6 * (cos6_12 + cos6_21)
}

/// Hoppings of the Wannier model. Intralayer pairs take the hopping of their neighbor shell,
/// interlayer pairs the angle dependent parametrization. Only mono- and bilayers are supported.
pub fn calc_hopping_wannier(structure: &MoireStructure, params: &WannierParameters) -> Result<HoppingTable> {
    if structure.n_layers() > 2 {
        return Err(MoireError::TooManyLayers {
            n_layers: structure.n_layers(),
        });
    }
    if params.ts.is_empty() {
        return Err(MoireError::invalid_input("the Wannier model needs at least one intralayer hopping"));
    }
    if params.parity > 1 {
        return Err(MoireError::invalid_input("parity of the Wannier model must be 0 or 1"));
    }
    let layer: Vec<usize> = structure.layer_indices();
    let sublattice: Vec<usize> = structure.sublattice_indices();
    let nn_vectors: Vec<[[f64; 2]; 2]> = structure.vecs_to_nearest_neighbors();
    let bond_lengths: Vec<f64> = structure
        .layer_lattice_vectors()
        .iter()
        .map(|latt| latt.row(0).dot(&latt.row(0)).sqrt() / SQRT3)
        .collect();
    let a: f64 = structure.lattice_constant();

    let pairs: Vec<NeighborPair> = neighbor_pairs(structure, params.max_dist);
    debug!("{: <25} {}", "candidate pairs:", pairs.len());

    let mut builder: HoppingTableBuilder = HoppingTableBuilder::new(structure.n_sites());
    for pair in pairs.iter() {
        let (l_i, l_j) = (layer[pair.i], layer[pair.j]);
        let t: Option<f64> = if l_i == l_j {
            intralayer_shell(pair.distance, bond_lengths[l_i]).and_then(|shell| params.shell_hopping(shell))
        } else {
            let r: [f64; 2] = [pair.displacement[0], pair.displacement[1]];
            Some(interlayer_hopping(
                r,
                nn_vectors[l_i][sublattice[pair.i]],
                nn_vectors[l_j][sublattice[pair.j]],
                a,
            ))
        };
        if let Some(t) = t {
            builder.insert(pair.i, pair.m, pair.n, pair.j, c64::new(t, 0.0));
        }
    }
    Ok(builder.finalize())
}
