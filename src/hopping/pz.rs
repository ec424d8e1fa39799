use crate::constants::SQRT3;
use crate::defaults;
use crate::error::{MoireError, Result};
use crate::hopping::neighbors::{neighbor_pairs, NeighborPair};
use crate::hopping::table::{HoppingTable, HoppingTableBuilder};
use crate::lattice::MoireStructure;
use log::debug;
use ndarray_linalg::c64;
use serde::{Deserialize, Serialize};

/// Parameters of the Slater-Koster pz model with a smooth Fermi-like cutoff.
/// Energies in eV, lengths in Angstrom.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PzParameters {
    #[serde(default = "default_r_cut_intra")]
    pub r_cut_intra: f64,
    #[serde(default = "default_r_cut_inter")]
    pub r_cut_inter: f64,
    #[serde(default = "default_g0")]
    pub g0: f64,
    #[serde(default = "default_g1")]
    pub g1: f64,
    #[serde(default = "default_rc")]
    pub rc: f64,
    #[serde(default = "default_lc")]
    pub lc: f64,
    #[serde(default = "default_q_dist_scale")]
    pub q_dist_scale: f64,
}

fn default_r_cut_intra() -> f64 {
    defaults::R_CUT_INTRA
}
fn default_r_cut_inter() -> f64 {
    defaults::R_CUT_INTER
}
fn default_g0() -> f64 {
    defaults::PZ_G0
}
fn default_g1() -> f64 {
    defaults::PZ_G1
}
fn default_rc() -> f64 {
    defaults::PZ_RC
}
fn default_lc() -> f64 {
    defaults::PZ_LC
}
fn default_q_dist_scale() -> f64 {
    defaults::PZ_Q_DIST_SCALE
}

impl Default for PzParameters {
    fn default() -> Self {
        PzParameters {
            r_cut_intra: default_r_cut_intra(),
            r_cut_inter: default_r_cut_inter(),
            g0: default_g0(),
            g1: default_g1(),
            rc: default_rc(),
            lc: default_lc(),
            q_dist_scale: default_q_dist_scale(),
        }
    }
}

impl PzParameters {
    fn validate(&self) -> Result<()> {
        if self.r_cut_intra < 0.0 || self.r_cut_inter < 0.0 {
            return Err(MoireError::invalid_input("cutoff radii must not be negative"));
        }
        if self.lc <= 0.0 {
            return Err(MoireError::invalid_input("width of the cutoff must be positive"));
        }
        Ok(())
    }

    /// Hopping between two pz orbitals separated by `r` in Angstrom. `a0` is the
    /// intralayer bond length and `h0` the interlayer distance at which the hoppings
    /// equal -g0 and g1 (up to the cutoff function).
    pub fn hopping(&self, r: [f64; 3], a0: f64, h0: f64) -> f64 {
        let d: f64 = (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt();
        let cutoff: f64 = 1.0 / (1.0 + ((d - self.rc) / self.lc).exp());
        let v_pp_pi: f64 = -self.g0 * (self.q_dist_scale * (a0 - d)).exp() * cutoff;
        let v_pp_sigma: f64 = self.g1 * (self.q_dist_scale * (h0 - d)).exp() * cutoff;
        let n_sq: f64 = (r[2] / d).powi(2);
        v_pp_pi * (1.0 - n_sq) + v_pp_sigma * n_sq
    }
}

/// Hoppings of the pz model between all pairs within the intralayer cutoff (same layer)
/// or the interlayer cutoff (different layers).
pub fn calc_hopping_pz(structure: &MoireStructure, params: &PzParameters) -> Result<HoppingTable> {
    params.validate()?;
    let a0: f64 = structure.lattice_constant() / SQRT3;
    let h0: f64 = structure.interlayer_spacing();
    let layer: Vec<usize> = structure.layer_indices();
    let search_radius: f64 = params.r_cut_intra.max(params.r_cut_inter);
    let pairs: Vec<NeighborPair> = neighbor_pairs(structure, search_radius);
    debug!("{: <25} {}", "candidate pairs:", pairs.len());

    let mut builder: HoppingTableBuilder = HoppingTableBuilder::new(structure.n_sites());
    for pair in pairs.iter() {
        let cutoff: f64 = if layer[pair.i] == layer[pair.j] {
            params.r_cut_intra
        } else {
            params.r_cut_inter
        };
        if pair.distance <= cutoff {
            let t: f64 = params.hopping(pair.displacement, a0, h0);
            builder.insert(pair.i, pair.m, pair.n, pair.j, c64::new(t, 0.0));
        }
    }
    Ok(builder.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{CommensurateLattice, Graphene, LatticeBuilder, RotationCenter};

    #[test]
    fn hopping_at_the_reference_distances() {
        let params: PzParameters = PzParameters::default();
        let a0: f64 = 2.46 / SQRT3;
        let fermi = |d: f64| 1.0 / (1.0 + ((d - params.rc) / params.lc).exp());
        let t_intra: f64 = params.hopping([a0, 0.0, 0.0], a0, 3.35);
        assert!((t_intra + params.g0 * fermi(a0)).abs() < 1e-12);
        let t_inter: f64 = params.hopping([0.0, 0.0, 3.35], a0, 3.35);
        assert!((t_inter - params.g1 * fermi(3.35)).abs() < 1e-12);
    }

    #[test]
    fn graphene_hoppings_within_the_cutoff() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let params: PzParameters = PzParameters {
            r_cut_intra: 1.6,
            ..PzParameters::default()
        };
        let table: HoppingTable = calc_hopping_pz(&structure, &params).unwrap();
        // three nearest neighbors, stored once from sublattice A
        assert_eq!(table.len(), 3);
        assert_eq!(table.of_site(0).len(), 3);
        assert!(table.of_site(1).is_empty());
        for (_, hop) in table.iter() {
            assert!(hop.amplitude.re < -2.0);
            assert_eq!(hop.amplitude.im, 0.0);
        }
    }

    #[test]
    fn interlayer_cutoff_only_applies_between_layers() {
        let structure: MoireStructure = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 2, 1)
            .build()
            .unwrap();
        let params: PzParameters = PzParameters {
            r_cut_intra: 1.6,
            r_cut_inter: 0.0,
            ..PzParameters::default()
        };
        let table: HoppingTable = calc_hopping_pz(&structure, &params).unwrap();
        let layer: Vec<usize> = structure.layer_indices();
        assert_eq!(table.len(), structure.n_sites() * 3 / 2);
        assert!(table.iter().all(|(i, hop)| layer[i] == layer[hop.target]));
    }

    #[test]
    fn negative_cutoff_is_rejected() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let params: PzParameters = PzParameters {
            r_cut_inter: -1.0,
            ..PzParameters::default()
        };
        assert!(calc_hopping_pz(&structure, &params).is_err());
    }
}
