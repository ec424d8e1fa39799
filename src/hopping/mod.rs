//! Real-space hoppings between the pz orbitals of a [MoireStructure].

mod neighbors;
mod pz;
mod table;
mod wannier;

pub use neighbors::{image_range, is_canonical, neighbor_pairs, NeighborPair};
pub use pz::{calc_hopping_pz, PzParameters};
pub use table::{Hopping, HoppingKey, HoppingTable, HoppingTableBuilder, SampleHoppingKey};
pub use wannier::{calc_hopping_wannier, interlayer_hopping, intralayer_shell, WannierParameters};

use crate::error::{MoireError, Result};
use crate::lattice::MoireStructure;
use crate::utils::Timer;
use log::info;
use serde::{Deserialize, Serialize};

/// The available hopping parametrizations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum HoppingModel {
    Pz(PzParameters),
    Wannier(WannierParameters),
}

impl Default for HoppingModel {
    fn default() -> Self {
        HoppingModel::Pz(PzParameters::default())
    }
}

impl HoppingModel {
    pub fn name(&self) -> &'static str {
        match self {
            HoppingModel::Pz(_) => "pz",
            HoppingModel::Wannier(_) => "wannier",
        }
    }

    /// Computes the hoppings of the structure and freezes both into a [TightBindingModel].
    pub fn assemble(&self, structure: MoireStructure) -> Result<TightBindingModel> {
        let timer: Timer = Timer::start();
        let hoppings: HoppingTable = match self {
            HoppingModel::Pz(params) => calc_hopping_pz(&structure, params)?,
            HoppingModel::Wannier(params) => calc_hopping_wannier(&structure, params)?,
        };
        info!("{:^80}", "");
        info!("{: ^80}", "Hopping Assembly");
        info!("{:-^80}", "");
        info!("{: <25} {}", "hopping model:", self.name());
        info!("{: <25} {}", "number of hoppings:", hoppings.len());
        info!("{}", timer);
        info!("{:-^80}", "");
        TightBindingModel::new(structure, hoppings)
    }
}

/// A structure together with its hoppings. Neither of them changes after the model was
/// assembled; new hoppings require a new model.
#[derive(Debug, Clone)]
pub struct TightBindingModel {
    structure: MoireStructure,
    hoppings: HoppingTable,
}

impl TightBindingModel {
    /// Pairs a structure with an externally computed hopping table. The table has to contain
    /// one entry per site of the structure.
    pub fn new(structure: MoireStructure, hoppings: HoppingTable) -> Result<Self> {
        if hoppings.n_sites() != structure.n_sites() {
            return Err(MoireError::invalid_input(format!(
                "hopping table has {} sites, but the structure has {}",
                hoppings.n_sites(),
                structure.n_sites()
            )));
        }
        if let Some((i, hop)) = hoppings.iter().find(|(_, hop)| hop.target >= structure.n_sites()) {
            return Err(MoireError::invalid_input(format!(
                "hopping from site {} points to the unknown site {}",
                i, hop.target
            )));
        }
        Ok(TightBindingModel { structure, hoppings })
    }

    pub fn structure(&self) -> &MoireStructure {
        &self.structure
    }

    pub fn hoppings(&self) -> &HoppingTable {
        &self.hoppings
    }

    pub fn n_sites(&self) -> usize {
        self.structure.n_sites()
    }

    /// Releases the structure, e.g. to assemble it with another hopping model.
    pub fn into_structure(self) -> MoireStructure {
        self.structure
    }
}
