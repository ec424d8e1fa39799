//! Export of a tight-binding model in the layout of the tipsi sampling package, which works
//! in nm and labels every orbital by (cell m, cell n, orbital layer, site).

use crate::constants::ANGSTROM_TO_NM;
use crate::hopping::{SampleHoppingKey, TightBindingModel};
use hashbrown::HashMap;
use ndarray::prelude::*;
use ndarray_linalg::c64;

#[derive(Debug, Clone)]
pub struct SampleExport {
    /// lattice vectors of the supercell as rows in nm
    pub lattice_vectors: Array2<f64>,
    /// cartesian site coordinates in nm
    pub sites: Array2<f64>,
    /// one dictionary per site, keyed by (m, n, 0, target)
    pub hoppings: Vec<HashMap<SampleHoppingKey, c64>>,
}

impl From<&TightBindingModel> for SampleExport {
    fn from(model: &TightBindingModel) -> Self {
        let structure = model.structure();
        SampleExport {
            lattice_vectors: structure.lattice_vectors().mapv(|x| x * ANGSTROM_TO_NM),
            sites: structure.coords().mapv(|x| x * ANGSTROM_TO_NM),
            hoppings: model.hoppings().hoppings_2to3(),
        }
    }
}

impl SampleExport {
    pub fn n_sites(&self) -> usize {
        self.sites.nrows()
    }

    pub fn n_hoppings(&self) -> usize {
        self.hoppings.iter().map(|site| site.len()).sum()
    }
}
