pub(crate) mod imprint;
mod settings;

pub use imprint::write_header;
pub use settings::{Configuration, LatticeConfig, LatticeType};

use crate::error::Result;
use crate::hopping::TightBindingModel;
use crate::lattice::{LatticeBuilder, MoireStructure};

/// Builds the structure, appends the requested layers and assembles the hoppings.
pub fn build_model(config: &Configuration) -> Result<TightBindingModel> {
    write_header();
    let structure: MoireStructure = config.lattice.builder().build()?;
    let structure: MoireStructure = if config.layers.is_empty() {
        structure
    } else {
        structure.append_layers(&config.layers)?
    };
    config.hopping.assemble(structure)
}
