use crate::bands::DiagonalizationOptions;
use crate::defaults::*;
use crate::error::Result;
use crate::hopping::HoppingModel;
use crate::lattice::*;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn default_lattice_type() -> LatticeType {
    LatticeType::Commensurate
}
fn default_m() -> i64 {
    COMMENSURATE_M
}
fn default_n() -> i64 {
    COMMENSURATE_N
}
fn default_n_bottom() -> i64 {
    APPROXIMANT_N_BOTTOM
}
fn default_lattice_config() -> LatticeConfig {
    LatticeConfig::default()
}
fn default_hopping_model() -> HoppingModel {
    HoppingModel::default()
}
fn default_bands_config() -> DiagonalizationOptions {
    DiagonalizationOptions::default()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LatticeType {
    Commensurate,
    Approximant,
    Graphene,
}

/// Settings of a complete calculation, read from a TOML file. Every section and every
/// key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    #[serde(default = "default_lattice_config")]
    pub lattice: LatticeConfig,
    /// additional layers, appended in the given order
    #[serde(default)]
    pub layers: Vec<LayerStack>,
    #[serde(default = "default_hopping_model")]
    pub hopping: HoppingModel,
    #[serde(default = "default_bands_config")]
    pub bands: DiagonalizationOptions,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lattice: default_lattice_config(),
            layers: Vec::new(),
            hopping: default_hopping_model(),
            bands: default_bands_config(),
        }
    }
}

impl FromStr for Configuration {
    type Err = crate::error::MoireError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Configuration {
    /// Reads the configuration file. A file that does not exist yields the default settings.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: &Path = path.as_ref();
        if !path.exists() {
            info!("{: <25} {}", "config file not found:", path.display());
            return Ok(Self::default());
        }
        let config_string: String = fs::read_to_string(path)?;
        config_string.parse()
    }

    /// Reads the configuration file from the working directory.
    pub fn new() -> Result<Self> {
        Self::from_file(CONFIG_FILE_NAME)
    }
}

/// Geometry of the structure. Lattice constant, interlayer spacing and rotation center
/// fall back to the defaults of the selected construction if they are not set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatticeConfig {
    #[serde(default = "default_lattice_type")]
    pub kind: LatticeType,
    #[serde(default)]
    pub a: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub rotation_center: Option<RotationCenter>,
    #[serde(default = "default_m")]
    pub m: i64,
    #[serde(default = "default_n")]
    pub n: i64,
    #[serde(default = "default_n_bottom")]
    pub n_bottom: i64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        LatticeConfig {
            kind: default_lattice_type(),
            a: None,
            h: None,
            rotation_center: None,
            m: default_m(),
            n: default_n(),
            n_bottom: default_n_bottom(),
        }
    }
}

impl LatticeConfig {
    pub fn builder(&self) -> LatticeKind {
        match self.kind {
            LatticeType::Commensurate => {
                let default: CommensurateLattice = CommensurateLattice::default();
                LatticeKind::Commensurate(CommensurateLattice::new(
                    self.a.unwrap_or(default.a),
                    self.h.unwrap_or(default.h),
                    self.rotation_center.unwrap_or(default.rotation_center),
                    self.m,
                    self.n,
                ))
            }
            LatticeType::Approximant => {
                let default: ApproximantLattice = ApproximantLattice::default();
                LatticeKind::Approximant(ApproximantLattice::new(
                    self.a.unwrap_or(default.a),
                    self.h.unwrap_or(default.h),
                    self.rotation_center.unwrap_or(default.rotation_center),
                    self.n_bottom,
                ))
            }
            LatticeType::Graphene => {
                let default: Graphene = Graphene::default();
                LatticeKind::Graphene(Graphene::new(
                    self.a.unwrap_or(default.a),
                    self.h.unwrap_or(default.h),
                ))
            }
        }
    }
}
