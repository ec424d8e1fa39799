// STRUCTURE SPECIFICATION
// config file
pub const CONFIG_FILE_NAME: &str = "moire.toml";
// lattice constant of graphene in Angstrom
pub const LATTICE_CONSTANT: f64 = 2.46;
pub const GRAPHENE_LATTICE_CONSTANT: f64 = 2.456;
// interlayer distance in Angstrom
pub const INTERLAYER_SPACING: f64 = 3.35;
pub const APPROXIMANT_INTERLAYER_SPACING: f64 = 3.349;
// commensuration integers, (m, n) = (31, 30) corresponds to a twist of 1.08 degree
pub const COMMENSURATE_M: i64 = 31;
pub const COMMENSURATE_N: i64 = 30;
// size of the bottom supercell of the 30 degree approximant
pub const APPROXIMANT_N_BOTTOM: i64 = 3;

// HOPPING MODEL
// cutoff radii of the pz model in Angstrom
pub const R_CUT_INTRA: f64 = 5.0;
pub const R_CUT_INTER: f64 = 5.0;
// intralayer pp-pi hopping at the bond length in eV
pub const PZ_G0: f64 = 3.12;
// interlayer pp-sigma hopping at the interlayer distance in eV
pub const PZ_G1: f64 = 0.48;
// center and width of the smooth Fermi-like cutoff in Angstrom
pub const PZ_RC: f64 = 6.14;
pub const PZ_LC: f64 = 0.265;
// exponential decay of the hopping with distance in 1/Angstrom
pub const PZ_Q_DIST_SCALE: f64 = 2.218;
// maximal distance of the Wannier hoppings in Angstrom
pub const WANNIER_MAX_DIST: f64 = 5.0;
pub const WANNIER_PARITY: u8 = 0;
// intralayer Wannier hoppings of the first eight neighbor shells in eV
pub const WANNIER_TS: [f64; 8] = [
    -2.8922, 0.2425, -0.2656, 0.0235, 0.0524, -0.0209, -0.0148, -0.0211,
];

// BAND STRUCTURE
pub const EIGENVECTORS: bool = false;
pub const SPECTRAL_WEIGHT: bool = false;
// electric field perpendicular to the layers in eV/Angstrom
pub const ELECTRIC_FIELD: f64 = 0.0;
// number of k-points per segment of the high symmetry path
pub const KPATH_POINTS: usize = 50;
