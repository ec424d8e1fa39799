pub const SQRT3: f64 = 1.7320508075688772;

// conversion between the Angstrom based structure and the nm based sampling package
pub const ANGSTROM_TO_NM: f64 = 0.1;

// length of the out-of-plane lattice vector in Angstrom, large enough
// that periodic images along the stacking axis never interact
pub const VACUUM_HEIGHT: f64 = 100.0;

// tolerance used to decide if a fractional coordinate lies inside a supercell
pub const FRAC_TOLERANCE: f64 = 1.0e-8;

// relative tolerance for assigning a distance to a neighbor shell
pub const SHELL_TOLERANCE: f64 = 1.0e-2;

// squared distances of the intralayer neighbor shells of a honeycomb layer
// in units of the carbon-carbon bond length a/sqrt(3)
pub const HONEYCOMB_SHELLS_SQUARED: [f64; 8] = [1.0, 3.0, 4.0, 7.0, 9.0, 12.0, 13.0, 16.0];

// Interlayer Wannier parametrization of twisted bilayer graphene
// Fang and Kaxiras, PRB 93, 235153 (2016)
pub const WANNIER_LAMBDA0: f64 = 0.3155;
pub const WANNIER_XI0: f64 = 1.7543;
pub const WANNIER_KAPPA0: f64 = 2.0010;
pub const WANNIER_LAMBDA3: f64 = -0.0688;
pub const WANNIER_XI3: f64 = 3.4692;
pub const WANNIER_X3: f64 = 0.5212;
pub const WANNIER_LAMBDA6: f64 = -0.0083;
pub const WANNIER_XI6: f64 = 2.8764;
pub const WANNIER_X6: f64 = 1.5206;
pub const WANNIER_KAPPA6: f64 = 1.5731;
