use crate::lattice::MoireStructure;
use log::info;

pub fn write_header() {
    info!("{: ^80}", "-----------------");
    info!("{: ^80}", "MOIRE-TB");
    info!("{: ^80}", "-----------------");
    let mut version_string: String = "version: ".to_owned();
    version_string.push_str(env!("CARGO_PKG_VERSION"));
    info!("{: ^80}", version_string);
    info!("{: ^80}", "");
    info!("{: ^80}", ":::::::::::::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "::  tight-binding bands of moire superlattices ::");
    info!("{: ^80}", ":::::::::::::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "");
}

pub fn print_structure_summary(structure: &MoireStructure) {
    info!("{:^80}", "");
    info!("{: ^80}", "Moire Structure");
    info!("{:-^80}", "");
    info!("{: <25} {}", "number of sites:", structure.n_sites());
    info!("{: <25} {}", "number of layers:", structure.n_layers());
    info!("{: <25} {:?}", "sites per layer:", structure.layer_nsites());
    match structure.twist_angle() {
        Some(angle) => info!("{: <25} {:>14.8} deg", "twist angle:", angle),
        None => info!("{: <25} {:>14}", "twist angle:", "-"),
    }
    for (i, vector) in structure.in_plane_lattice_vectors().outer_iter().enumerate() {
        info!(
            "{: <25} {:>14.8} {:>14.8} Angstrom",
            format!("lattice vector a{}:", i + 1),
            vector[0],
            vector[1]
        );
    }
    info!("{:-^80}", "");
}
