use env_logger::Env;
use log::error;
use moire_tb::defaults::{CONFIG_FILE_NAME, KPATH_POINTS};
use moire_tb::{build_model, diagonalize_kpoints, high_symmetry_path, BandStructure, Configuration, TightBindingModel};
use ndarray::prelude::*;
use std::io::Write;
use std::process;

fn run(config_path: &str) -> moire_tb::Result<()> {
    let config: Configuration = Configuration::from_file(config_path)?;
    let model: TightBindingModel = build_model(&config)?;
    let (kpts, distance): (Array2<f64>, Array1<f64>) = high_symmetry_path(model.structure(), KPATH_POINTS);
    let bands: BandStructure = diagonalize_kpoints(&model, kpts.view(), &config.bands)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (d, energies) in distance.iter().zip(bands.energies.outer_iter()) {
        write!(out, "{:>12.6}", d)?;
        for e in energies.iter() {
            write!(out, " {:>12.6}", e)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
    let config_path: String = std::env::args().nth(1).unwrap_or_else(|| String::from(CONFIG_FILE_NAME));
    if let Err(err) = run(&config_path) {
        error!("{}", err);
        process::exit(1);
    }
}
