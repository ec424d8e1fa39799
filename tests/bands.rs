use moire_tb::*;
use ndarray::prelude::*;
use ndarray_linalg::c64;
use rand::Rng;
use std::f64::consts::PI;

fn bilayer_model(hopping: HoppingModel) -> TightBindingModel {
    let structure: MoireStructure = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 2, 1)
        .build()
        .unwrap();
    hopping.assemble(structure).unwrap()
}

fn max_deviation(a: &Array2<c64>, b: &Array2<c64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).norm()).fold(0.0, f64::max)
}

#[test]
fn bloch_hamiltonian_is_hermitian() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = rand::thread_rng();
    for hopping in [
        HoppingModel::Pz(PzParameters::default()),
        HoppingModel::Wannier(WannierParameters::default()),
    ]
    .iter()
    {
        let model: TightBindingModel = bilayer_model(hopping.clone());
        for _ in 0..5 {
            let k: Array1<f64> = array![rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)];
            let field: f64 = rng.gen_range(-0.1..0.1);
            let h: Array2<c64> = hamiltonian_k(&model, k.view(), field).unwrap();
            let h_dagger: Array2<c64> = h.t().mapv(|x| x.conj());
            assert!(max_deviation(&h, &h_dagger) < 1e-10);
        }
    }
}

#[test]
fn hamiltonian_is_periodic_in_the_reciprocal_lattice() {
    let model: TightBindingModel = bilayer_model(HoppingModel::default());
    let b: Array2<f64> = model.structure().reciprocal_vectors();
    let k: Array1<f64> = array![0.13, -0.07];
    let g: Array1<f64> = &b.row(0) * 2.0 - &b.row(1);
    let h: Array2<c64> = hamiltonian_k(&model, k.view(), 0.0).unwrap();
    let h_shifted: Array2<c64> = hamiltonian_k(&model, (&k + &g).view(), 0.0).unwrap();
    assert!(max_deviation(&h, &h_shifted) < 1e-10);
}

#[test]
fn eigenvalues_do_not_depend_on_the_eigenvectors() {
    let model: TightBindingModel = bilayer_model(HoppingModel::default());
    let kpts: Array2<f64> = array![[0.0, 0.0], [0.2, 0.1], [-0.3, 0.25]];
    let only_values: BandStructure =
        diagonalize_kpoints(&model, kpts.view(), &DiagonalizationOptions::default()).unwrap();
    let options: DiagonalizationOptions = DiagonalizationOptions {
        eigenvectors: true,
        spectral_weight: true,
        ..DiagonalizationOptions::default()
    };
    let with_vectors: BandStructure = diagonalize_kpoints(&model, kpts.view(), &options).unwrap();
    for (e1, e2) in only_values.energies.iter().zip(with_vectors.energies.iter()) {
        assert!((e1 - e2).abs() < 1e-10);
    }
    assert!(only_values.eigenvectors.is_none());
    let vectors: Vec<Array2<c64>> = with_vectors.eigenvectors.unwrap();
    assert_eq!(vectors.len(), 3);

    // H v = e v for every band
    for (k_index, v) in vectors.iter().enumerate() {
        let h: Array2<c64> = hamiltonian_k(&model, kpts.row(k_index), 0.0).unwrap();
        let hv: Array2<c64> = h.dot(v);
        for (band, e) in with_vectors.energies.row(k_index).iter().enumerate() {
            let residual: f64 = hv
                .column(band)
                .iter()
                .zip(v.column(band).iter())
                .map(|(x, y)| (x - y * *e).norm())
                .fold(0.0, f64::max);
            assert!(residual < 1e-8);
        }
    }
    let weights: Array2<f64> = with_vectors.spectral_weights.unwrap();
    assert_eq!(weights.dim(), (3, model.n_sites()));
    assert!(weights.iter().all(|w| *w >= 0.0));
}

#[test]
fn graphene_dirac_point() {
    let structure: MoireStructure = Graphene::default().build().unwrap();
    let model: TightBindingModel = HoppingModel::default().assemble(structure).unwrap();
    let a: f64 = 2.456;
    let kpts: Array2<f64> = array![[4.0 * PI / (3.0 * a), 0.0]];
    let bands: BandStructure =
        diagonalize_kpoints(&model, kpts.view(), &DiagonalizationOptions::default()).unwrap();
    assert!((bands.energies[[0, 0]] - bands.energies[[0, 1]]).abs() < 1e-8);
}

#[test]
fn bernal_bilayer_along_the_path() {
    let structure: MoireStructure = Graphene::default()
        .build()
        .unwrap()
        .append_layers(&[LayerStack::new(LayerKind::B, vec![1])])
        .unwrap();
    let model: TightBindingModel = HoppingModel::default().assemble(structure).unwrap();
    let (kpts, distance) = high_symmetry_path(model.structure(), 5);
    let bands: BandStructure =
        diagonalize_kpoints(&model, kpts.view(), &DiagonalizationOptions::default()).unwrap();
    assert_eq!(bands.n_kpoints(), distance.len());
    assert_eq!(bands.n_bands(), 4);
    for energies in bands.energies.outer_iter() {
        assert!(energies.windows(2).into_iter().all(|w| w[0] <= w[1] + 1e-12));
    }
}

#[test]
fn wannier_model_is_limited_to_bilayers() {
    let structure: MoireStructure = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 2, 1)
        .build()
        .unwrap()
        .append_layers(&[LayerStack::new(LayerKind::A, vec![-1])])
        .unwrap();
    let result = HoppingModel::Wannier(WannierParameters::default()).assemble(structure);
    assert!(matches!(result, Err(MoireError::TooManyLayers { n_layers: 3 })));
}

#[test]
fn hoppings_are_stored_in_one_direction() {
    let model: TightBindingModel = bilayer_model(HoppingModel::default());
    let table: &HoppingTable = model.hoppings();
    assert!(!table.is_empty());
    for (i, hop) in table.iter() {
        assert!(is_canonical(i, hop.target, hop.m, hop.n));
        assert_eq!(hop.amplitude.im, 0.0);
    }
    let layer: Vec<usize> = model.structure().layer_indices();
    assert!(table.iter().any(|(i, hop)| layer[i] != layer[hop.target]));
}

#[test]
fn sample_dictionary_matches_the_table() {
    let model: TightBindingModel = bilayer_model(HoppingModel::default());
    let export: SampleExport = SampleExport::from(&model);
    assert_eq!(export.hoppings.len(), model.n_sites());
    assert_eq!(export.n_hoppings(), model.hoppings().len());
    for (i, hop) in model.hoppings().iter() {
        assert_eq!(export.hoppings[i][&(hop.m, hop.n, 0, hop.target)], hop.amplitude);
    }
    assert!((export.sites[[0, 2]] - 0.1 * model.structure().coords()[[0, 2]]).abs() < 1e-14);
}
