use crate::lattice::MoireStructure;
use ndarray::prelude::*;

/// High symmetry points of the hexagonal Brillouin zone of the supercell, in 1/Angstrom.
pub fn high_symmetry_points(structure: &MoireStructure) -> [(&'static str, Array1<f64>); 3] {
    let b: Array2<f64> = structure.reciprocal_vectors();
    let gamma: Array1<f64> = Array1::zeros(2);
    let k: Array1<f64> = (&b.row(0) * 2.0 + &b.row(1)) / 3.0;
    let m: Array1<f64> = &b.row(0) / 2.0;
    [("G", gamma), ("K", k), ("M", m)]
}

/// k-points along G-K-M-G with `n_segment` points per segment and the accumulated length
/// of the path at every point.
pub fn high_symmetry_path(structure: &MoireStructure, n_segment: usize) -> (Array2<f64>, Array1<f64>) {
    let [(_, gamma), (_, k), (_, m)] = high_symmetry_points(structure);
    let corners: [ArrayView1<f64>; 4] = [gamma.view(), k.view(), m.view(), gamma.view()];
    let n_segment: usize = n_segment.max(1);
    let n_k: usize = 3 * n_segment + 1;
    let mut kpts: Array2<f64> = Array2::zeros((n_k, 2));
    for (segment, pair) in corners.windows(2).enumerate() {
        for step in 0..n_segment {
            let x: f64 = step as f64 / n_segment as f64;
            let point: Array1<f64> = &pair[0] * (1.0 - x) + &pair[1] * x;
            kpts.row_mut(segment * n_segment + step).assign(&point);
        }
    }
    kpts.row_mut(n_k - 1).assign(&gamma);

    let mut distance: Array1<f64> = Array1::zeros(n_k);
    for i in 1..n_k {
        let dk: Array1<f64> = &kpts.row(i) - &kpts.row(i - 1);
        distance[i] = distance[i - 1] + dk.dot(&dk).sqrt();
    }
    (kpts, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Graphene, LatticeBuilder};
    use std::f64::consts::PI;

    #[test]
    fn graphene_k_point() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let [_, (label, k), _] = high_symmetry_points(&structure);
        assert_eq!(label, "K");
        assert!((k[0] - 4.0 * PI / (3.0 * 2.456)).abs() < 1e-12);
        assert!(k[1].abs() < 1e-12);
    }

    #[test]
    fn path_is_closed() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let (kpts, distance) = high_symmetry_path(&structure, 10);
        assert_eq!(kpts.nrows(), 31);
        assert!(kpts.row(0).iter().chain(kpts.row(30).iter()).all(|x| x.abs() < 1e-14));
        assert!(distance.windows(2).into_iter().all(|w| w[1] > w[0]));
    }
}
