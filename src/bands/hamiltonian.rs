use crate::error::{MoireError, Result};
use crate::hopping::TightBindingModel;
use ndarray::prelude::*;
use ndarray_linalg::c64;

/// Dense Bloch Hamiltonian H(k) of the model.
///
/// Every stored hopping t from site i to site j in the cell R = m a1 + n a2 contributes
/// t exp(i k.R) to H[i, j] and the complex conjugate to H[j, i]. A finite `electric_field`
/// (in eV/Angstrom) adds the linear potential field * z to the diagonal. Only the in-plane
/// components of `k` enter, a k-point with fewer than two components is rejected.
pub fn hamiltonian_k(model: &TightBindingModel, k: ArrayView1<f64>, electric_field: f64) -> Result<Array2<c64>> {
    if k.len() < 2 {
        return Err(MoireError::invalid_input(
            "k-points need at least two cartesian components",
        ));
    }
    let n_sites: usize = model.n_sites();
    let mut h: Array2<c64> = Array2::zeros((n_sites, n_sites));
    let structure = model.structure();

    if electric_field != 0.0 {
        let coords: ArrayView2<f64> = structure.coords();
        let z: ArrayView1<f64> = coords.column(2);
        h.diag_mut()
            .iter_mut()
            .zip(z.iter())
            .for_each(|(h_ii, z_i)| *h_ii = c64::new(electric_field * z_i, 0.0));
    }

    let latt: ArrayView2<f64> = structure.in_plane_lattice_vectors();
    // k.a1 and k.a2, the phase of the cell (m, n) is m k.a1 + n k.a2
    let k_a: Array1<f64> = latt.dot(&k.slice(s![0..2]));
    for (i, hop) in model.hoppings().iter() {
        let phase: f64 = hop.m as f64 * k_a[0] + hop.n as f64 * k_a[1];
        let value: c64 = hop.amplitude * c64::new(phase.cos(), phase.sin());
        h[[i, hop.target]] += value;
        h[[hop.target, i]] += value.conj();
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hopping::{HoppingModel, PzParameters};
    use crate::lattice::{Graphene, LatticeBuilder};

    fn graphene_nn() -> TightBindingModel {
        let model: HoppingModel = HoppingModel::Pz(PzParameters {
            r_cut_intra: 1.6,
            ..PzParameters::default()
        });
        model.assemble(Graphene::default().build().unwrap()).unwrap()
    }

    #[test]
    fn gamma_point_sums_the_hoppings() {
        let model: TightBindingModel = graphene_nn();
        let h: Array2<c64> = hamiltonian_k(&model, array![0.0, 0.0].view(), 0.0).unwrap();
        let t: c64 = model.hoppings().of_site(0)[0].amplitude;
        assert!((h[[0, 1]] - t * 3.0).norm() < 1e-12);
        assert!((h[[1, 0]] - t * 3.0).norm() < 1e-12);
        assert!(h[[0, 0]].norm() < 1e-12);
    }

    #[test]
    fn electric_field_enters_the_diagonal() {
        let model: TightBindingModel = graphene_nn();
        let field: f64 = 0.1;
        let h: Array2<c64> = hamiltonian_k(&model, array![0.3, -0.2].view(), field).unwrap();
        for (i, z) in model.structure().coords().column(2).iter().enumerate() {
            assert!((h[[i, i]].re - field * z).abs() < 1e-12);
        }
    }

    #[test]
    fn kpoint_needs_two_components() {
        let model: TightBindingModel = graphene_nn();
        let result = hamiltonian_k(&model, array![0.3].view(), 0.0);
        assert!(matches!(result, Err(MoireError::InvalidInput(_))));
        let h: Array2<c64> = hamiltonian_k(&model, array![0.3, -0.2, 5.0].view(), 0.0).unwrap();
        let h_2d: Array2<c64> = hamiltonian_k(&model, array![0.3, -0.2].view(), 0.0).unwrap();
        assert_eq!(h, h_2d);
    }
}
