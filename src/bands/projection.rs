use ndarray::prelude::*;
use ndarray_linalg::c64;

/// Weight of supercell eigenstates on the Bloch states of a reference lattice, used to
/// unfold the bands of a large supercell.
pub trait SpectralProjector: Sync {
    /// Returns one weight per eigenvector (column of `eigenvectors`).
    ///
    /// * `k` - momentum in 1/Angstrom
    /// * `sublattice_nsites` - number of sites of sublattice A and B of every layer
    /// * `layer_weights` - weight of every layer
    /// * `coords` - cartesian coordinates of all sites
    /// * `species` - sublattice label of every site, 1 for A and 2 for B
    fn project(
        &self,
        k: ArrayView1<f64>,
        sublattice_nsites: &[[usize; 2]],
        layer_weights: &[f64],
        eigenvectors: ArrayView2<c64>,
        coords: ArrayView2<f64>,
        species: &[u8],
    ) -> Array1<f64>;
}

/// Projection onto the plane waves exp(i k.r) of every sublattice of every layer:
/// P = sum_l w_l sum_s |sum_{j in (l, s)} psi_j exp(-i k.r_j)|^2 / N_{l,s}
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneWaveProjector;

impl SpectralProjector for PlaneWaveProjector {
    fn project(
        &self,
        k: ArrayView1<f64>,
        sublattice_nsites: &[[usize; 2]],
        layer_weights: &[f64],
        eigenvectors: ArrayView2<c64>,
        coords: ArrayView2<f64>,
        species: &[u8],
    ) -> Array1<f64> {
        let phases: Array1<c64> = coords
            .outer_iter()
            .map(|r| {
                let kr: f64 = k[0] * r[0] + k[1] * r[1];
                c64::new(kr.cos(), -kr.sin())
            })
            .collect();

        let mut weights: Array1<f64> = Array1::zeros(eigenvectors.ncols());
        for (psi, weight) in eigenvectors.axis_iter(Axis(1)).zip(weights.iter_mut()) {
            let mut start: usize = 0;
            for (layer, counts) in sublattice_nsites.iter().enumerate() {
                let w_l: f64 = layer_weights.get(layer).copied().unwrap_or(1.0);
                let end: usize = start + counts[0] + counts[1];
                for (s, count) in counts.iter().enumerate() {
                    if *count == 0 {
                        continue;
                    }
                    let amplitude: c64 = (start..end)
                        .filter(|j| species[*j] as usize == s + 1)
                        .map(|j| psi[j] * phases[j])
                        .sum();
                    *weight += w_l * amplitude.norm_sqr() / *count as f64;
                }
                start = end;
            }
        }
        weights
    }
}
