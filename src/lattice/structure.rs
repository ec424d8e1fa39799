use crate::error::Result;
use crate::lattice::primitives::Supercell;
use ndarray::prelude::*;
use std::f64::consts::PI;
use std::ops::Range;

/// Type that holds a layered moiré superlattice: the lattice vectors of the supercell, the
/// cartesian coordinates of all sites and the bookkeeping of layers and sublattices.
///
/// The order of the sites is fixed once the structure is built. The sites of a layer are
/// contiguous and within a layer all sites of sublattice A come before those of sublattice B.
/// A structure is only created by a lattice builder and extended by
/// [append_layers](MoireStructure::append_layers), which returns a new structure.
#[derive(Debug, Clone)]
pub struct MoireStructure {
    /// lattice vectors of the supercell as rows, the third one is the vacuum axis
    pub(crate) lattice_vectors: Array2<f64>,
    /// cartesian coordinates in Angstrom, one row per site
    pub(crate) coords: Array2<f64>,
    pub(crate) layer_nsites: Vec<usize>,
    pub(crate) layer_nsites_sublattice: Vec<[usize; 2]>,
    /// in-plane primitive lattice vectors (2x2, rows) of every layer
    pub(crate) layer_lattice_vectors: Vec<Array2<f64>>,
    pub(crate) lattice_constant: f64,
    pub(crate) interlayer_spacing: f64,
    pub(crate) twist_angle: Option<f64>,
}

/// The two sublattices of one layer after the supercell transformation together with the
/// primitive lattice vectors of the layer.
pub(crate) struct LayerCells {
    pub sublattice_a: Supercell,
    pub sublattice_b: Supercell,
    pub primitive: Array2<f64>,
}

impl LayerCells {
    pub fn new(sublattice_a: Supercell, sublattice_b: Supercell, primitive: ArrayView2<f64>) -> Self {
        LayerCells {
            sublattice_a,
            sublattice_b,
            primitive: primitive.slice(s![0..2, 0..2]).to_owned(),
        }
    }
}

impl MoireStructure {
    /// Merges the layers into one structure. The sites are concatenated in the order
    /// layer 0 A, layer 0 B, layer 1 A, layer 1 B, ...; the supercell of the first
    /// sublattice defines the lattice vectors.
    pub(crate) fn from_layers(
        layers: Vec<LayerCells>,
        lattice_constant: f64,
        interlayer_spacing: f64,
        twist_angle: Option<f64>,
    ) -> Result<Self> {
        let lattice_vectors: Array2<f64> = layers
            .first()
            .map(|layer| layer.sublattice_a.lattice.clone())
            .unwrap_or_else(|| Array2::eye(3));
        let mut layer_nsites: Vec<usize> = Vec::with_capacity(layers.len());
        let mut layer_nsites_sublattice: Vec<[usize; 2]> = Vec::with_capacity(layers.len());
        let mut layer_lattice_vectors: Vec<Array2<f64>> = Vec::with_capacity(layers.len());
        let mut blocks: Vec<ArrayView2<f64>> = Vec::with_capacity(2 * layers.len());
        for layer in layers.iter() {
            let n_a: usize = layer.sublattice_a.n_sites();
            let n_b: usize = layer.sublattice_b.n_sites();
            layer_nsites.push(n_a + n_b);
            layer_nsites_sublattice.push([n_a, n_b]);
            layer_lattice_vectors.push(layer.primitive.clone());
            blocks.push(layer.sublattice_a.coords.view());
            blocks.push(layer.sublattice_b.coords.view());
        }
        let coords: Array2<f64> = ndarray::concatenate(Axis(0), &blocks)?;
        Ok(MoireStructure {
            lattice_vectors,
            coords,
            layer_nsites,
            layer_nsites_sublattice,
            layer_lattice_vectors,
            lattice_constant,
            interlayer_spacing,
            twist_angle,
        })
    }

    pub fn n_sites(&self) -> usize {
        self.coords.nrows()
    }

    pub fn n_layers(&self) -> usize {
        self.layer_nsites.len()
    }

    pub fn coords(&self) -> ArrayView2<f64> {
        self.coords.view()
    }

    pub fn lattice_vectors(&self) -> ArrayView2<f64> {
        self.lattice_vectors.view()
    }

    /// The two in-plane lattice vectors of the supercell (2x2, rows).
    pub fn in_plane_lattice_vectors(&self) -> ArrayView2<f64> {
        self.lattice_vectors.slice(s![0..2, 0..2])
    }

    pub fn layer_nsites(&self) -> &[usize] {
        &self.layer_nsites
    }

    pub fn layer_nsites_sublattice(&self) -> &[[usize; 2]] {
        &self.layer_nsites_sublattice
    }

    pub fn layer_lattice_vectors(&self) -> &[Array2<f64>] {
        &self.layer_lattice_vectors
    }

    pub fn lattice_constant(&self) -> f64 {
        self.lattice_constant
    }

    pub fn interlayer_spacing(&self) -> f64 {
        self.interlayer_spacing
    }

    /// Twist angle in degree, only known for the exact commensurate construction.
    pub fn twist_angle(&self) -> Option<f64> {
        self.twist_angle
    }

    /// Range of site indices of every layer.
    pub fn layer_ranges(&self) -> Vec<Range<usize>> {
        let mut start: usize = 0;
        self.layer_nsites
            .iter()
            .map(|n| {
                let range: Range<usize> = start..start + n;
                start += n;
                range
            })
            .collect()
    }

    /// Range of site indices of sublattice A and B of every layer.
    pub fn sublattice_ranges(&self) -> Vec<[Range<usize>; 2]> {
        self.layer_ranges()
            .into_iter()
            .zip(self.layer_nsites_sublattice.iter())
            .map(|(layer, [n_a, _])| [layer.start..layer.start + n_a, layer.start + n_a..layer.end])
            .collect()
    }

    /// Layer index of every site.
    pub fn layer_indices(&self) -> Vec<usize> {
        self.layer_nsites
            .iter()
            .enumerate()
            .flat_map(|(layer, n)| std::iter::repeat(layer).take(*n))
            .collect()
    }

    /// Layer of a single site, None if the index is out of range.
    pub fn layer_of(&self, site: usize) -> Option<usize> {
        self.layer_ranges().iter().position(|range| range.contains(&site))
    }

    /// Sublattice index (0 for A and 1 for B) of every site.
    pub fn sublattice_indices(&self) -> Vec<usize> {
        self.layer_nsites_sublattice
            .iter()
            .flat_map(|[n_a, n_b]| {
                std::iter::repeat(0)
                    .take(*n_a)
                    .chain(std::iter::repeat(1).take(*n_b))
            })
            .collect()
    }

    /// Species label of every site, 1 for sublattice A and 2 for sublattice B.
    pub fn species(&self) -> Vec<u8> {
        self.sublattice_indices()
            .into_iter()
            .map(|sublattice| sublattice as u8 + 1)
            .collect()
    }

    /// Vectors from a site to one of its nearest neighbors for every layer. The first entry
    /// belongs to sublattice A and the second (opposite) one to sublattice B.
    /// See PRB 93, 235153 (2016) for their use in the interlayer Wannier hoppings.
    pub fn vecs_to_nearest_neighbors(&self) -> Vec<[[f64; 2]; 2]> {
        self.layer_lattice_vectors
            .iter()
            .map(|latt| {
                let v: Array1<f64> = latt.sum_axis(Axis(0)) / 3.0;
                [[v[0], v[1]], [-v[0], -v[1]]]
            })
            .collect()
    }

    /// In-plane reciprocal lattice vectors (rows) of the supercell, b_i . a_j = 2 pi delta_ij.
    pub fn reciprocal_vectors(&self) -> Array2<f64> {
        let a: ArrayView2<f64> = self.in_plane_lattice_vectors();
        let det: f64 = a[[0, 0]] * a[[1, 1]] - a[[0, 1]] * a[[1, 0]];
        array![[a[[1, 1]], -a[[1, 0]]], [-a[[0, 1]], a[[0, 0]]]] * (2.0 * PI / det)
    }

    /// Fractional in-plane coordinates of all sites with respect to the supercell.
    pub fn fractional_coords(&self) -> Array2<f64> {
        let b: Array2<f64> = self.reciprocal_vectors();
        self.coords.slice(s![.., 0..2]).dot(&b.t()) / (2.0 * PI)
    }
}
