use crate::error::{MoireError, Result};
use crate::lattice::structure::MoireStructure;
use log::debug;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// In-plane arrangement of an appended layer. `A` is the bottom layer at 0, `Atld` the
/// rotated top layer at 1*h; `B` and `Btld` are the same layers shifted by a third of the
/// sum of their primitive lattice vectors (Bernal stacked on top of them).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    A,
    B,
    Atld,
    Btld,
}

impl LayerKind {
    /// index of the existing layer the in-plane coordinates are taken from
    fn source_layer(&self) -> usize {
        match self {
            LayerKind::A | LayerKind::B => 0,
            LayerKind::Atld | LayerKind::Btld => 1,
        }
    }

    fn is_shifted(&self) -> bool {
        matches!(self, LayerKind::B | LayerKind::Btld)
    }
}

/// A set of layers of the same kind at the heights `multiplier * h`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerStack {
    pub kind: LayerKind,
    pub heights: Vec<i64>,
}

impl LayerStack {
    pub fn new(kind: LayerKind, heights: Vec<i64>) -> Self {
        LayerStack { kind, heights }
    }
}

impl MoireStructure {
    /// Adds layers of kind A, B, Atld or Btld to the structure. The layers are appended in the
    /// order in which they are requested, e.g.
    /// `[A: [-1, -3], B: [-2, -4], Atld: [2, 4], Btld: [3, 5]]`
    /// adds A layers at -1*h and -3*h, B layers at -2*h and -4*h and so on.
    /// Every new layer inherits the sublattice partition and primitive lattice vectors of its
    /// source layer. Overlapping layers are not detected.
    pub fn append_layers(self, layers: &[LayerStack]) -> Result<Self> {
        let mut structure: MoireStructure = self;
        for stack in layers.iter() {
            let source: usize = stack.kind.source_layer();
            if source >= structure.n_layers() {
                return Err(MoireError::invalid_input(format!(
                    "layer kind {:?} requires at least {} layers in the structure",
                    stack.kind,
                    source + 1
                )));
            }
            let coords_xy: Array2<f64> = structure.in_plane_coords_of(stack.kind, source);
            let n_sites: usize = coords_xy.nrows();
            for multiplier in stack.heights.iter() {
                let z: f64 = structure.interlayer_spacing * *multiplier as f64;
                let mut layer: Array2<f64> = Array2::from_elem((n_sites, 3), z);
                layer.slice_mut(s![.., 0..2]).assign(&coords_xy);
                let coords: Array2<f64> =
                    ndarray::concatenate(Axis(0), &[structure.coords.view(), layer.view()])?;
                structure.coords = coords;
                structure.layer_nsites.push(n_sites);
                let sublattice: [usize; 2] = structure.layer_nsites_sublattice[source];
                structure.layer_nsites_sublattice.push(sublattice);
                let primitive: Array2<f64> = structure.layer_lattice_vectors[source].clone();
                structure.layer_lattice_vectors.push(primitive);
                debug!(
                    "{: <25} {:?} at z = {:>10.4}",
                    "appended layer:", stack.kind, z
                );
            }
        }
        Ok(structure)
    }

    fn in_plane_coords_of(&self, kind: LayerKind, source: usize) -> Array2<f64> {
        let range = self.layer_ranges()[source].clone();
        let mut xy: Array2<f64> = self.coords.slice(s![range, 0..2]).to_owned();
        if kind.is_shifted() {
            let shift: Array1<f64> = self.layer_lattice_vectors[source].sum_axis(Axis(0)) / 3.0;
            xy += &shift;
        }
        xy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{CommensurateLattice, Graphene, LatticeBuilder, RotationCenter};

    #[test]
    fn appended_layers_keep_the_bookkeeping_consistent() {
        let structure: MoireStructure = CommensurateLattice::new(2.46, 3.35, RotationCenter::Atom, 2, 1)
            .build()
            .unwrap();
        let n_bilayer: usize = structure.n_sites();
        let layers: Vec<LayerStack> = vec![
            LayerStack::new(LayerKind::A, vec![-1, -3]),
            LayerStack::new(LayerKind::Btld, vec![2]),
        ];
        let structure: MoireStructure = structure.append_layers(&layers).unwrap();
        assert_eq!(structure.n_layers(), 5);
        assert_eq!(structure.n_sites(), n_bilayer / 2 * 5);
        assert_eq!(structure.layer_nsites().iter().sum::<usize>(), structure.n_sites());
        for (n, [n_a, n_b]) in structure
            .layer_nsites()
            .iter()
            .zip(structure.layer_nsites_sublattice().iter())
        {
            assert_eq!(n_a + n_b, *n);
        }
        // order of the new layers follows the request
        let ranges = structure.layer_ranges();
        assert!((structure.coords()[[ranges[2].start, 2]] + 3.35).abs() < 1e-12);
        assert!((structure.coords()[[ranges[3].start, 2]] + 3.0 * 3.35).abs() < 1e-12);
        assert!((structure.coords()[[ranges[4].start, 2]] - 2.0 * 3.35).abs() < 1e-12);
        assert_eq!(structure.layer_lattice_vectors()[4], structure.layer_lattice_vectors()[1]);
    }

    #[test]
    fn shifted_layer_is_bernal_stacked() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let structure: MoireStructure = structure
            .append_layers(&[LayerStack::new(LayerKind::B, vec![1])])
            .unwrap();
        // site A of the new layer sits on top of site B of the first layer
        let coords: ArrayView2<f64> = structure.coords();
        assert!((coords[[2, 0]] - coords[[1, 0]]).abs() < 1e-12);
        assert!((coords[[2, 1]] - coords[[1, 1]]).abs() < 1e-12);
    }

    #[test]
    fn top_kinds_need_a_bilayer() {
        let structure: MoireStructure = Graphene::default().build().unwrap();
        let result = structure.append_layers(&[LayerStack::new(LayerKind::Atld, vec![1])]);
        assert!(matches!(result, Err(MoireError::InvalidInput(_))));
    }
}
