use hashbrown::HashMap;
use ndarray_linalg::c64;

/// Hopping from a site in the home cell to `target` in the cell (m, n).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hopping {
    pub m: i32,
    pub n: i32,
    pub target: usize,
    pub amplitude: c64,
}

/// Key of the per-site hopping dictionary: (cell offset m, cell offset n, target site).
pub type HoppingKey = (i32, i32, usize);

/// Key of the hopping dictionary of the sampling package, which carries an additional
/// (always zero) index of the orbital layer within the unit cell.
pub type SampleHoppingKey = (i32, i32, i32, usize);

/// Sparse real-space hoppings stored as a flat array that is indexed by the home site.
///
/// Only one direction of every pair of sites is stored. The Bloch Hamiltonian adds the
/// complex conjugate for the reverse direction, so a table that contains both i -> j and
/// j -> i counts this coupling twice. This is a precondition of the table and not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct HoppingTable {
    offsets: Vec<usize>,
    hoppings: Vec<Hopping>,
}

impl HoppingTable {
    /// Builds the table from one dictionary per home site.
    pub fn from_maps(maps: Vec<HashMap<HoppingKey, c64>>) -> Self {
        let mut offsets: Vec<usize> = Vec::with_capacity(maps.len() + 1);
        let mut hoppings: Vec<Hopping> = Vec::with_capacity(maps.iter().map(|map| map.len()).sum());
        offsets.push(0);
        for map in maps.into_iter() {
            let mut entries: Vec<(HoppingKey, c64)> = map.into_iter().collect();
            // the order of a hash map is random, the table should be reproducible
            entries.sort_by_key(|((m, n, target), _)| (*target, *m, *n));
            hoppings.extend(entries.into_iter().map(|((m, n, target), amplitude)| Hopping {
                m,
                n,
                target,
                amplitude,
            }));
            offsets.push(hoppings.len());
        }
        HoppingTable { offsets, hoppings }
    }

    /// Number of home sites.
    pub fn n_sites(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of stored hoppings.
    pub fn len(&self) -> usize {
        self.hoppings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hoppings.is_empty()
    }

    /// All hoppings that start at site `i`.
    pub fn of_site(&self, i: usize) -> &[Hopping] {
        &self.hoppings[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Iterates over (home site, hopping).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Hopping)> + '_ {
        (0..self.n_sites()).flat_map(move |i| self.of_site(i).iter().map(move |hop| (i, hop)))
    }

    pub fn get(&self, i: usize, key: HoppingKey) -> Option<c64> {
        self.of_site(i)
            .iter()
            .find(|hop| (hop.m, hop.n, hop.target) == key)
            .map(|hop| hop.amplitude)
    }

    /// One dictionary per home site keyed by (m, n, target).
    pub fn to_maps(&self) -> Vec<HashMap<HoppingKey, c64>> {
        (0..self.n_sites())
            .map(|i| {
                self.of_site(i)
                    .iter()
                    .map(|hop| ((hop.m, hop.n, hop.target), hop.amplitude))
                    .collect()
            })
            .collect()
    }

    /// One dictionary per home site keyed by (m, n, 0, target), the layout expected by the
    /// sampling package. The amplitudes are copied unchanged.
    pub fn hoppings_2to3(&self) -> Vec<HashMap<SampleHoppingKey, c64>> {
        (0..self.n_sites())
            .map(|i| {
                self.of_site(i)
                    .iter()
                    .map(|hop| ((hop.m, hop.n, 0, hop.target), hop.amplitude))
                    .collect()
            })
            .collect()
    }
}

/// Collects hoppings site by site. Inserting the same key twice keeps the last amplitude.
pub struct HoppingTableBuilder {
    maps: Vec<HashMap<HoppingKey, c64>>,
}

impl HoppingTableBuilder {
    pub fn new(n_sites: usize) -> Self {
        HoppingTableBuilder {
            maps: vec![HashMap::new(); n_sites],
        }
    }

    pub fn insert(&mut self, i: usize, m: i32, n: i32, target: usize, amplitude: c64) {
        self.maps[i].insert((m, n, target), amplitude);
    }

    pub fn finalize(self) -> HoppingTable {
        HoppingTable::from_maps(self.maps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_table() -> HoppingTable {
        let mut builder: HoppingTableBuilder = HoppingTableBuilder::new(3);
        builder.insert(0, 0, 0, 1, c64::new(-2.7, 0.0));
        builder.insert(0, 1, 0, 2, c64::new(0.3, 0.1));
        builder.insert(2, 0, -1, 2, c64::new(0.05, 0.0));
        builder.finalize()
    }

    #[test]
    fn table_is_indexed_by_home_site() {
        let table: HoppingTable = example_table();
        assert_eq!(table.n_sites(), 3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.of_site(0).len(), 2);
        assert!(table.of_site(1).is_empty());
        assert_eq!(table.get(0, (1, 0, 2)), Some(c64::new(0.3, 0.1)));
        assert_eq!(table.get(2, (0, 1, 2)), None);
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn sample_dictionary_inserts_a_zero_index() {
        let table: HoppingTable = example_table();
        let sample: Vec<HashMap<SampleHoppingKey, c64>> = table.hoppings_2to3();
        assert_eq!(sample.len(), table.n_sites());
        for (i, map) in sample.iter().enumerate() {
            assert_eq!(map.len(), table.of_site(i).len());
            for hop in table.of_site(i).iter() {
                assert_eq!(map[&(hop.m, hop.n, 0, hop.target)], hop.amplitude);
            }
        }
    }

    #[test]
    fn maps_round_trip() {
        let table: HoppingTable = example_table();
        assert_eq!(HoppingTable::from_maps(table.to_maps()), table);
    }
}
