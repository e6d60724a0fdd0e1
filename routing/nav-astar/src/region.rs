//! Spatial region index for expanded positions.
//!
//! Space is partitioned into cubic cells of `grid_cell_size` voxels. Each
//! cell that has seen an expansion owns a [`GridRegionData`]: a bloom filter
//! answering "definitely not expanded" cheaply, backed by an exact set of
//! packed keys consulted only when the filter says "maybe". Regions are
//! created lazily on first insertion.

use hashbrown::{HashMap, HashSet};
use nav_spatial::Position;

use crate::bloom::BloomFilter;

/// Per-cell expanded-position membership.
#[derive(Debug, Clone)]
pub(crate) struct GridRegionData {
    filter: BloomFilter,
    examined: HashSet<i64>,
}

impl GridRegionData {
    pub(crate) fn new(bloom_filter_size: usize, bloom_filter_fpp: f64) -> Self {
        Self {
            filter: BloomFilter::new(bloom_filter_size, bloom_filter_fpp),
            examined: HashSet::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: i64) {
        self.filter.insert(key);
        self.examined.insert(key);
    }

    /// Filter first; the exact set only on a "maybe".
    pub(crate) fn contains(&self, key: i64) -> bool {
        self.filter.might_contain(key) && self.examined.contains(&key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.examined.len()
    }
}

/// Lazily populated table of regions, keyed by packed region coordinates.
#[derive(Debug)]
pub(crate) struct RegionIndex {
    cell_size: i32,
    bloom_filter_size: usize,
    bloom_filter_fpp: f64,
    regions: Vec<GridRegionData>,
    slots: HashMap<i64, usize>,
}

impl RegionIndex {
    pub(crate) fn new(cell_size: i32, bloom_filter_size: usize, bloom_filter_fpp: f64) -> Self {
        Self {
            cell_size: cell_size.max(1),
            bloom_filter_size,
            bloom_filter_fpp,
            regions: Vec::new(),
            slots: HashMap::new(),
        }
    }

    fn region_key(&self, position: &Position) -> i64 {
        position.floored().floor_div(self.cell_size).pack()
    }

    /// Records `position` (packed as `key`) as expanded.
    pub(crate) fn insert(&mut self, position: &Position, key: i64) {
        let region_key = self.region_key(position);
        let slot = match self.slots.get(&region_key) {
            Some(&slot) => slot,
            None => {
                let slot = self.regions.len();
                self.regions
                    .push(GridRegionData::new(self.bloom_filter_size, self.bloom_filter_fpp));
                self.slots.insert(region_key, slot);
                slot
            }
        };
        self.regions[slot].insert(key);
    }

    /// Returns `true` if `position` (packed as `key`) was expanded.
    pub(crate) fn contains(&self, position: &Position, key: i64) -> bool {
        self.slots
            .get(&self.region_key(position))
            .is_some_and(|&slot| self.regions[slot].contains(key))
    }

    pub(crate) fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[cfg(test)]
    pub(crate) fn position_count(&self) -> usize {
        self.regions.iter().map(GridRegionData::len).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.regions.clear();
        self.slots.clear();
    }
}
