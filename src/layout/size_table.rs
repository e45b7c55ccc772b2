//! Per-index pixel sizes with cumulative-offset queries.
//!
//! One table holds row heights, another column widths. Sizes live in a dense
//! `Vec<f32>` (no index in `[0, len)` can be missing) mirrored by a
//! [`PrefixSums`] tree, so offset lookups stay O(log n) however many rows the
//! sheet has.

use super::prefix::PrefixSums;

/// Sizes for one axis of the grid.
#[derive(Debug, Clone)]
pub struct SizeTable {
    sizes: Vec<f32>,
    sums: PrefixSums,
    default_size: f32,
}

impl SizeTable {
    /// Create `count` entries, all at `default_size`.
    pub fn new(count: u32, default_size: f32) -> Self {
        let sizes = vec![default_size; count as usize];
        let sums = PrefixSums::from_values(&sizes);
        Self {
            sizes,
            sums,
            default_size,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> u32 {
        u32::try_from(self.sizes.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Size given to inserted entries and returned for out-of-range lookups.
    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    /// Size at `index`, or the default size when `index` is out of range.
    pub fn get(&self, index: u32) -> f32 {
        self.sizes
            .get(index as usize)
            .copied()
            .unwrap_or(self.default_size)
    }

    /// Overwrite the size at `index`. Returns the previous size, or `None`
    /// (and does nothing) when `index` is out of range.
    pub fn set(&mut self, index: u32, size: f32) -> Option<f32> {
        let slot = self.sizes.get_mut(index as usize)?;
        let previous = *slot;
        *slot = size;
        self.sums
            .add(index as usize, f64::from(size) - f64::from(previous));
        Some(previous)
    }

    /// Sum of sizes `[0, index)`: the leading edge of `index`.
    ///
    /// `index` may equal `len()` (the trailing edge of the last entry).
    pub fn offset_of(&self, index: u32) -> f32 {
        narrow(self.sums.sum_before(index as usize))
    }

    /// Sum of sizes over the inclusive range `[from, to]`.
    ///
    /// Returns 0 for an empty range (`from > to`).
    pub fn cumulative(&self, from: u32, to_inclusive: u32) -> f32 {
        if from > to_inclusive {
            return 0.0;
        }
        let end = (to_inclusive as usize).saturating_add(1);
        narrow(self.sums.sum_before(end) - self.sums.sum_before(from as usize))
    }

    /// Sum of all sizes.
    pub fn total(&self) -> f32 {
        narrow(self.sums.total())
    }

    /// Mean size, or the default size for an empty table.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f32 {
        if self.sizes.is_empty() {
            return self.default_size;
        }
        narrow(self.sums.total() / self.sizes.len() as f64)
    }

    /// Index whose span `[offset_of(i), offset_of(i) + size)` contains
    /// `offset`, clamped to the last index. Negative offsets map to 0.
    pub fn index_at(&self, offset: f32) -> u32 {
        if self.sizes.is_empty() {
            return 0;
        }
        let located = self.sums.locate(f64::from(offset));
        let last = self.sizes.len() - 1;
        u32::try_from(located.min(last)).unwrap_or(u32::MAX)
    }

    /// Insert a default-sized entry at `index`; entries at or after it move
    /// up by one. `index` is clamped to `len()`.
    pub fn insert_at(&mut self, index: u32) {
        let at = (index as usize).min(self.sizes.len());
        self.sizes.insert(at, self.default_size);
        self.sums.rebuild(&self.sizes);
    }

    /// Remove the entry at `index`; entries after it move down by one.
    /// Returns the discarded size.
    pub fn remove_at(&mut self, index: u32) -> Option<f32> {
        let at = index as usize;
        if at >= self.sizes.len() {
            return None;
        }
        let removed = self.sizes.remove(at);
        self.sums.rebuild(&self.sizes);
        Some(removed)
    }

    /// Iterate over all sizes in index order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.sizes.iter().copied()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    value as f32
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn unset_lookups_fall_back_to_default() {
        let table = SizeTable::new(3, 28.0);
        assert_eq!(table.get(0), 28.0);
        assert_eq!(table.get(99), 28.0);
    }

    #[test]
    fn cumulative_tracks_set() {
        let mut table = SizeTable::new(5, 10.0);
        assert_eq!(table.set(2, 30.0), Some(10.0));
        assert_eq!(table.offset_of(2), 20.0);
        assert_eq!(table.offset_of(3), 50.0);
        assert_eq!(table.cumulative(1, 3), 50.0);
        assert_eq!(table.cumulative(3, 1), 0.0);
        assert_eq!(table.total(), 70.0);
        assert_eq!(table.set(5, 1.0), None);
    }

    #[test]
    fn insert_shifts_sizes_up_and_uses_default() {
        let mut table = SizeTable::new(3, 10.0);
        table.set(1, 40.0);
        table.insert_at(1);
        assert_eq!(table.len(), 4);
        let sizes: Vec<f32> = table.iter().collect();
        assert_eq!(sizes, vec![10.0, 10.0, 40.0, 10.0]);
        assert_eq!(table.total(), 70.0);
    }

    #[test]
    fn remove_discards_and_shifts_down() {
        let mut table = SizeTable::new(4, 10.0);
        table.set(1, 40.0);
        table.set(2, 25.0);
        assert_eq!(table.remove_at(1), Some(40.0));
        let sizes: Vec<f32> = table.iter().collect();
        assert_eq!(sizes, vec![10.0, 25.0, 10.0]);
        assert_eq!(table.offset_of(2), 35.0);
        assert_eq!(table.remove_at(3), None);
    }

    #[test]
    fn index_at_clamps_to_last_entry() {
        let mut table = SizeTable::new(4, 10.0);
        table.set(0, 5.0);
        assert_eq!(table.index_at(0.0), 0);
        assert_eq!(table.index_at(4.9), 0);
        assert_eq!(table.index_at(5.0), 1);
        assert_eq!(table.index_at(34.0), 3);
        assert_eq!(table.index_at(1_000.0), 3);
    }

    #[test]
    fn average_over_mixed_sizes() {
        let mut table = SizeTable::new(4, 10.0);
        table.set(3, 50.0);
        assert_eq!(table.average(), 20.0);
    }
}
