//! Keyed cell content storage.

use std::collections::BTreeMap;

use crate::types::{Cell, CellCoord};

/// Content store keyed by `(row, col)`.
///
/// The grid treats cell content as opaque; it only reads display text and
/// moves entries around when rows or columns are inserted or removed.
pub trait CellStore {
    fn get(&self, row: u32, col: u32) -> Option<&Cell>;

    fn set(&mut self, row: u32, col: u32, cell: Cell);

    fn delete(&mut self, row: u32, col: u32) -> Option<Cell>;

    /// Re-key every entry through `remap`. Entries mapped to `None` are dropped.
    fn remap(&mut self, remap: &mut dyn FnMut(CellCoord) -> Option<CellCoord>);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-major ordered map of cells. Blank cells need not be stored.
#[derive(Debug, Clone, Default)]
pub struct SparseCellStore {
    cells: BTreeMap<CellCoord, Cell>,
}

impl SparseCellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        self.cells.iter().map(|(coord, cell)| (*coord, cell))
    }
}

impl CellStore for SparseCellStore {
    fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&CellCoord::new(row, col))
    }

    fn set(&mut self, row: u32, col: u32, cell: Cell) {
        self.cells.insert(CellCoord::new(row, col), cell);
    }

    fn delete(&mut self, row: u32, col: u32) -> Option<Cell> {
        self.cells.remove(&CellCoord::new(row, col))
    }

    fn remap(&mut self, remap: &mut dyn FnMut(CellCoord) -> Option<CellCoord>) {
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .filter_map(|(coord, cell)| remap(coord).map(|to| (to, cell)))
            .collect();
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let mut store = SparseCellStore::new();
        store.set(3, 1, Cell::text("x"));
        assert_eq!(store.get(3, 1).unwrap().display_text(), "x");
        assert!(store.get(1, 3).is_none());
        assert_eq!(store.delete(3, 1).unwrap().display_text(), "x");
        assert!(store.is_empty());
    }

    #[test]
    fn remap_moves_and_drops() {
        let mut store = SparseCellStore::new();
        store.set(0, 0, Cell::text("a"));
        store.set(1, 0, Cell::text("b"));
        store.set(2, 0, Cell::text("c"));
        store.remap(&mut |coord| match coord.row {
            1 => None,
            r => Some(CellCoord::new(r * 10, coord.col)),
        });
        let keys: Vec<CellCoord> = store.iter().map(|(coord, _)| coord).collect();
        assert_eq!(keys, vec![CellCoord::new(0, 0), CellCoord::new(20, 0)]);
    }
}
