//! Single-cell selection and its highlight.

use crate::render::{ElementPool, RenderHandle};
use crate::types::CellCoord;

/// The selected cell and the pool slot it was resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected {
    pub coord: CellCoord,
    pub slot: usize,
}

/// At most one selected cell.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    current: Option<Selected>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<CellCoord> {
        self.current.map(|s| s.coord)
    }

    /// Select the cell in column `col` of row slot `slot`.
    ///
    /// The row is read from the slot's binding now. The previous selection is
    /// cleared first; an unbound slot or a column without a cell leaves
    /// nothing selected.
    pub fn select<H: RenderHandle>(
        &mut self,
        pool: &mut ElementPool<H>,
        slot: usize,
        col: u32,
    ) -> Option<CellCoord> {
        self.clear(pool);
        let row = pool.bound_row(slot)?;
        if col as usize >= pool.column_count() {
            return None;
        }
        let selected = Selected {
            coord: CellCoord::new(row, col),
            slot,
        };
        highlight(pool, selected, true);
        self.current = Some(selected);
        Some(selected.coord)
    }

    /// Remove the selection and its highlight. Returns whether anything was
    /// selected.
    pub fn clear<H: RenderHandle>(&mut self, pool: &mut ElementPool<H>) -> bool {
        match self.current.take() {
            Some(selected) => {
                highlight(pool, selected, false);
                true
            }
            None => false,
        }
    }
}

/// Cell, row header and column header of `selected`.
fn highlight<H: RenderHandle>(pool: &mut ElementPool<H>, selected: Selected, on: bool) {
    let col = selected.coord.col as usize;
    if let Some(slot) = pool.rows.get_mut(selected.slot) {
        slot.header.set_highlighted(on);
        if let Some(cell) = slot.cells.get_mut(col) {
            cell.set_highlighted(on);
        }
    }
    if let Some(column) = pool.columns.get_mut(col) {
        column.header.set_highlighted(on);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::HeadlessSurface;

    fn bound_pool() -> ElementPool<crate::render::HeadlessHandle> {
        let mut surface = HeadlessSurface::new();
        let mut pool = ElementPool::build(&mut surface, 4, 3).unwrap();
        for (slot, row) in pool.rows.iter_mut().zip(20..) {
            slot.bind(Some(row));
        }
        pool
    }

    #[test]
    fn select_reads_live_binding() {
        let mut pool = bound_pool();
        let mut selection = SelectionController::new();
        assert_eq!(selection.select(&mut pool, 2, 1), Some(CellCoord::new(22, 1)));

        let slot = pool.row_slot(2).unwrap();
        assert!(slot.cell(1).unwrap().highlighted);
        assert!(slot.header().highlighted);
        assert!(pool.column_slot(1).unwrap().header().highlighted);
    }

    #[test]
    fn new_selection_unhighlights_previous() {
        let mut pool = bound_pool();
        let mut selection = SelectionController::new();
        selection.select(&mut pool, 0, 0);
        selection.select(&mut pool, 3, 2);

        assert!(!pool.row_slot(0).unwrap().cell(0).unwrap().highlighted);
        assert!(!pool.column_slot(0).unwrap().header().highlighted);
        assert_eq!(selection.selected(), Some(CellCoord::new(23, 2)));
        let highlighted = pool
            .row_slots()
            .flat_map(|slot| slot.cells.iter())
            .filter(|cell| cell.highlighted)
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn unbound_slot_selects_nothing() {
        let mut pool = bound_pool();
        pool.rows[1].bind(None);
        let mut selection = SelectionController::new();
        selection.select(&mut pool, 0, 0);
        assert_eq!(selection.select(&mut pool, 1, 0), None);
        assert_eq!(selection.selected(), None);
        assert!(!pool.row_slot(0).unwrap().cell(0).unwrap().highlighted);
    }

    #[test]
    fn clear_reports_prior_state() {
        let mut pool = bound_pool();
        let mut selection = SelectionController::new();
        assert!(!selection.clear(&mut pool));
        selection.select(&mut pool, 1, 1);
        assert!(selection.clear(&mut pool));
        assert!(!pool.row_slot(1).unwrap().header().highlighted);
    }
}
