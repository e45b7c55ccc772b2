//! Structural commands and cell edits.
//!
//! Row and column commands act on the selected cell and do nothing without
//! one. They always end with a full window render, which clears the
//! selection.

use tracing::info;

use crate::error::Result;
use crate::model::CellStore;
use crate::render::{RenderHandle, RenderSurface};
use crate::types::{ActionState, CellType, InsertPosition};

use super::GridEngine;

impl<Sf: RenderSurface, St: CellStore> GridEngine<Sf, St> {
    /// Insert a row before or after the selected one. Returns the new row's
    /// index, or `None` without a selection.
    pub fn insert_row(&mut self, position: InsertPosition) -> Option<u32> {
        let selected = self.selection.selected()?;
        self.selection.clear(&mut self.pool);
        let at = self.model.insert_row(position.resolve(selected.row));
        info!(at, rows = self.model.row_count(), "row inserted");
        self.on_viewport_changed();
        Some(at)
    }

    /// Remove the selected row. Returns `false` without a selection or at the
    /// minimum row count.
    pub fn remove_row(&mut self) -> bool {
        let Some(selected) = self.selection.selected() else {
            return false;
        };
        if !self.model.remove_row(selected.row) {
            return false;
        }
        info!(at = selected.row, rows = self.model.row_count(), "row removed");
        self.on_viewport_changed();
        true
    }

    /// Insert a column before or after the selected one. Returns the new
    /// column's index, or `Ok(None)` without a selection.
    pub fn insert_column(&mut self, position: InsertPosition) -> Result<Option<u32>> {
        let Some(selected) = self.selection.selected() else {
            return Ok(None);
        };
        self.selection.clear(&mut self.pool);
        self.pool.push_column(&mut self.surface)?;
        let at = self.model.insert_column(position.resolve(selected.col));
        info!(at, columns = self.model.column_count(), "column inserted");
        self.renderer
            .rerender_columns_from(&mut self.surface, &mut self.pool, &self.model, at);
        self.on_viewport_changed();
        Ok(Some(at))
    }

    /// Remove the selected column. Same rules as [`GridEngine::remove_row`].
    pub fn remove_column(&mut self) -> bool {
        let Some(selected) = self.selection.selected() else {
            return false;
        };
        if !self.model.remove_column(selected.col) {
            return false;
        }
        self.selection.clear(&mut self.pool);
        self.pool.pop_column(&mut self.surface);
        info!(at = selected.col, columns = self.model.column_count(), "column removed");
        self.renderer.rerender_columns_from(
            &mut self.surface,
            &mut self.pool,
            &self.model,
            selected.col,
        );
        self.on_viewport_changed();
        true
    }

    /// Which structural commands would currently do something.
    pub fn action_state(&self) -> ActionState {
        let selected = self.selection.selected().is_some();
        ActionState {
            can_insert_row: selected,
            can_remove_row: selected && self.model.can_remove_row(),
            can_insert_column: selected,
            can_remove_column: selected && self.model.can_remove_column(),
        }
    }

    /// Write a typed-in value and refresh the cell if it is on screen.
    pub fn set_cell_value(&mut self, row: u32, col: u32, value: &str) -> Result<CellType> {
        let cell_type = self.model.set_cell_value(row, col, value)?;
        if let Some(slot) = self.pool.slot_of_row(row) {
            let text = self.model.display_text(row, col);
            if let Some(cell) = self
                .pool
                .rows
                .get_mut(slot)
                .and_then(|slot| slot.cells.get_mut(col as usize))
            {
                cell.set_content(text);
            }
        }
        Ok(cell_type)
    }
}
