//! Click selection and anchor-drag resizing.
//!
//! Anchors are addressed by a key that stays valid across renders: the row
//! slot id for row anchors, the column index for column anchors. The logical
//! row behind a slot is looked up again at every callback.

use tracing::{debug, info};

use crate::interaction::{AnchorFrame, ResizeCommit, ResizeController};
use crate::model::CellStore;
use crate::render::{RenderHandle, RenderSurface};
use crate::types::{Axis, CellCoord};

use super::GridEngine;

impl<Sf: RenderSurface, St: CellStore> GridEngine<Sf, St> {
    /// Click on the cell in column `col` of row slot `slot`.
    pub fn click_cell(&mut self, slot: usize, col: u32) -> Option<CellCoord> {
        let selected = self.selection.select(&mut self.pool, slot, col);
        debug!(slot, col, ?selected, "cell clicked");
        selected
    }

    /// Click anywhere that is not a cell.
    pub fn click_elsewhere(&mut self) {
        self.selection.clear(&mut self.pool);
    }

    /// Select logical cell `(row, col)` if its row is materialized.
    pub fn select_cell(&mut self, row: u32, col: u32) -> Option<CellCoord> {
        match self.pool.slot_of_row(row) {
            Some(slot) => self.click_cell(slot, col),
            None => {
                self.selection.clear(&mut self.pool);
                None
            }
        }
    }

    /// Geometry of anchor `key` on `axis`, resolved now.
    pub fn anchor_frame(&self, axis: Axis, key: usize) -> Option<AnchorFrame> {
        let layout = self.layout();
        let metrics = layout.metrics();
        match axis {
            Axis::Row => {
                let index = self.pool.bound_row(key)?;
                Some(AnchorFrame {
                    index,
                    start_offset: layout.row_y(index),
                    size: layout.rows().get(index),
                    scroll: self.viewport.scroll_y,
                    viewport_extent: self.viewport.height,
                    header_extent: metrics.header_height,
                })
            }
            Axis::Column => {
                let index = u32::try_from(key).ok()?;
                if index >= self.model.column_count() {
                    return None;
                }
                Some(AnchorFrame {
                    index,
                    start_offset: layout.col_left(index),
                    size: layout.columns().get(index),
                    scroll: self.viewport.scroll_x,
                    viewport_extent: self.viewport.width,
                    header_extent: metrics.row_header_width,
                })
            }
        }
    }

    /// Pointer pressed on anchor `key`.
    pub fn anchor_press(&mut self, axis: Axis, key: usize) {
        self.resize_controller(axis).press(key);
    }

    /// Native drag started on the pressed anchor. Hides the other anchors of
    /// the axis. Returns `false` when nothing was pressed.
    pub fn anchor_drag_start(&mut self, axis: Axis) -> bool {
        let Some(key) = self.resize_controller(axis).begin_drag() else {
            return false;
        };
        self.renderer.suppress_anchors(&mut self.pool, axis, key);
        if let Some(anchor) = self.anchor_handle(axis, key) {
            anchor.set_highlighted(true);
        }
        true
    }

    /// Pointer at container-relative `pointer` during the drag. Moves only
    /// the dragged anchor; returns its clamped position.
    pub fn anchor_drag_over(&mut self, axis: Axis, pointer: f32) -> Option<f32> {
        let key = self.resize_controller(axis).active_slot()?;
        let frame = self.anchor_frame(axis, key)?;
        let position = self.resize_controller(axis).drag_over(&frame, pointer)?;
        if let Some(anchor) = self.anchor_handle(axis, key) {
            match axis {
                Axis::Row => anchor.set_offset(0.0, position),
                Axis::Column => anchor.set_offset(position, 0.0),
            }
        }
        Some(position)
    }

    /// Drag finished: commit the new size and re-render everything after it.
    pub fn anchor_drop(&mut self, axis: Axis) -> Option<ResizeCommit> {
        let key = self.resize_controller(axis).active_slot()?;
        if let Some(anchor) = self.anchor_handle(axis, key) {
            anchor.set_highlighted(false);
        }
        self.renderer.restore_anchors(&mut self.pool, &self.model, axis);

        let Some(frame) = self.anchor_frame(axis, key) else {
            debug!(?axis, key, "anchor lost its binding before drop");
            self.resize_controller(axis).reset();
            self.on_viewport_changed();
            return None;
        };
        let commit = self.resize_controller(axis).drop(&frame)?;
        self.apply_resize(commit);
        Some(commit)
    }

    /// Pointer released without a drag starting.
    pub fn anchor_release(&mut self, axis: Axis) -> bool {
        self.resize_controller(axis).release()
    }

    /// Run a whole press, drag and drop gesture that moves the anchor of
    /// logical `index` so the row or column becomes `size` long. Only
    /// materialized rows can be resized this way.
    pub fn drag_anchor_to(&mut self, axis: Axis, index: u32, size: f32) -> Option<ResizeCommit> {
        let key = match axis {
            Axis::Row => self.pool.slot_of_row(index)?,
            Axis::Column => usize::try_from(index).ok()?,
        };
        let frame = self.anchor_frame(axis, key)?;
        self.anchor_press(axis, key);
        self.anchor_drag_start(axis);
        self.anchor_drag_over(axis, frame.start_offset + size - frame.scroll);
        self.anchor_drop(axis)
    }

    /// Write a committed size and run the partial pass from its index.
    fn apply_resize(&mut self, commit: ResizeCommit) {
        self.selection.clear(&mut self.pool);
        match commit.axis {
            Axis::Row => {
                self.model.set_row_height(commit.index, commit.size);
                self.renderer.rerender_rows_from(
                    &mut self.surface,
                    &mut self.pool,
                    &self.model,
                    commit.index,
                );
                // A shrunken row can leave the window short of the viewport.
                self.on_scroll();
            }
            Axis::Column => {
                self.model.set_column_width(commit.index, commit.size);
                self.renderer.rerender_columns_from(
                    &mut self.surface,
                    &mut self.pool,
                    &self.model,
                    commit.index,
                );
            }
        }
        info!(
            axis = commit.axis.as_str(),
            index = commit.index,
            size = commit.size,
            previous = commit.previous,
            "resize committed"
        );
    }

    fn resize_controller(&mut self, axis: Axis) -> &mut ResizeController {
        match axis {
            Axis::Row => &mut self.row_resize,
            Axis::Column => &mut self.column_resize,
        }
    }

    fn anchor_handle(&mut self, axis: Axis, key: usize) -> Option<&mut Sf::Handle> {
        match axis {
            Axis::Row => self.pool.rows.get_mut(key).map(|slot| &mut slot.anchor),
            Axis::Column => self.pool.columns.get_mut(key).map(|column| &mut column.anchor),
        }
    }
}
