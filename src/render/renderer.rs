//! Binds pool slots to a row window and positions every element.
//!
//! All offsets come from a [`LayoutContext`] built from the model's current
//! size tables, so a pass never depends on state left over from an earlier
//! one.

use tracing::debug;

use crate::cell_ref::column_title;
use crate::config::GridConfig;
use crate::layout::{GridMetrics, LayoutContext, Window};
use crate::model::{CellStore, GridModel};
use crate::types::Axis;

use super::backend::{RenderHandle, RenderSurface};
use super::pool::{ElementPool, RowSlot};

/// Sentinels are a thin line; only their top edge matters.
const SENTINEL_HEIGHT: f32 = 1.0;

/// Result of a window pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Rows bound to a slot
    pub bound: u32,
    /// Rows of the window that had no slot left
    pub skipped: u32,
}

/// Writes layout into pool elements.
#[derive(Debug, Clone)]
pub struct Renderer {
    metrics: GridMetrics,
    top_sentinel_offset: f32,
    /// Axis whose anchors are hidden while one of them is dragged, and the
    /// anchor that stays visible
    suppressed_anchors: Option<(Axis, usize)>,
}

impl Renderer {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            metrics: GridMetrics::from_config(config),
            top_sentinel_offset: config.top_sentinel_offset,
            suppressed_anchors: None,
        }
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Layout over the model's current sizes.
    pub fn layout<'a, St: CellStore>(&self, model: &'a GridModel<St>) -> LayoutContext<'a> {
        LayoutContext::new(model.rows(), model.columns(), self.metrics)
    }

    /// Bind rows `[window.start, window.end]` to consecutive slots.
    ///
    /// Every slot is hidden and unbound first, then each row in the window
    /// gets the next slot in ascending order. Rows past the pool capacity
    /// are skipped.
    pub fn render_window<Sf, St>(
        &self,
        surface: &mut Sf,
        pool: &mut ElementPool<Sf::Handle>,
        model: &GridModel<St>,
        window: Window,
    ) -> RenderStats
    where
        Sf: RenderSurface,
        St: CellStore,
    {
        let _span =
            tracing::debug_span!("render_window", start = window.start, end = window.end).entered();
        let layout = self.layout(model);

        for slot in &mut pool.rows {
            slot.hide();
            slot.bind(None);
        }

        let mut stats = RenderStats {
            bound: 0,
            skipped: 0,
        };
        let mut slots = pool.rows.iter_mut();
        for row in window.iter() {
            if row >= model.row_count() {
                break;
            }
            let Some(slot) = slots.next() else {
                stats.skipped += 1;
                debug!(row, "no pool slot left for row");
                continue;
            };
            slot.bind(Some(row));
            self.place_row(slot, &layout, row);
            for (col, cell) in (0u32..).zip(slot.cells.iter_mut()) {
                cell.set_content(model.display_text(row, col));
            }
            stats.bound += 1;
        }

        self.place_sentinels(pool, &layout, window);
        publish_extent(surface, &layout);
        stats
    }

    /// Recompute header, anchor and cell geometry for every column from
    /// `index` onward, then the row widths and the table width. Earlier
    /// columns are not touched.
    pub fn rerender_columns_from<Sf, St>(
        &self,
        surface: &mut Sf,
        pool: &mut ElementPool<Sf::Handle>,
        model: &GridModel<St>,
        index: u32,
    ) where
        Sf: RenderSurface,
        St: CellStore,
    {
        let _span = tracing::debug_span!("rerender_columns_from", index).entered();
        let layout = self.layout(model);

        for (col, column) in (0u32..).zip(pool.columns.iter_mut()).skip(index as usize) {
            let width = layout.columns().get(col);
            column.header.set_binding(Some(col));
            column.header.set_offset(layout.col_left(col), 0.0);
            column.header.set_size(width, self.metrics.header_height);
            column.header.set_content(&column_title(col));
            column.header.set_visible(true);

            column.anchor.set_binding(Some(col));
            column.anchor.set_offset(layout.col_right(col), 0.0);
            column.anchor
                .set_visible(self.anchor_allowed(Axis::Column, col as usize));
        }

        for slot in &mut pool.rows {
            let height = slot
                .bound
                .map_or(layout.rows().default_size(), |row| layout.rows().get(row));
            if slot.bound.is_some() {
                slot.body.set_size(layout.row_width(), height);
            }
            for (col, cell) in (0u32..).zip(slot.cells.iter_mut()).skip(index as usize) {
                cell.set_binding(Some(col));
                cell.set_offset(layout.cell_x(col), 0.0);
                cell.set_size(layout.columns().get(col), height);
            }
        }

        let width = layout.total_width();
        pool.top_sentinel.set_size(width, SENTINEL_HEIGHT);
        pool.bottom_sentinel.set_size(width, SENTINEL_HEIGHT);
        publish_extent(surface, &layout);
    }

    /// Recompute geometry of bound slots whose row is `index` or later, then
    /// the sentinels and the table height. Earlier rows are not touched.
    pub fn rerender_rows_from<Sf, St>(
        &self,
        surface: &mut Sf,
        pool: &mut ElementPool<Sf::Handle>,
        model: &GridModel<St>,
        index: u32,
    ) where
        Sf: RenderSurface,
        St: CellStore,
    {
        let _span = tracing::debug_span!("rerender_rows_from", index).entered();
        let layout = self.layout(model);

        for slot in &mut pool.rows {
            match slot.bound {
                Some(row) if row >= index => self.place_row(slot, &layout, row),
                _ => {}
            }
        }

        if let Some(window) = bound_window(pool) {
            self.place_sentinels(pool, &layout, window);
        }
        publish_extent(surface, &layout);
    }

    /// Hide every anchor of `axis` except `keep` (a row slot id for rows, a
    /// column index for columns) while it is being dragged.
    pub fn suppress_anchors<H: RenderHandle>(&mut self, pool: &mut ElementPool<H>, axis: Axis, keep: usize) {
        self.suppressed_anchors = Some((axis, keep));
        match axis {
            Axis::Row => {
                for slot in &mut pool.rows {
                    if slot.slot_id() != keep {
                        slot.anchor.set_visible(false);
                    }
                }
            }
            Axis::Column => {
                for (col, column) in pool.columns.iter_mut().enumerate() {
                    if col != keep {
                        column.anchor.set_visible(false);
                    }
                }
            }
        }
    }

    /// Undo [`Renderer::suppress_anchors`] for `axis`.
    pub fn restore_anchors<H, St>(&mut self, pool: &mut ElementPool<H>, model: &GridModel<St>, axis: Axis)
    where
        H: RenderHandle,
        St: CellStore,
    {
        if self.anchors_suppressed() == Some(axis) {
            self.suppressed_anchors = None;
        }
        match axis {
            Axis::Row => {
                let last = model.row_count().saturating_sub(1);
                for slot in &mut pool.rows {
                    let visible = slot.bound.is_some_and(|row| row < last);
                    slot.anchor.set_visible(visible);
                }
            }
            Axis::Column => {
                for column in &mut pool.columns {
                    column.anchor.set_visible(true);
                }
            }
        }
    }

    pub fn anchors_suppressed(&self) -> Option<Axis> {
        self.suppressed_anchors.map(|(axis, _)| axis)
    }

    /// Whether anchor `key` of `axis` may show under the current suppression.
    fn anchor_allowed(&self, axis: Axis, key: usize) -> bool {
        match self.suppressed_anchors {
            Some((suppressed, keep)) if suppressed == axis => key == keep,
            _ => true,
        }
    }

    fn place_row<H: RenderHandle>(&self, slot: &mut RowSlot<H>, layout: &LayoutContext<'_>, row: u32) {
        let top = layout.row_y(row);
        let height = layout.rows().get(row);
        let last = layout.rows().len().saturating_sub(1);

        slot.body.set_offset(self.metrics.row_header_width, top);
        slot.body.set_size(layout.row_width(), height);
        slot.body.set_visible(true);

        slot.header.set_offset(0.0, top);
        slot.header.set_size(self.metrics.row_header_width, height);
        slot.header.set_content(&(u64::from(row) + 1).to_string());
        slot.header.set_visible(true);

        slot.anchor.set_offset(0.0, layout.row_bottom(row));
        slot.anchor
            .set_visible(row < last && self.anchor_allowed(Axis::Row, slot.slot_id()));

        for (col, cell) in (0u32..).zip(slot.cells.iter_mut()) {
            cell.set_binding(Some(col));
            cell.set_offset(layout.cell_x(col), 0.0);
            cell.set_size(layout.columns().get(col), height);
        }
    }

    fn place_sentinels<H: RenderHandle>(
        &self,
        pool: &mut ElementPool<H>,
        layout: &LayoutContext<'_>,
        window: Window,
    ) {
        let width = layout.total_width();
        let top = (layout.row_top(window.start) - self.top_sentinel_offset).max(0.0);
        let bottom =
            layout.row_top(window.end.saturating_add(1)) + self.metrics.header_height * 2.0;

        pool.top_sentinel.set_offset(0.0, top);
        pool.top_sentinel.set_size(width, SENTINEL_HEIGHT);
        pool.top_sentinel.set_visible(true);
        pool.bottom_sentinel.set_offset(0.0, bottom);
        pool.bottom_sentinel.set_size(width, SENTINEL_HEIGHT);
        pool.bottom_sentinel.set_visible(true);
    }
}

/// Window spanned by the slots currently bound.
fn bound_window<H>(pool: &ElementPool<H>) -> Option<Window> {
    let mut bound = pool.rows.iter().filter_map(RowSlot::bound);
    let first = bound.next()?;
    let (start, end) = bound.fold((first, first), |(lo, hi), row| (lo.min(row), hi.max(row)));
    Some(Window::new(start, end))
}

fn publish_extent<Sf: RenderSurface>(surface: &mut Sf, layout: &LayoutContext<'_>) {
    surface.set_extent(layout.total_width(), layout.total_height());
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
    use crate::render::headless::HeadlessSurface;

    fn setup(rows: u32) -> (HeadlessSurface, ElementPool<crate::render::HeadlessHandle>, GridModel, Renderer) {
        let config = GridConfig {
            row_count: rows,
            column_count: 3,
            seed_coordinates: true,
            ..GridConfig::default()
        };
        let mut surface = HeadlessSurface::new();
        let pool = ElementPool::build(&mut surface, config.pool_size(), 3).unwrap();
        (surface, pool, GridModel::new(&config), Renderer::new(&config))
    }

    #[test]
    fn window_binds_consecutive_slots() {
        let (mut surface, mut pool, model, renderer) = setup(100);
        let stats = renderer.render_window(&mut surface, &mut pool, &model, Window::new(5, 9));
        assert_eq!(stats, RenderStats { bound: 5, skipped: 0 });
        assert_eq!(pool.bindings(), vec![5, 6, 7, 8, 9]);

        let slot = pool.row_slot(0).unwrap();
        assert_eq!(slot.body().offset, (63.0, 28.0 + 5.0 * 28.0));
        assert_eq!(slot.header().content, "6");
        assert_eq!(slot.cell(2).unwrap().content, "5, 2");
        assert_eq!(slot.cell(2).unwrap().offset, (184.0, 0.0));
        assert!(!pool.row_slot(5).unwrap().body().visible);
    }

    #[test]
    fn sentinels_bracket_window() {
        let (mut surface, mut pool, model, renderer) = setup(100);
        renderer.render_window(&mut surface, &mut pool, &model, Window::new(10, 20));
        assert_eq!(pool.top_sentinel().offset.1, 280.0 - 10.0);
        assert_eq!(pool.bottom_sentinel().offset.1, 21.0 * 28.0 + 56.0);
        assert_eq!(surface.extent(), (63.0 + 3.0 * 92.0, 100.0 * 28.0 + 56.0));
    }

    #[test]
    fn last_row_has_no_anchor() {
        let (mut surface, mut pool, model, renderer) = setup(10);
        renderer.render_window(&mut surface, &mut pool, &model, Window::new(0, 9));
        assert!(pool.row_slot(8).unwrap().anchor().visible);
        assert!(!pool.row_slot(9).unwrap().anchor().visible);
    }

    #[test]
    fn oversized_window_skips_rows_past_capacity() {
        let (mut surface, mut pool, model, renderer) = setup(200);
        let capacity = u32::try_from(pool.capacity()).unwrap();
        let stats = renderer.render_window(&mut surface, &mut pool, &model, Window::new(0, capacity + 4));
        assert_eq!(stats.bound, capacity);
        assert_eq!(stats.skipped, 5);
    }

    #[test]
    fn suppressed_anchors_stay_hidden_until_restored() {
        let (mut surface, mut pool, model, mut renderer) = setup(50);
        renderer.render_window(&mut surface, &mut pool, &model, Window::new(0, 20));
        renderer.suppress_anchors(&mut pool, Axis::Column, 1);
        assert!(pool.column_slot(1).unwrap().anchor().visible);
        assert!(!pool.column_slot(0).unwrap().anchor().visible);

        renderer.rerender_columns_from(&mut surface, &mut pool, &model, 0);
        assert!(!pool.column_slot(2).unwrap().anchor().visible);
        assert!(pool.column_slot(1).unwrap().anchor().visible);

        renderer.restore_anchors(&mut pool, &model, Axis::Column);
        assert!(pool.column_slot(0).unwrap().anchor().visible);
        assert_eq!(renderer.anchors_suppressed(), None);
    }
}
