//! Scroll offset to materialized row window.
//!
//! The window is the inclusive range of logical rows that get a pool slot:
//! the rows under the viewport plus `buffer` rows beyond each edge. Row
//! heights vary, so the visible count is the larger of an average-height
//! estimate and an exact walk from the scroll position. When the pool
//! cannot hold all of that, leading buffer rows are dropped first.

use std::ops::RangeInclusive;

use serde::Serialize;

use super::SizeTable;

/// Inclusive range `[start, end]` of materialized logical rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: u32,
    pub end: u32,
}

impl Window {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of rows in the window.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Always false; a window holds at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: u32) -> bool {
        (self.start..=self.end).contains(&index)
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// The row under `scroll_offset`: the `i` with
/// `offset_of(i) <= scroll_offset < offset_of(i + 1)`, clamped to the last row.
pub fn start_index_at(sizes: &SizeTable, scroll_offset: f32) -> u32 {
    sizes.index_at(scroll_offset.max(0.0))
}

/// Computes windows for one axis with a fixed buffer and pool capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCalculator {
    buffer: u32,
    capacity: u32,
}

impl WindowCalculator {
    /// `capacity` is the number of pool slots available; windows never exceed it.
    pub fn new(buffer: u32, capacity: usize) -> Self {
        Self {
            buffer,
            capacity: u32::try_from(capacity).unwrap_or(u32::MAX).max(1),
        }
    }

    pub fn buffer(&self) -> u32 {
        self.buffer
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Rows needed to fill `viewport_extent` from `scroll_offset`.
    ///
    /// `ceil(viewport / average)` can undershoot when the rows under the
    /// viewport are shorter than average, so an exact walk (bounded by the
    /// pool capacity) is taken too and the larger count wins.
    pub fn visible_count(&self, sizes: &SizeTable, scroll_offset: f32, viewport_extent: f32) -> u32 {
        if sizes.is_empty() {
            return 0;
        }
        let estimate = ceil_count(viewport_extent / sizes.average());

        let first = start_index_at(sizes, scroll_offset);
        let target = scroll_offset.max(0.0) + viewport_extent;
        let mut edge = sizes.offset_of(first);
        let mut index = first;
        let mut exact = 0u32;
        while edge < target && index < sizes.len() && exact < self.capacity {
            edge += sizes.get(index);
            index += 1;
            exact += 1;
        }

        estimate.max(exact).max(1)
    }

    /// Window to materialize for the given scroll position, or `None` when
    /// the axis has no rows.
    pub fn compute(
        &self,
        sizes: &SizeTable,
        scroll_offset: f32,
        viewport_extent: f32,
    ) -> Option<Window> {
        if sizes.is_empty() {
            return None;
        }
        let last = sizes.len() - 1;
        let first_visible = start_index_at(sizes, scroll_offset);
        let visible = self.visible_count(sizes, scroll_offset, viewport_extent);

        let mut start = first_visible.saturating_sub(self.buffer).min(last);
        let end = start
            .saturating_add(visible)
            .saturating_add(self.buffer)
            .min(last);

        // Over capacity: give up leading buffer rows before visible ones.
        if end - start >= self.capacity {
            start = start.max(end + 1 - self.capacity).min(first_visible);
        }
        let end = end.min(start.saturating_add(self.capacity - 1));

        Some(Window::new(start, end))
    }

    /// Whether a scroll to `scroll_offset` leaves the rendered window unable
    /// to cover the viewport.
    ///
    /// True when the row under the offset is before the window start, or
    /// when the viewport would reach past the window end while rows remain
    /// beyond it. Recomputing when this returns false is still correct.
    pub fn needs_recompute(
        &self,
        current: Option<Window>,
        sizes: &SizeTable,
        scroll_offset: f32,
        viewport_extent: f32,
    ) -> bool {
        let Some(window) = current else {
            return !sizes.is_empty();
        };
        if sizes.is_empty() {
            return true;
        }
        let last = sizes.len() - 1;
        if window.end > last {
            return true;
        }
        let first_visible = start_index_at(sizes, scroll_offset);
        if first_visible < window.start {
            return true;
        }
        let visible = self.visible_count(sizes, scroll_offset, viewport_extent);
        window.end < last && first_visible.saturating_add(visible) > window.end + 1
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_count(value: f32) -> u32 {
    let value = value.ceil();
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f32) as u32
    } else {
        0
    }
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

    fn uniform() -> (SizeTable, WindowCalculator) {
        (SizeTable::new(10_000, 28.0), WindowCalculator::new(10, 42))
    }

    #[test]
    fn initial_window_reaches_row_32() {
        let (rows, calc) = uniform();
        assert_eq!(calc.visible_count(&rows, 0.0, 600.0), 22);
        assert_eq!(calc.compute(&rows, 0.0, 600.0), Some(Window::new(0, 32)));
    }

    #[test]
    fn small_scroll_inside_buffer_keeps_window() {
        let (rows, calc) = uniform();
        let window = calc.compute(&rows, 0.0, 600.0);
        assert!(!calc.needs_recompute(window, &rows, 280.0, 600.0));
        assert_eq!(calc.compute(&rows, 280.0, 600.0).unwrap().start, 0);
    }

    #[test]
    fn deep_scroll_moves_window() {
        let (rows, calc) = uniform();
        let window = calc.compute(&rows, 0.0, 600.0);
        assert!(calc.needs_recompute(window, &rows, 2800.0, 600.0));
        assert_eq!(calc.compute(&rows, 2800.0, 600.0), Some(Window::new(90, 122)));
    }

    #[test]
    fn scrolling_above_window_start_triggers() {
        let (rows, calc) = uniform();
        let window = calc.compute(&rows, 2800.0, 600.0);
        assert!(!calc.needs_recompute(window, &rows, 2520.0, 600.0));
        assert!(calc.needs_recompute(window, &rows, 2519.0, 600.0));
    }

    #[test]
    fn tail_window_clamps_to_last_row() {
        let rows = SizeTable::new(50, 28.0);
        let calc = WindowCalculator::new(10, 42);
        let window = calc.compute(&rows, 50.0 * 28.0, 600.0).unwrap();
        assert_eq!(window.end, 49);
        assert!(!calc.needs_recompute(Some(window), &rows, 49.0 * 28.0, 600.0));
    }

    #[test]
    fn short_rows_under_viewport_grow_visible_count() {
        // Average is pulled up by one huge row; the rows actually on screen are tiny.
        let mut rows = SizeTable::new(100, 10.0);
        rows.set(99, 10_000.0);
        let calc = WindowCalculator::new(0, 200);
        let estimate = (600.0 / rows.average()).ceil();
        assert!(estimate < 60.0);
        assert_eq!(calc.visible_count(&rows, 0.0, 600.0), 60);
    }

    #[test]
    fn window_never_exceeds_capacity() {
        let rows = SizeTable::new(1_000, 1.0);
        let calc = WindowCalculator::new(10, 42);
        let window = calc.compute(&rows, 500.0, 600.0).unwrap();
        assert_eq!(window.len(), 42);
    }

    #[test]
    fn tight_pool_drops_leading_buffer_first() {
        // 10px rows: 35 visible + 2 × 10 buffer is more than 42 slots.
        let rows = SizeTable::new(1_000, 10.0);
        let calc = WindowCalculator::new(10, 42);
        let window = calc.compute(&rows, 1_000.0, 350.0).unwrap();
        assert_eq!(window, Window::new(94, 135));
        assert!((100..135).all(|row| window.contains(row)));
    }

    #[test]
    fn visible_rows_keep_slots_when_pool_cannot_hold_them_all() {
        let mut rows = SizeTable::new(10_000, 28.0);
        for i in 0..1_000 {
            rows.set(i, 10.0);
        }
        let calc = WindowCalculator::new(10, 42);
        let window = calc.compute(&rows, 1_000.0, 600.0).unwrap();
        assert_eq!(window.start, start_index_at(&rows, 1_000.0));
        assert_eq!(window.len(), 42);
    }

    #[test]
    fn empty_axis_has_no_window() {
        let rows = SizeTable::new(0, 28.0);
        let calc = WindowCalculator::new(10, 42);
        assert_eq!(calc.compute(&rows, 0.0, 600.0), None);
        assert!(!calc.needs_recompute(None, &rows, 0.0, 600.0));
    }
}
