//! Absolute geometry derived from the size tables.
//!
//! Every offset the renderer and the resize controllers need is computed here
//! from the current [`SizeTable`]s. There is no running total patched from
//! several call sites; callers build a fresh [`LayoutContext`] when they need
//! positions.

use super::SizeTable;
use crate::config::GridConfig;

/// Fixed chrome dimensions around the cell area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Horizontal gap after every column
    pub cell_padding: f32,
    /// Width of the row header strip
    pub row_header_width: f32,
    /// Height of the column header strip
    pub header_height: f32,
}

impl GridMetrics {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            cell_padding: config.cell_padding,
            row_header_width: config.row_header_width,
            header_height: config.header_height,
        }
    }
}

/// Read-only view over both axes plus the chrome metrics.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    rows: &'a SizeTable,
    columns: &'a SizeTable,
    metrics: GridMetrics,
}

impl<'a> LayoutContext<'a> {
    pub fn new(rows: &'a SizeTable, columns: &'a SizeTable, metrics: GridMetrics) -> Self {
        Self {
            rows,
            columns,
            metrics,
        }
    }

    pub fn rows(&self) -> &'a SizeTable {
        self.rows
    }

    pub fn columns(&self) -> &'a SizeTable {
        self.columns
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Top of `row` inside the content area (no header).
    pub fn row_top(&self, row: u32) -> f32 {
        self.rows.offset_of(row)
    }

    /// Top of `row` in table coordinates (below the column header strip).
    pub fn row_y(&self, row: u32) -> f32 {
        self.metrics.header_height + self.rows.offset_of(row)
    }

    /// Bottom edge of `row` in table coordinates, where its anchor sits.
    pub fn row_bottom(&self, row: u32) -> f32 {
        self.row_y(row) + self.rows.get(row)
    }

    /// Left of `col` in table coordinates (right of the row header strip).
    #[allow(clippy::cast_precision_loss)]
    pub fn col_left(&self, col: u32) -> f32 {
        let padding = self.metrics.cell_padding * col.min(self.columns.len()) as f32;
        self.metrics.row_header_width + self.columns.offset_of(col) + padding
    }

    /// Right edge of `col` (before its padding), where its anchor sits.
    pub fn col_right(&self, col: u32) -> f32 {
        self.col_left(col) + self.columns.get(col)
    }

    /// Left of `col` relative to the row element that holds its cell.
    pub fn cell_x(&self, col: u32) -> f32 {
        self.col_left(col) - self.metrics.row_header_width
    }

    /// Full table width: row headers plus every column and its padding.
    pub fn total_width(&self) -> f32 {
        self.col_left(self.columns.len())
    }

    /// Width of a row element (all cells, no row header).
    pub fn row_width(&self) -> f32 {
        self.total_width() - self.metrics.row_header_width
    }

    /// Full table height: all rows plus the header strip above and below.
    pub fn total_height(&self) -> f32 {
        self.rows.total() + self.metrics.header_height * 2.0
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

    fn metrics() -> GridMetrics {
        GridMetrics {
            cell_padding: 12.0,
            row_header_width: 63.0,
            header_height: 28.0,
        }
    }

    #[test]
    fn column_edges_include_padding_and_header() {
        let rows = SizeTable::new(10, 28.0);
        let columns = SizeTable::new(3, 80.0);
        let layout = LayoutContext::new(&rows, &columns, metrics());

        assert_eq!(layout.col_left(0), 63.0);
        assert_eq!(layout.col_left(1), 63.0 + 92.0);
        assert_eq!(layout.col_right(1), 63.0 + 92.0 + 80.0);
        assert_eq!(layout.cell_x(2), 184.0);
        assert_eq!(layout.total_width(), 63.0 + 3.0 * 92.0);
        assert_eq!(layout.row_width(), 276.0);
    }

    #[test]
    fn row_edges_sit_below_header() {
        let mut rows = SizeTable::new(10, 28.0);
        rows.set(1, 50.0);
        let columns = SizeTable::new(3, 80.0);
        let layout = LayoutContext::new(&rows, &columns, metrics());

        assert_eq!(layout.row_y(0), 28.0);
        assert_eq!(layout.row_y(2), 28.0 + 78.0);
        assert_eq!(layout.row_bottom(1), 28.0 + 78.0);
        assert_eq!(layout.total_height(), 9.0 * 28.0 + 50.0 + 56.0);
    }
}
