//! Logical grid model: row/column index spaces, their sizes and cell content.
//!
//! Indices are dense over `[0, count)`. Inserting at `k` shifts every row (or
//! column) at or after `k` up by one, together with its size and content;
//! removing `k` shifts the ones after it down. Counts never drop below the
//! configured minimum.

mod store;

pub use store::{CellStore, SparseCellStore};

use std::collections::BTreeSet;

use crate::cell_ref::column_title;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::layout::SizeTable;
use crate::types::{Axis, Cell, CellCoord, CellType};

/// Shown for in-range cells with no stored entry.
static BLANK: Cell = Cell {
    formula: String::new(),
    calculated_value: None,
    cell_type: CellType::String,
    formatting: BTreeSet::new(),
};

/// Row and column sizes plus the cell store.
#[derive(Debug, Clone)]
pub struct GridModel<S: CellStore = SparseCellStore> {
    rows: SizeTable,
    columns: SizeTable,
    store: S,
    min_rows: u32,
    min_columns: u32,
}

impl GridModel<SparseCellStore> {
    /// Build a model sized from `config`. With `seed_coordinates` every cell
    /// holds its `"row, col"` coordinates.
    pub fn new(config: &GridConfig) -> Self {
        let mut model = Self::with_store(config, SparseCellStore::new());
        if config.seed_coordinates {
            model.seed_coordinates();
        }
        model
    }
}

impl<S: CellStore> GridModel<S> {
    /// Build a model over an existing store. Entries outside the configured
    /// counts are dropped.
    pub fn with_store(config: &GridConfig, mut store: S) -> Self {
        let (row_count, column_count) = (config.row_count, config.column_count);
        store.remap(&mut |coord| {
            (coord.row < row_count && coord.col < column_count).then_some(coord)
        });
        Self {
            rows: SizeTable::new(row_count, config.default_row_height),
            columns: SizeTable::new(column_count, config.default_column_width),
            store,
            min_rows: config.min_rows,
            min_columns: config.min_columns,
        }
    }

    fn seed_coordinates(&mut self) {
        for row in 0..self.row_count() {
            for col in 0..self.column_count() {
                self.store.set(row, col, Cell::text(format!("{row}, {col}")));
            }
        }
    }

    pub fn row_count(&self) -> u32 {
        self.rows.len()
    }

    pub fn column_count(&self) -> u32 {
        self.columns.len()
    }

    /// Row heights.
    pub fn rows(&self) -> &SizeTable {
        &self.rows
    }

    /// Column widths.
    pub fn columns(&self) -> &SizeTable {
        &self.columns
    }

    /// Sizes along `axis`.
    pub fn sizes(&self, axis: Axis) -> &SizeTable {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.row_count() && col < self.column_count()
    }

    /// Cell at `(row, col)`. Every in-range coordinate has a cell (blank when
    /// nothing is stored); out-of-range coordinates have none.
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        if !self.contains(row, col) {
            return None;
        }
        Some(self.store.get(row, col).unwrap_or(&BLANK))
    }

    /// Display text at `(row, col)`, empty when blank or out of range.
    pub fn display_text(&self, row: u32, col: u32) -> &str {
        self.cell(row, col).map_or("", Cell::display_text)
    }

    /// Replace the cell at `(row, col)`.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) -> Result<()> {
        if !self.contains(row, col) {
            return Err(GridError::CellOutOfRange { row, col });
        }
        if cell.is_blank() && cell.formatting.is_empty() {
            self.store.delete(row, col);
        } else {
            self.store.set(row, col, cell);
        }
        Ok(())
    }

    /// Apply a typed-in value to a cell.
    ///
    /// Detects the value type automatically:
    /// - Empty string → clears the cell
    /// - Parseable as f64 → Number
    /// - `YYYY-MM-DD` → Date
    /// - Otherwise → String
    ///
    /// Editing replaces any formula. Returns the detected type.
    pub fn set_cell_value(&mut self, row: u32, col: u32, value: &str) -> Result<CellType> {
        if !self.contains(row, col) {
            return Err(GridError::CellOutOfRange { row, col });
        }
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.store.delete(row, col);
            return Ok(CellType::String);
        }

        let cell_type = detect_cell_type(trimmed);
        let formatting = self
            .store
            .get(row, col)
            .map(|cell| cell.formatting.clone())
            .unwrap_or_default();
        self.store.set(
            row,
            col,
            Cell {
                formula: String::new(),
                calculated_value: Some(trimmed.to_string()),
                cell_type,
                formatting,
            },
        );
        Ok(cell_type)
    }

    /// Header title of `col`, derived from its position.
    pub fn column_title(&self, col: u32) -> Option<String> {
        (col < self.column_count()).then(|| column_title(col))
    }

    /// Resize a row. Returns the previous height, or `None` when out of range.
    pub fn set_row_height(&mut self, row: u32, height: f32) -> Option<f32> {
        self.rows.set(row, height)
    }

    /// Resize a column. Returns the previous width, or `None` when out of range.
    pub fn set_column_width(&mut self, col: u32, width: f32) -> Option<f32> {
        self.columns.set(col, width)
    }

    pub fn can_remove_row(&self) -> bool {
        self.row_count() > self.min_rows
    }

    pub fn can_remove_column(&self) -> bool {
        self.column_count() > self.min_columns
    }

    /// Insert an empty default-height row at `at` (clamped to the row count).
    /// Returns the index the row landed at.
    pub fn insert_row(&mut self, at: u32) -> u32 {
        let at = at.min(self.row_count());
        self.rows.insert_at(at);
        self.store.remap(&mut |coord| {
            Some(if coord.row >= at {
                CellCoord::new(coord.row + 1, coord.col)
            } else {
                coord
            })
        });
        at
    }

    /// Remove the row at `at`. Returns `false` (and changes nothing) when
    /// `at` is out of range or the row count is already at its minimum.
    pub fn remove_row(&mut self, at: u32) -> bool {
        if at >= self.row_count() || !self.can_remove_row() {
            return false;
        }
        self.rows.remove_at(at);
        self.store.remap(&mut |coord| match coord.row {
            r if r == at => None,
            r if r > at => Some(CellCoord::new(r - 1, coord.col)),
            _ => Some(coord),
        });
        true
    }

    /// Insert an empty default-width column at `at` (clamped to the column
    /// count). Titles of it and every later column follow their new position.
    pub fn insert_column(&mut self, at: u32) -> u32 {
        let at = at.min(self.column_count());
        self.columns.insert_at(at);
        self.store.remap(&mut |coord| {
            Some(if coord.col >= at {
                CellCoord::new(coord.row, coord.col + 1)
            } else {
                coord
            })
        });
        at
    }

    /// Remove the column at `at`. Same rules as [`GridModel::remove_row`].
    pub fn remove_column(&mut self, at: u32) -> bool {
        if at >= self.column_count() || !self.can_remove_column() {
            return false;
        }
        self.columns.remove_at(at);
        self.store.remap(&mut |coord| match coord.col {
            c if c == at => None,
            c if c > at => Some(CellCoord::new(coord.row, c - 1)),
            _ => Some(coord),
        });
        true
    }
}

/// Detect the cell type of a trimmed, non-empty value.
fn detect_cell_type(value: &str) -> CellType {
    if value.parse::<f64>().is_ok() {
        return CellType::Number;
    }
    if is_iso_date(value) {
        return CellType::Date;
    }
    CellType::String
}

fn is_iso_date(value: &str) -> bool {
    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12)) && matches!(day.parse::<u8>(), Ok(1..=31))
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

    fn small(rows: u32, columns: u32) -> GridModel {
        GridModel::new(&GridConfig {
            row_count: rows,
            column_count: columns,
            seed_coordinates: true,
            ..GridConfig::default()
        })
    }

    #[test]
    fn in_range_cells_always_exist() {
        let model = GridModel::new(&GridConfig {
            row_count: 4,
            column_count: 3,
            ..GridConfig::default()
        });
        assert!(model.cell(3, 2).unwrap().is_blank());
        assert!(model.cell(4, 0).is_none());
        assert!(model.cell(0, 3).is_none());
    }

    #[test]
    fn insert_row_shifts_content_and_sizes_down() {
        let mut model = small(10, 3);
        model.set_row_height(5, 40.0);
        let at = model.insert_row(5);
        assert_eq!(at, 5);
        assert_eq!(model.row_count(), 11);
        assert!(model.cell(5, 0).unwrap().is_blank());
        assert_eq!(model.display_text(6, 0), "5, 0");
        assert_eq!(model.display_text(4, 2), "4, 2");
        assert_eq!(model.rows().get(5), 28.0);
        assert_eq!(model.rows().get(6), 40.0);
    }

    #[test]
    fn remove_row_shifts_content_up() {
        let mut model = small(10, 3);
        assert!(model.remove_row(2));
        assert_eq!(model.row_count(), 9);
        assert_eq!(model.display_text(2, 1), "3, 1");
        assert_eq!(model.display_text(8, 1), "9, 1");
        assert!(model.cell(9, 1).is_none());
        assert!(model.store().get(9, 1).is_none());
    }

    #[test]
    fn removal_stops_at_minimum() {
        let mut model = small(2, 2);
        assert!(!model.remove_row(0));
        assert!(!model.remove_column(1));
        assert_eq!((model.row_count(), model.column_count()), (2, 2));
    }

    #[test]
    fn columns_shift_and_titles_follow_position() {
        let mut model = small(3, 3);
        model.set_column_width(1, 140.0);
        model.insert_column(1);
        assert_eq!(model.column_count(), 4);
        assert_eq!(model.column_title(1).as_deref(), Some("B"));
        assert_eq!(model.column_title(3).as_deref(), Some("D"));
        assert_eq!(model.column_title(4), None);
        assert_eq!(model.display_text(0, 2), "0, 1");
        assert_eq!(model.columns().get(2), 140.0);

        assert!(model.remove_column(1));
        assert_eq!(model.display_text(0, 1), "0, 1");
        assert_eq!(model.columns().get(1), 140.0);
    }

    #[test]
    fn set_cell_value_detects_types() {
        let mut model = small(3, 3);
        assert_eq!(model.set_cell_value(0, 0, " 42.5 ").unwrap(), CellType::Number);
        assert_eq!(model.display_text(0, 0), "42.5");
        assert_eq!(model.set_cell_value(0, 1, "2024-02-29").unwrap(), CellType::Date);
        assert_eq!(model.set_cell_value(0, 2, "hello").unwrap(), CellType::String);
        model.set_cell_value(1, 1, "").unwrap();
        assert!(model.cell(1, 1).unwrap().is_blank());
        assert!(matches!(
            model.set_cell_value(3, 0, "x"),
            Err(GridError::CellOutOfRange { row: 3, col: 0 })
        ));
    }

    #[test]
    fn with_store_drops_out_of_range_entries() {
        let mut store = SparseCellStore::new();
        store.set(0, 0, Cell::text("kept"));
        store.set(50, 0, Cell::text("dropped"));
        let model = GridModel::with_store(
            &GridConfig {
                row_count: 10,
                column_count: 2,
                ..GridConfig::default()
            },
            store,
        );
        assert_eq!(model.store().len(), 1);
        assert_eq!(model.display_text(0, 0), "kept");
    }
}
