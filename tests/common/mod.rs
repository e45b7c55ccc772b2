//! Shared helpers for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use vgrid::render::{HeadlessHandle, HeadlessSurface};
use vgrid::{GridConfig, GridEngine};

pub type TestGrid = GridEngine<HeadlessSurface>;

/// Default geometry with `"r, c"` text in every cell.
pub fn seeded_config(rows: u32, columns: u32) -> GridConfig {
    GridConfig {
        row_count: rows,
        column_count: columns,
        seed_coordinates: true,
        ..GridConfig::default()
    }
}

pub fn grid(config: GridConfig) -> TestGrid {
    GridEngine::new(config, HeadlessSurface::new()).expect("grid should build")
}

pub fn seeded_grid(rows: u32, columns: u32) -> TestGrid {
    grid(seeded_config(rows, columns))
}

/// Cell element showing `(row, col)`, if the row is materialized.
pub fn cell_handle(engine: &TestGrid, row: u32, col: u32) -> Option<&HeadlessHandle> {
    let slot = engine.pool().slot_of_row(row)?;
    engine.pool().row_slot(slot)?.cell(col)
}

/// Text the cell element for `(row, col)` currently shows.
pub fn shown_text(engine: &TestGrid, row: u32, col: u32) -> String {
    cell_handle(engine, row, col)
        .map(|cell| cell.content.clone())
        .expect("row should be materialized")
}

/// Vertical offset of the row body bound to `row`.
pub fn row_offset(engine: &TestGrid, row: u32) -> f32 {
    let slot = engine.pool().slot_of_row(row).expect("row bound");
    engine.pool().row_slot(slot).unwrap().body().offset.1
}

/// Left edge of column `col`'s header.
pub fn column_header_left(engine: &TestGrid, col: u32) -> f32 {
    engine.pool().column_slot(col).unwrap().header().offset.0
}

/// Number of row bodies currently visible.
pub fn visible_rows(engine: &TestGrid) -> usize {
    engine
        .pool()
        .row_slots()
        .filter(|slot| slot.body().visible)
        .count()
}
