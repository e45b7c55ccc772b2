//! Property-based invariant tests for windowing, binding and structural edits.
//!
//! Verifies:
//! 1. The start row contains the scroll offset
//! 2. Windows stay inside the table and inside the pool
//! 3. Every render binds exactly the window, once per row, in slot order
//! 4. Insert followed by remove at the same index restores the grid
//! 5. Removal never drops below the minimum counts
//! 6. A column resize shifts every later column by the size delta
//! 7. A row resize clamps to the minimum and shifts every later bound row

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

mod common;

use common::{grid, row_offset, seeded_config};
use proptest::prelude::*;
use vgrid::layout::start_index_at;
use vgrid::{Axis, GridModel, SizeTable, WindowCalculator};

// ── Strategy helpers ──────────────────────────────────────────────────

/// Whole-pixel sizes keep every prefix sum exact.
fn arb_sizes() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(1u16..=120, 1..300)
}

fn table_from(sizes: &[u16]) -> SizeTable {
    let count = u32::try_from(sizes.len()).unwrap();
    let mut table = SizeTable::new(count, 28.0);
    for (i, &size) in (0u32..).zip(sizes) {
        table.set(i, f32::from(size));
    }
    table
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn start_row_contains_the_offset(sizes in arb_sizes(), fraction in 0.0f64..1.0) {
        let table = table_from(&sizes);
        let scroll = (f64::from(table.total()) * fraction).floor() as f32;
        let start = start_index_at(&table, scroll);
        prop_assert!(table.offset_of(start) <= scroll);
        prop_assert!(scroll < table.offset_of(start) + table.get(start));
    }

    #[test]
    fn window_stays_in_bounds(
        sizes in arb_sizes(),
        fraction in 0.0f64..1.0,
        viewport in 50u16..1200,
        buffer in 0u32..20,
    ) {
        let table = table_from(&sizes);
        let scroll = (f64::from(table.total()) * fraction).floor() as f32;
        let calc = WindowCalculator::new(buffer, 42);
        let window = calc.compute(&table, scroll, f32::from(viewport)).unwrap();

        prop_assert!(window.start <= window.end);
        prop_assert!(window.end < table.len());
        prop_assert!(window.len() <= 42);
        prop_assert!(window.start <= start_index_at(&table, scroll));
    }

    #[test]
    fn renders_bind_exactly_the_window(
        rows in 2u32..400,
        scrolls in prop::collection::vec(0u32..20_000, 1..8),
    ) {
        let mut engine = grid(seeded_config(rows, 3));
        for y in scrolls {
            engine.set_scroll(0.0, y as f32);
            let window = engine.window().unwrap();
            let expected: Vec<u32> = window.iter().collect();
            prop_assert_eq!(engine.pool().bindings(), expected);
            for row in window.iter() {
                let slot = engine.pool().slot_of_row(row).unwrap();
                prop_assert_eq!(
                    engine.pool().row_slot(slot).unwrap().cell(0).unwrap().content.clone(),
                    format!("{row}, 0")
                );
            }
        }
    }

    #[test]
    fn insert_then_remove_round_trips(rows in 2u32..40, columns in 2u32..6, at in 0u32..40) {
        let config = seeded_config(rows, columns);
        let original = GridModel::new(&config);
        let mut model = GridModel::new(&config);
        let at = at % rows;

        model.insert_row(at);
        prop_assert_eq!(model.row_count(), rows + 1);
        prop_assert!(model.remove_row(at));
        model.insert_column(at % columns);
        prop_assert!(model.remove_column(at % columns));

        prop_assert_eq!(model.row_count(), rows);
        prop_assert_eq!(model.column_count(), columns);
        for row in 0..rows {
            for col in 0..columns {
                prop_assert_eq!(model.display_text(row, col), original.display_text(row, col));
            }
        }
    }

    #[test]
    fn counts_never_drop_below_minimum(removals in prop::collection::vec(0u32..10, 0..20)) {
        let mut model = GridModel::new(&seeded_config(6, 6));
        for at in removals {
            model.remove_row(at);
            model.remove_column(at);
        }
        prop_assert!(model.row_count() >= 2);
        prop_assert!(model.column_count() >= 2);
    }

    #[test]
    fn column_resize_shifts_later_columns(col in 0u32..8, size in 10u16..300) {
        let mut engine = grid(seeded_config(20, 8));
        let before: Vec<f32> = (0..8).map(|c| engine.layout().col_left(c)).collect();

        let commit = engine.drag_anchor_to(Axis::Column, col, f32::from(size)).unwrap();
        prop_assert!(commit.size >= 10.0);
        for c in 0..8u32 {
            let after = engine.layout().col_left(c);
            let expected = if c > col {
                before[c as usize] + commit.delta()
            } else {
                before[c as usize]
            };
            prop_assert!((after - expected).abs() < 1e-3, "column {c}: {after} != {expected}");
        }
    }

    #[test]
    fn row_resize_shifts_later_rows(row in 0u32..16, size in 1u16..200) {
        let mut engine = grid(seeded_config(40, 3));
        let before: Vec<f32> = (0..40).map(|r| engine.layout().row_y(r)).collect();

        let commit = engine.drag_anchor_to(Axis::Row, row, f32::from(size)).unwrap();
        prop_assert_eq!(commit.index, row);
        prop_assert!(commit.size >= 10.0);
        prop_assert!(commit.size <= f32::from(size).max(10.0) + 1e-3);
        if size <= 10 {
            prop_assert!((commit.size - 10.0).abs() < 1e-3);
        }

        for r in engine.pool().bindings() {
            let expected = if r > row {
                before[r as usize] + commit.delta()
            } else {
                before[r as usize]
            };
            let after = row_offset(&engine, r);
            prop_assert!((after - expected).abs() < 1e-3, "row {r}: {after} != {expected}");
        }
    }
}
