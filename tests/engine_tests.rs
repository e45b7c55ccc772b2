//! Engine tests over the headless backend
//!
//! Covers window rendering, the scroll gate, selection, structural commands,
//! anchor-drag resizing and teardown.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use vgrid::{ActionState, Axis, CellCoord, CellType, GridConfig, GridError, InsertPosition, Window};

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn initial_render_binds_rows_0_to_32() {
    let engine = seeded_grid(10_000, 26);
    assert_eq!(engine.window(), Some(Window::new(0, 32)));
    assert_eq!(engine.pool().capacity(), 42);
    assert_eq!(engine.pool().bindings(), (0..=32).collect::<Vec<_>>());
    assert_eq!(visible_rows(&engine), 33);
}

#[test]
fn rows_sit_below_the_header_strip() {
    let engine = seeded_grid(10_000, 26);
    assert_eq!(row_offset(&engine, 0), 28.0);
    assert_eq!(row_offset(&engine, 10), 28.0 + 280.0);

    let slot = engine.pool().slot_of_row(10).unwrap();
    let row = engine.pool().row_slot(slot).unwrap();
    assert_eq!(row.header().content, "11");
    assert_eq!(row.body().offset.0, 63.0);
}

#[test]
fn cells_show_seeded_coordinates() {
    let engine = seeded_grid(10_000, 26);
    assert_eq!(shown_text(&engine, 0, 0), "0, 0");
    assert_eq!(shown_text(&engine, 32, 25), "32, 25");
}

#[test]
fn column_headers_carry_titles_and_offsets() {
    let engine = seeded_grid(100, 28);
    let titles: Vec<_> = (0..28)
        .map(|col| engine.pool().column_slot(col).unwrap().header().content.clone())
        .collect();
    assert_eq!(titles[0], "A");
    assert_eq!(titles[25], "Z");
    assert_eq!(titles[26], "AA");
    assert_eq!(titles[27], "AB");

    // Row header strip, then 80px columns with 12px padding after each.
    assert_eq!(column_header_left(&engine, 0), 63.0);
    assert_eq!(column_header_left(&engine, 1), 155.0);
    assert_eq!(column_header_left(&engine, 3), 339.0);
}

#[test]
fn extent_covers_every_row_and_column() {
    let engine = seeded_grid(10_000, 26);
    let (width, height) = engine.surface().extent();
    assert_eq!(width, 63.0 + 26.0 * 92.0);
    assert_eq!(height, 280_000.0 + 56.0);
}

#[test]
fn sentinels_bracket_the_window() {
    let mut engine = seeded_grid(10_000, 26);
    assert_eq!(engine.pool().top_sentinel().offset.1, 0.0);
    assert_eq!(engine.pool().bottom_sentinel().offset.1, 33.0 * 28.0 + 56.0);

    engine.set_scroll(0.0, 2800.0);
    assert_eq!(engine.pool().top_sentinel().offset.1, 2520.0 - 10.0);
    assert_eq!(engine.pool().bottom_sentinel().offset.1, 123.0 * 28.0 + 56.0);
}

#[test]
fn last_row_has_no_anchor() {
    let engine = seeded_grid(10, 4);
    let last = engine.pool().slot_of_row(9).unwrap();
    let before = engine.pool().slot_of_row(8).unwrap();
    assert!(!engine.pool().row_slot(last).unwrap().anchor().visible);
    assert!(engine.pool().row_slot(before).unwrap().anchor().visible);
}

#[test]
fn short_grid_leaves_spare_slots_hidden() {
    let engine = seeded_grid(10, 4);
    assert_eq!(engine.window(), Some(Window::new(0, 9)));
    assert_eq!(visible_rows(&engine), 10);
    let spare = engine
        .pool()
        .row_slots()
        .filter(|slot| slot.bound().is_none())
        .count();
    assert_eq!(spare, engine.pool().capacity() - 10);
}

#[test]
fn rerender_is_idempotent() {
    let mut engine = seeded_grid(10_000, 26);
    engine.set_scroll(0.0, 2800.0);
    let first = engine.pool().bindings();
    let offsets: Vec<_> = first.iter().map(|&row| row_offset(&engine, row)).collect();

    engine.on_viewport_changed();
    assert_eq!(engine.pool().bindings(), first);
    let again: Vec<_> = first.iter().map(|&row| row_offset(&engine, row)).collect();
    assert_eq!(again, offsets);
}

// ============================================================================
// Scroll
// ============================================================================

#[test]
fn scroll_inside_buffer_does_not_rerender() {
    let mut engine = seeded_grid(10_000, 26);
    assert!(!engine.set_scroll(0.0, 280.0));
    assert_eq!(engine.window(), Some(Window::new(0, 32)));
}

#[test]
fn deep_scroll_rebinds_the_same_slots() {
    let mut engine = seeded_grid(10_000, 26);
    let created = engine.surface().created();
    assert!(engine.set_scroll(0.0, 2800.0));
    assert_eq!(engine.window(), Some(Window::new(90, 122)));
    assert_eq!(shown_text(&engine, 100, 3), "100, 3");
    assert_eq!(engine.surface().created(), created);
}

#[test]
fn scroll_is_clamped_to_the_table() {
    let mut engine = seeded_grid(100, 4);
    engine.set_scroll(-40.0, 1.0e9);
    let viewport = engine.viewport();
    assert_eq!(viewport.scroll_x, 0.0);
    assert_eq!(viewport.scroll_y, 100.0 * 28.0 + 56.0 - 600.0);
    assert_eq!(engine.window().unwrap().end, 99);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn selecting_highlights_cell_and_headers() {
    let mut engine = seeded_grid(100, 6);
    assert_eq!(engine.select_cell(5, 2), Some(CellCoord::new(5, 2)));

    let slot = engine.pool().slot_of_row(5).unwrap();
    let row = engine.pool().row_slot(slot).unwrap();
    assert!(row.cell(2).unwrap().highlighted);
    assert!(row.header().highlighted);
    assert!(engine.pool().column_slot(2).unwrap().header().highlighted);
}

#[test]
fn selection_is_exclusive() {
    let mut engine = seeded_grid(100, 6);
    engine.select_cell(5, 2);
    engine.select_cell(7, 4);
    assert_eq!(engine.selected(), Some(CellCoord::new(7, 4)));

    let highlighted: usize = engine
        .pool()
        .row_slots()
        .map(|slot| (0..6).filter(|&c| slot.cell(c).unwrap().highlighted).count())
        .sum();
    assert_eq!(highlighted, 1);
    assert!(!engine.pool().column_slot(2).unwrap().header().highlighted);
}

#[test]
fn click_resolves_the_live_binding() {
    let mut engine = seeded_grid(10_000, 6);
    engine.set_scroll(0.0, 2800.0);
    let slot = engine.pool().slot_of_row(100).unwrap();
    assert_eq!(engine.click_cell(slot, 1), Some(CellCoord::new(100, 1)));
}

#[test]
fn click_elsewhere_and_rerender_clear_selection() {
    let mut engine = seeded_grid(10_000, 6);
    engine.select_cell(3, 3);
    engine.click_elsewhere();
    assert_eq!(engine.selected(), None);

    engine.select_cell(3, 3);
    engine.set_scroll(0.0, 2800.0);
    assert_eq!(engine.selected(), None);
}

#[test]
fn unbound_slot_selects_nothing() {
    let mut engine = seeded_grid(10, 4);
    let spare = engine
        .pool()
        .row_slots()
        .find(|slot| slot.bound().is_none())
        .unwrap()
        .slot_id();
    assert_eq!(engine.click_cell(spare, 0), None);
    assert_eq!(engine.select_cell(500, 0), None);
}

// ============================================================================
// Structural commands
// ============================================================================

#[test]
fn insert_row_before_selection_shifts_content() {
    let mut engine = seeded_grid(10, 4);
    engine.select_cell(5, 1);
    assert_eq!(engine.insert_row(InsertPosition::Before), Some(5));

    assert_eq!(engine.model().row_count(), 11);
    assert_eq!(shown_text(&engine, 5, 1), "");
    assert_eq!(shown_text(&engine, 6, 1), "5, 1");
    assert_eq!(shown_text(&engine, 4, 1), "4, 1");
    assert_eq!(engine.pool().bindings(), (0..=10).collect::<Vec<_>>());
    assert_eq!(engine.selected(), None);
}

#[test]
fn insert_row_after_selection() {
    let mut engine = seeded_grid(10, 4);
    engine.select_cell(9, 0);
    assert_eq!(engine.insert_row(InsertPosition::After), Some(10));
    assert_eq!(shown_text(&engine, 9, 0), "9, 0");
    assert_eq!(shown_text(&engine, 10, 0), "");
}

#[test]
fn commands_without_selection_do_nothing() {
    let mut engine = seeded_grid(10, 4);
    assert_eq!(engine.insert_row(InsertPosition::Before), None);
    assert!(!engine.remove_row());
    assert_eq!(engine.insert_column(InsertPosition::After).unwrap(), None);
    assert!(!engine.remove_column());
    assert_eq!(engine.model().row_count(), 10);
    assert_eq!(engine.model().column_count(), 4);
    assert_eq!(engine.action_state(), ActionState::default());
}

#[test]
fn remove_row_shifts_content_up() {
    let mut engine = seeded_grid(10, 4);
    engine.select_cell(3, 0);
    assert!(engine.remove_row());
    assert_eq!(engine.model().row_count(), 9);
    assert_eq!(shown_text(&engine, 3, 2), "4, 2");
    assert_eq!(shown_text(&engine, 2, 2), "2, 2");
    assert!(engine.pool().slot_of_row(9).is_none());
}

#[test]
fn removal_stops_at_the_minimum() {
    let mut engine = seeded_grid(3, 3);
    engine.select_cell(0, 0);
    assert!(engine.remove_row());
    engine.select_cell(0, 0);
    assert_eq!(
        engine.action_state(),
        ActionState {
            can_insert_row: true,
            can_remove_row: false,
            can_insert_column: true,
            can_remove_column: true,
        }
    );
    assert!(!engine.remove_row());
    assert_eq!(engine.model().row_count(), 2);

    assert!(engine.remove_column());
    engine.select_cell(0, 0);
    assert!(!engine.remove_column());
    assert_eq!(engine.model().column_count(), 2);
}

#[test]
fn insert_column_creates_elements_and_retitles() {
    let mut engine = seeded_grid(10, 4);
    let created = engine.surface().created();
    engine.select_cell(2, 1);
    assert_eq!(engine.insert_column(InsertPosition::Before).unwrap(), Some(1));

    assert_eq!(engine.model().column_count(), 5);
    assert_eq!(engine.pool().column_count(), 5);
    // One header, one anchor and one cell per row slot.
    let capacity = engine.pool().capacity();
    assert_eq!(engine.surface().created(), created + 2 + capacity);

    let title = |col| engine.pool().column_slot(col).unwrap().header().content.clone();
    assert_eq!(title(1), "B");
    assert_eq!(title(4), "E");
    assert_eq!(shown_text(&engine, 2, 1), "");
    assert_eq!(shown_text(&engine, 2, 2), "2, 1");
    assert_eq!(column_header_left(&engine, 4), 63.0 + 4.0 * 92.0);
}

#[test]
fn remove_column_discards_elements() {
    let mut engine = seeded_grid(10, 4);
    let live = engine.surface().live();
    engine.select_cell(0, 0);
    assert!(engine.remove_column());
    assert_eq!(engine.pool().column_count(), 3);
    assert_eq!(engine.surface().live(), live - 2 - engine.pool().capacity());
    assert_eq!(shown_text(&engine, 0, 0), "0, 1");
}

#[test]
fn insert_then_remove_restores_content() {
    let mut engine = seeded_grid(10, 4);
    engine.select_cell(5, 0);
    engine.insert_row(InsertPosition::Before);
    engine.select_cell(5, 0);
    engine.remove_row();
    assert_eq!(engine.model().row_count(), 10);
    for row in 0..10 {
        assert_eq!(shown_text(&engine, row, 3), format!("{row}, 3"));
    }
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn column_resize_shifts_later_columns() {
    let mut engine = seeded_grid(100, 6);
    let before: Vec<_> = (0..6).map(|c| column_header_left(&engine, c)).collect();

    let commit = engine.drag_anchor_to(Axis::Column, 2, 140.0).unwrap();
    assert_eq!(commit.previous, 80.0);
    assert_eq!(commit.size, 140.0);
    assert_eq!(engine.model().columns().get(2), 140.0);

    assert_eq!(column_header_left(&engine, 0), before[0]);
    assert_eq!(column_header_left(&engine, 1), before[1]);
    assert_eq!(column_header_left(&engine, 2), before[2]);
    assert_eq!(column_header_left(&engine, 3), before[3] + 60.0);
    assert_eq!(column_header_left(&engine, 5), before[5] + 60.0);

    let cell = cell_handle(&engine, 4, 3).unwrap();
    assert_eq!(cell.offset.0, before[3] + 60.0 - 63.0);
    assert_eq!(cell_handle(&engine, 4, 2).unwrap().size.0, 140.0);
}

#[test]
fn row_resize_shifts_later_rows() {
    let mut engine = seeded_grid(100, 4);
    let row2 = row_offset(&engine, 2);
    let row4 = row_offset(&engine, 4);

    let commit = engine.drag_anchor_to(Axis::Row, 3, 50.0).unwrap();
    assert_eq!(commit.delta(), 22.0);
    assert_eq!(row_offset(&engine, 2), row2);
    assert_eq!(row_offset(&engine, 4), row4 + 22.0);
    assert_eq!(engine.surface().extent().1, 100.0 * 28.0 + 22.0 + 56.0);
}

#[test]
fn resize_is_clamped_to_the_minimum() {
    let mut engine = seeded_grid(100, 4);
    let commit = engine.drag_anchor_to(Axis::Column, 1, 2.0).unwrap();
    assert_eq!(commit.size, 10.0);
    let commit = engine.drag_anchor_to(Axis::Row, 1, -30.0).unwrap();
    assert_eq!(commit.size, 10.0);
}

#[test]
fn other_anchors_hide_during_a_drag() {
    let mut engine = seeded_grid(100, 6);
    engine.anchor_press(Axis::Column, 2);
    assert!(engine.anchor_drag_start(Axis::Column));

    let anchors: Vec<_> = (0..6)
        .map(|c| engine.pool().column_slot(c).unwrap().anchor().visible)
        .collect();
    assert_eq!(anchors, vec![false, false, true, false, false, false]);
    assert!(engine.pool().column_slot(2).unwrap().anchor().highlighted);

    let position = engine.anchor_drag_over(Axis::Column, 387.0).unwrap();
    assert_eq!(position, 387.0);
    assert_eq!(engine.pool().column_slot(2).unwrap().anchor().offset.0, 387.0);

    engine.anchor_drop(Axis::Column).unwrap();
    assert!((0..6).all(|c| engine.pool().column_slot(c).unwrap().anchor().visible));
    assert!(!engine.pool().column_slot(2).unwrap().anchor().highlighted);
}

#[test]
fn drop_without_move_keeps_the_size() {
    let mut engine = seeded_grid(100, 4);
    engine.anchor_press(Axis::Column, 1);
    engine.anchor_drag_start(Axis::Column);
    let commit = engine.anchor_drop(Axis::Column).unwrap();
    assert_eq!(commit.size, 80.0);
    assert_eq!(commit.delta(), 0.0);
}

#[test]
fn release_without_drag_commits_nothing() {
    let mut engine = seeded_grid(100, 4);
    engine.anchor_press(Axis::Row, 0);
    assert!(engine.anchor_release(Axis::Row));
    assert_eq!(engine.anchor_drop(Axis::Row), None);
    assert!(!engine.anchor_drag_start(Axis::Row));
}

#[test]
fn horizontal_scroll_moves_column_bounds() {
    let config = GridConfig {
        viewport_width: 400.0,
        ..seeded_config(100, 26)
    };
    let mut engine = grid(config);
    engine.set_scroll(500.0, 0.0);
    let frame = engine.anchor_frame(Axis::Column, 8).unwrap();
    assert_eq!(frame.scroll, 500.0);

    // Pointer at the container's left edge clamps past the row header.
    engine.anchor_press(Axis::Column, 8);
    engine.anchor_drag_start(Axis::Column);
    let position = engine.anchor_drag_over(Axis::Column, 0.0).unwrap();
    assert_eq!(position, frame.start_offset.max(500.0 + 63.0) + 10.0);
}

// ============================================================================
// Cell edits and lifecycle
// ============================================================================

#[test]
fn typed_value_refreshes_the_visible_cell() {
    let mut engine = seeded_grid(100, 4);
    assert_eq!(engine.set_cell_value(3, 1, "42.5").unwrap(), CellType::Number);
    assert_eq!(shown_text(&engine, 3, 1), "42.5");
    assert_eq!(engine.set_cell_value(3, 2, "2024-02-29").unwrap(), CellType::Date);
    assert_eq!(engine.set_cell_value(3, 3, "hello").unwrap(), CellType::String);
    assert!(matches!(
        engine.set_cell_value(100, 0, "x"),
        Err(GridError::CellOutOfRange { row: 100, col: 0 })
    ));
}

#[test]
fn construction_rejects_small_pool() {
    let config = GridConfig {
        pool_slots: Some(41),
        ..GridConfig::default()
    };
    let result = vgrid::GridEngine::new(config, vgrid::render::HeadlessSurface::new());
    assert!(matches!(
        result,
        Err(GridError::PoolTooSmall {
            required: 42,
            available: 41
        })
    ));
}

#[test]
fn taller_viewport_than_the_pool_covers_is_rejected() {
    let mut engine = seeded_grid(10_000, 4);
    assert!(matches!(
        engine.resize_viewport(1280.0, 1200.0),
        Err(GridError::PoolTooSmall {
            required: 63,
            available: 42
        })
    ));
    assert_eq!(engine.viewport().height, 600.0);
    assert_eq!(engine.window(), Some(Window::new(0, 32)));

    let window = engine.resize_viewport(1280.0, 300.0).unwrap();
    assert_eq!(window, Some(Window::new(0, 21)));
    assert_eq!(engine.viewport().height, 300.0);
}

#[test]
fn teardown_discards_everything() {
    let engine = seeded_grid(100, 4);
    let created = engine.surface().created();
    let surface = engine.teardown();
    assert_eq!(surface.discarded(), created);
    assert_eq!(surface.live(), 0);
}
