//! CLI tool for vgrid - replays an interaction script against a headless
//! grid and prints what the engine materialized after every step.
//!
//! Usage:
//!   vgrid_cli <script.json>                      # Default configuration
//!   vgrid_cli <script.json> --config grid.json   # Partial configuration
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   { "op": "scroll", "y": 2800 },
//!   { "op": "select", "row": 95, "col": 2 },
//!   { "op": "insertRow", "position": "after" },
//!   { "op": "resize", "axis": "column", "index": 2, "size": 140 }
//! ]
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use vgrid::render::HeadlessSurface;
use vgrid::{ActionState, Axis, CellCoord, GridConfig, GridEngine, InsertPosition, Viewport, Window};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
enum Step {
    Scroll {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Select {
        row: u32,
        col: u32,
    },
    ClearSelection,
    InsertRow {
        position: InsertPosition,
    },
    RemoveRow,
    InsertColumn {
        position: InsertPosition,
    },
    RemoveColumn,
    Resize {
        axis: Axis,
        index: u32,
        size: f32,
    },
    SetCell {
        row: u32,
        col: u32,
        value: String,
    },
    Viewport {
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    step: usize,
    window: Option<Window>,
    bindings: Vec<u32>,
    selected: Option<CellCoord>,
    rows: u32,
    columns: u32,
    viewport: Viewport,
    extent: (f32, f32),
    actions: ActionState,
    outcome: serde_json::Value,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        fail("Usage: vgrid_cli <script.json> [--config grid.json]");
    }

    let script_path = &args[1];
    let config = if args.len() > 3 && args[2] == "--config" {
        let json = fs::read_to_string(&args[3])
            .unwrap_or_else(|e| fail(&format!("Error reading {}: {e}", args[3])));
        GridConfig::from_json(&json).unwrap_or_else(|e| fail(&format!("Error in config: {e}")))
    } else {
        GridConfig::default()
    };

    let script = fs::read_to_string(script_path)
        .unwrap_or_else(|e| fail(&format!("Error reading {script_path}: {e}")));
    let steps: Vec<Step> = serde_json::from_str(&script)
        .unwrap_or_else(|e| fail(&format!("Error parsing script: {e}")));

    let mut engine = GridEngine::new(config, HeadlessSurface::new())
        .unwrap_or_else(|e| fail(&format!("Error building grid: {e}")));

    let mut snapshots = vec![snapshot(&engine, 0, serde_json::Value::Null)];
    for (i, step) in steps.into_iter().enumerate() {
        let outcome = run_step(&mut engine, step);
        snapshots.push(snapshot(&engine, i + 1, outcome));
    }

    let json = serde_json::to_string_pretty(&snapshots)
        .unwrap_or_else(|e| fail(&format!("Error serializing JSON: {e}")));
    io::stdout().write_all(json.as_bytes()).unwrap();
    println!();
}

fn run_step(engine: &mut GridEngine<HeadlessSurface>, step: Step) -> serde_json::Value {
    use serde_json::json;

    match step {
        Step::Scroll { x, y } => json!({ "rerendered": engine.set_scroll(x, y) }),
        Step::Select { row, col } => json!({ "selected": engine.select_cell(row, col) }),
        Step::ClearSelection => {
            engine.click_elsewhere();
            serde_json::Value::Null
        }
        Step::InsertRow { position } => json!({ "inserted": engine.insert_row(position) }),
        Step::RemoveRow => json!({ "removed": engine.remove_row() }),
        Step::InsertColumn { position } => match engine.insert_column(position) {
            Ok(at) => json!({ "inserted": at }),
            Err(e) => json!({ "error": e.to_string() }),
        },
        Step::RemoveColumn => json!({ "removed": engine.remove_column() }),
        Step::Resize { axis, index, size } => match engine.drag_anchor_to(axis, index, size) {
            Some(commit) => json!({ "size": commit.size, "previous": commit.previous }),
            None => json!({ "size": null }),
        },
        Step::SetCell { row, col, value } => match engine.set_cell_value(row, col, &value) {
            Ok(kind) => json!({ "type": kind }),
            Err(e) => json!({ "error": e.to_string() }),
        },
        Step::Viewport { width, height } => match engine.resize_viewport(width, height) {
            Ok(window) => json!({ "window": window }),
            Err(e) => json!({ "error": e.to_string() }),
        },
    }
}

fn snapshot(
    engine: &GridEngine<HeadlessSurface>,
    step: usize,
    outcome: serde_json::Value,
) -> Snapshot {
    Snapshot {
        step,
        window: engine.window(),
        bindings: engine.pool().bindings(),
        selected: engine.selected(),
        rows: engine.model().row_count(),
        columns: engine.model().column_count(),
        viewport: *engine.viewport(),
        extent: engine.surface().extent(),
        actions: engine.action_state(),
        outcome,
    }
}
