//! vgrid - virtualized spreadsheet grid for the web
//!
//! Renders very large row/column grids in the browser via WebAssembly and
//! plain DOM elements:
//! - Only the rows near the viewport are materialized
//! - A fixed pool of row elements is recycled as the user scrolls
//! - Row heights and column widths resize by dragging header anchors
//! - Rows and columns insert and remove around the selected cell
//!
//! The engine itself is backend-agnostic: [`render::HeadlessSurface`] runs
//! the same windowing and binding logic natively, for tests and the CLI.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { VirtualGrid } from 'vgrid';
//! await init();
//! const grid = new VirtualGrid(container, { rowCount: 10000, columnCount: 26 });
//! insertRowButton.onclick = () => grid.insertRow('after');
//! ```

pub mod cell_ref;
pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod render;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::GridConfig;
pub use engine::GridEngine;
pub use error::{GridError, Result};
pub use layout::{SizeTable, Viewport, Window, WindowCalculator};
pub use model::{CellStore, GridModel, SparseCellStore};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::VirtualGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
