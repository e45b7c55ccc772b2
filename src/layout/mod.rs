//! Layout engine for computing row/column positions and the materialized window.
//!
//! This module handles:
//! - Per-index sizes with O(log n) cumulative offsets
//! - Absolute geometry of rows, columns, cells and the table extent
//! - Viewport state (scroll position, size)
//! - Mapping a scroll position to the window of rows to materialize

mod context;
mod prefix;
mod size_table;
mod viewport;
mod window;

pub use context::{GridMetrics, LayoutContext};
pub use prefix::PrefixSums;
pub use size_table::SizeTable;
pub use viewport::Viewport;
pub use window::{start_index_at, Window, WindowCalculator};
