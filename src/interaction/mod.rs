//! Pointer interaction: anchor-drag resizing and cell selection.

mod resize;
mod selection;

pub use resize::{AnchorFrame, ResizeCommit, ResizeController, ResizeLimits, ResizeState};
pub use selection::{Selected, SelectionController};
