//! Element rendering with pluggable backends.
//!
//! This module provides:
//! - Backend-agnostic element traits
//! - The recyclable element pool
//! - The renderer that binds pool slots to a row window
//! - A headless recording backend and, in the browser, a web-sys backend

pub mod backend;
pub mod headless;
pub mod pool;
pub mod renderer;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use backend::{ElementKind, RenderHandle, RenderSurface};
pub use headless::{HeadlessHandle, HeadlessSurface};
pub use pool::{ColumnSlot, ElementPool, RowSlot};
pub use renderer::{RenderStats, Renderer};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomHandle, DomSurface};
