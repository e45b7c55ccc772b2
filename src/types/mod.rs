//! Data types shared by the grid model, renderer and controllers.

mod cell;
mod selection;

pub use cell::*;
pub use selection::*;
