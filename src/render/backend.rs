//! Render backend traits for pluggable element implementations.
//!
//! The engine never touches the DOM directly. It asks a [`RenderSurface`] for
//! element handles once, then drives them through [`RenderHandle`] setters:
//! the browser uses the web-sys backend, tests and the CLI use the headless
//! recording backend.

use crate::error::Result;

/// Kinds of element the grid materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Row container holding one cell per column
    RowBody,
    /// Row number on the left strip
    RowHeader,
    /// Drag handle on a row's bottom edge
    RowAnchor,
    /// Cell inside a row body
    Cell,
    /// Column title on the top strip
    ColumnHeader,
    /// Drag handle on a column's right edge
    ColumnAnchor,
    /// Visibility marker above the materialized rows
    TopSentinel,
    /// Visibility marker below the materialized rows
    BottomSentinel,
}

impl ElementKind {
    /// CSS class given to elements of this kind.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::RowBody => "row",
            Self::RowHeader => "row-header",
            Self::RowAnchor => "row-anchor",
            Self::Cell => "cell",
            Self::ColumnHeader => "column-header",
            Self::ColumnAnchor => "column-anchor",
            Self::TopSentinel | Self::BottomSentinel => "sentinel",
        }
    }

    pub fn is_anchor(self) -> bool {
        matches!(self, Self::RowAnchor | Self::ColumnAnchor)
    }
}

/// One materialized element.
///
/// Each setter is applied as a unit; no partially applied state is
/// observable by later engine logic in the same pass.
pub trait RenderHandle {
    /// Absolute offset. Row parts and sentinels are placed in table
    /// coordinates; cells relative to their row body.
    fn set_offset(&mut self, x: f32, y: f32);

    fn set_size(&mut self, width: f32, height: f32);

    fn set_visible(&mut self, visible: bool);

    fn set_content(&mut self, text: &str);

    /// Logical index the element currently shows (row index for row parts,
    /// column index for cells and column parts). `None` when unbound.
    fn set_binding(&mut self, index: Option<u32>);

    /// Selection highlight for cells and headers, active state for anchors.
    fn set_highlighted(&mut self, highlighted: bool);
}

/// Factory and owner of element handles.
pub trait RenderSurface {
    type Handle: RenderHandle;

    /// Create an element. `slot` tags row parts with their pool slot id;
    /// `parent` nests cells inside a row body.
    fn create(
        &mut self,
        kind: ElementKind,
        slot: Option<usize>,
        parent: Option<&Self::Handle>,
    ) -> Result<Self::Handle>;

    /// Remove an element for good.
    fn discard(&mut self, handle: Self::Handle);

    /// Size of the scrollable table.
    fn set_extent(&mut self, width: f32, height: f32);
}
