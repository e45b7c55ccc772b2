//! Recording backend with no display.
//!
//! Every handle keeps the last value written through each setter, so tests and
//! the CLI can inspect exactly what the browser would show.

use serde::Serialize;

use crate::error::Result;

use super::backend::{ElementKind, RenderHandle, RenderSurface};

/// Element state as last written by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlessHandle {
    pub id: usize,
    #[serde(skip)]
    pub kind: ElementKind,
    pub slot: Option<usize>,
    pub parent: Option<usize>,
    pub offset: (f32, f32),
    pub size: (f32, f32),
    pub visible: bool,
    pub content: String,
    pub binding: Option<u32>,
    pub highlighted: bool,
    /// Number of setter calls received
    pub writes: usize,
}

impl RenderHandle for HeadlessHandle {
    fn set_offset(&mut self, x: f32, y: f32) {
        self.offset = (x, y);
        self.writes += 1;
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.size = (width, height);
        self.writes += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.writes += 1;
    }

    fn set_content(&mut self, text: &str) {
        if self.content != text {
            self.content.clear();
            self.content.push_str(text);
        }
        self.writes += 1;
    }

    fn set_binding(&mut self, index: Option<u32>) {
        self.binding = index;
        self.writes += 1;
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        self.writes += 1;
    }
}

/// Surface that hands out [`HeadlessHandle`]s and counts their lifecycle.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    next_id: usize,
    created: usize,
    discarded: usize,
    extent: (f32, f32),
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Elements discarded so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Elements currently alive.
    pub fn live(&self) -> usize {
        self.created.saturating_sub(self.discarded)
    }

    /// Last published table extent as `(width, height)`.
    pub fn extent(&self) -> (f32, f32) {
        self.extent
    }
}

impl RenderSurface for HeadlessSurface {
    type Handle = HeadlessHandle;

    fn create(
        &mut self,
        kind: ElementKind,
        slot: Option<usize>,
        parent: Option<&HeadlessHandle>,
    ) -> Result<HeadlessHandle> {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        Ok(HeadlessHandle {
            id,
            kind,
            slot,
            parent: parent.map(|p| p.id),
            offset: (0.0, 0.0),
            size: (0.0, 0.0),
            visible: true,
            content: String::new(),
            binding: None,
            highlighted: false,
            writes: 0,
        })
    }

    fn discard(&mut self, _handle: HeadlessHandle) {
        self.discarded += 1;
    }

    fn set_extent(&mut self, width: f32, height: f32) {
        self.extent = (width, height);
    }
}
