//! Viewport state management for scrolling.

use serde::Serialize;

use super::LayoutContext;

/// Viewport state - represents the visible area of the grid container
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal scroll position in table coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in table coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Create a viewport scrolled to the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Clamp scroll position so the viewport never runs past the table.
    pub fn clamp_scroll(&mut self, layout: &LayoutContext<'_>) {
        let max_x = (layout.total_width() - self.width).max(0.0);
        let max_y = (layout.total_height() - self.height).max(0.0);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, layout: &LayoutContext<'_>) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(layout);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::layout::{GridMetrics, SizeTable};

    #[test]
    fn scroll_clamps_to_table_extent() {
        let rows = SizeTable::new(100, 28.0);
        let columns = SizeTable::new(4, 80.0);
        let metrics = GridMetrics {
            cell_padding: 12.0,
            row_header_width: 63.0,
            header_height: 28.0,
        };
        let layout = LayoutContext::new(&rows, &columns, metrics);
        let mut viewport = Viewport::new(300.0, 600.0);

        viewport.set_scroll(-5.0, 99_999.0, &layout);
        assert_eq!(viewport.scroll_x, 0.0);
        // 100 * 28 + 2 * 28 - 600
        assert_eq!(viewport.scroll_y, 2256.0);

        viewport.set_scroll(500.0, 2000.0, &layout);
        assert_eq!(viewport.scroll_x, 63.0 + 4.0 * 92.0 - 300.0);
        assert_eq!(viewport.scroll_y, 2000.0);
    }
}
