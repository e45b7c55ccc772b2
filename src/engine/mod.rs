//! The grid engine: owns the model, the element pool and the controllers,
//! and turns scroll, click, drag and command events into render passes.
//!
//! Every entry point runs to completion before returning. The browser
//! binding calls in from one event callback at a time.

mod commands;
mod gestures;

use tracing::{debug, info, warn};

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::interaction::{ResizeController, ResizeLimits, SelectionController};
use crate::layout::{LayoutContext, Viewport, Window, WindowCalculator};
use crate::model::{CellStore, GridModel, SparseCellStore};
use crate::render::{ElementPool, RenderSurface, Renderer};
use crate::types::{Axis, CellCoord};

/// Virtualized grid over a render surface.
pub struct GridEngine<Sf: RenderSurface, St: CellStore = SparseCellStore> {
    config: GridConfig,
    model: GridModel<St>,
    surface: Sf,
    pool: ElementPool<Sf::Handle>,
    renderer: Renderer,
    windows: WindowCalculator,
    viewport: Viewport,
    window: Option<Window>,
    selection: SelectionController,
    row_resize: ResizeController,
    column_resize: ResizeController,
}

impl<Sf: RenderSurface> GridEngine<Sf, SparseCellStore> {
    /// Build the grid from `config`, create every pooled element on
    /// `surface` and render the first window.
    pub fn new(config: GridConfig, surface: Sf) -> Result<Self> {
        let model = GridModel::new(&config);
        Self::with_model(config, model, surface)
    }
}

impl<Sf: RenderSurface, St: CellStore> GridEngine<Sf, St> {
    /// Like [`GridEngine::new`] over a prepared model.
    pub fn with_model(config: GridConfig, model: GridModel<St>, mut surface: Sf) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejected grid configuration");
            return Err(err);
        }
        let required = config.required_pool_size();
        let available = config.pool_size();
        if available < required {
            warn!(required, available, "element pool too small");
            return Err(GridError::PoolTooSmall {
                required,
                available,
            });
        }

        let pool = ElementPool::build(&mut surface, available, model.column_count())?;
        let renderer = Renderer::new(&config);
        let mut engine = Self {
            windows: WindowCalculator::new(config.buffer_rows, available),
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            row_resize: ResizeController::new(
                Axis::Row,
                ResizeLimits {
                    low_inset: config.row_anchor_low_inset,
                    high_inset: config.row_anchor_high_inset,
                },
            ),
            column_resize: ResizeController::new(
                Axis::Column,
                ResizeLimits {
                    low_inset: config.column_anchor_low_inset,
                    high_inset: config.column_anchor_high_inset,
                },
            ),
            selection: SelectionController::new(),
            window: None,
            config,
            model,
            surface,
            pool,
            renderer,
        };

        engine
            .renderer
            .rerender_columns_from(&mut engine.surface, &mut engine.pool, &engine.model, 0);
        engine.on_viewport_changed();
        info!(
            rows = engine.model.row_count(),
            columns = engine.model.column_count(),
            pool = available,
            "grid ready"
        );
        Ok(engine)
    }

    /// Recompute the window from the current scroll position and render it.
    /// Always re-renders and clears the selection.
    pub fn on_viewport_changed(&mut self) -> Option<Window> {
        self.selection.clear(&mut self.pool);
        let window = self.windows.compute(
            self.model.rows(),
            self.viewport.scroll_y,
            self.viewport.height,
        );
        debug!(?window, scroll_y = self.viewport.scroll_y, "window recomputed");
        if let Some(window) = window {
            self.renderer
                .render_window(&mut self.surface, &mut self.pool, &self.model, window);
        }
        self.window = window;
        window
    }

    /// Scroll listener entry point: re-renders only when the current window
    /// can no longer cover the viewport. Returns whether it re-rendered.
    pub fn on_scroll(&mut self) -> bool {
        let stale = self.windows.needs_recompute(
            self.window,
            self.model.rows(),
            self.viewport.scroll_y,
            self.viewport.height,
        );
        if stale {
            self.on_viewport_changed();
        }
        stale
    }

    /// Move the viewport (clamped to the table) and run the scroll gate.
    pub fn set_scroll(&mut self, x: f32, y: f32) -> bool {
        self.update_scroll(x, y);
        self.on_scroll()
    }

    /// Move the viewport (clamped to the table) without rendering.
    pub fn update_scroll(&mut self, x: f32, y: f32) {
        let layout = LayoutContext::new(
            self.model.rows(),
            self.model.columns(),
            self.renderer.metrics(),
        );
        self.viewport.set_scroll(x, y, &layout);
    }

    /// The container changed size.
    ///
    /// The pool is never regrown; a height that needs more slots than it
    /// holds is rejected and the previous viewport is kept.
    pub fn resize_viewport(&mut self, width: f32, height: f32) -> Result<Option<Window>> {
        let required = GridConfig {
            viewport_height: height,
            ..self.config.clone()
        }
        .required_pool_size();
        let available = self.pool.capacity();
        if available < required {
            warn!(height, required, available, "viewport outgrew the element pool");
            return Err(GridError::PoolTooSmall {
                required,
                available,
            });
        }
        self.viewport.resize(width, height);
        Ok(self.on_viewport_changed())
    }

    /// Layout over the current sizes.
    pub fn layout(&self) -> LayoutContext<'_> {
        self.renderer.layout(&self.model)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn model(&self) -> &GridModel<St> {
        &self.model
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Window bound by the last render pass.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    pub fn selected(&self) -> Option<CellCoord> {
        self.selection.selected()
    }

    pub fn pool(&self) -> &ElementPool<Sf::Handle> {
        &self.pool
    }

    pub fn surface(&self) -> &Sf {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Sf {
        &mut self.surface
    }

    /// Discard every pooled element and hand the surface back.
    pub fn teardown(self) -> Sf {
        let Self {
            mut surface, pool, ..
        } = self;
        let discarded = pool.teardown(&mut surface);
        info!(discarded, "grid torn down");
        surface
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::render::HeadlessSurface;

    #[test]
    fn construction_renders_initial_window() {
        let engine = GridEngine::new(GridConfig::default(), HeadlessSurface::new()).unwrap();
        assert_eq!(engine.window(), Some(Window::new(0, 32)));
        assert_eq!(engine.pool().bindings(), (0..=32).collect::<Vec<_>>());
    }

    #[test]
    fn undersized_pool_is_fatal() {
        let config = GridConfig {
            pool_slots: Some(30),
            ..GridConfig::default()
        };
        let err = GridEngine::new(config, HeadlessSurface::new()).err().unwrap();
        assert!(matches!(
            err,
            GridError::PoolTooSmall {
                required: 42,
                available: 30
            }
        ));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = GridConfig {
            viewport_height: -1.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            GridEngine::new(config, HeadlessSurface::new()),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn scroll_gate_skips_small_moves() {
        let mut engine = GridEngine::new(GridConfig::default(), HeadlessSurface::new()).unwrap();
        assert!(!engine.set_scroll(0.0, 280.0));
        assert_eq!(engine.window().unwrap().start, 0);
        assert!(engine.set_scroll(0.0, 2800.0));
        assert_eq!(engine.window(), Some(Window::new(90, 122)));
    }

    #[test]
    fn teardown_discards_all_elements() {
        let engine = GridEngine::new(GridConfig::default(), HeadlessSurface::new()).unwrap();
        let surface = engine.teardown();
        assert_eq!(surface.live(), 0);
    }
}
