//! `VirtualGrid` - the WASM-exported browser binding.
//!
//! The grid mounts a table skeleton inside a caller-provided scroll
//! container and wires its own listeners:
//! - `scroll` on the container runs the re-render gate
//! - `click` selects the cell under the pointer, or clears the selection
//! - `mousedown`/`dragstart`/`dragend` drive anchor resizing
//! - an `IntersectionObserver` re-renders whenever a sentinel row comes
//!   into view
//!
//! No JavaScript wiring is needed beyond constructing the grid and calling
//! the structural commands from a toolbar.

mod events;
mod listener;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use tracing::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::GridConfig;
use crate::engine::GridEngine;
use crate::error::{GridError, Result};
use crate::render::DomSurface;
use crate::types::{Axis, InsertPosition};

use listener::Listener;

/// An in-progress anchor gesture and the listeners it holds.
pub(crate) struct Gesture {
    pub(crate) axis: Axis,
    pub(crate) _drag_over: Listener,
    /// Dropped once the native drag starts.
    pub(crate) mouse_up: Option<Listener>,
}

/// State shared between the exported struct and its event closures.
pub(crate) struct SharedState {
    pub(crate) engine: Option<GridEngine<DomSurface>>,
    pub(crate) gesture: Option<Gesture>,
}

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

#[wasm_bindgen]
pub struct VirtualGrid {
    state: Rc<RefCell<SharedState>>,
    container: HtmlElement,
    listeners: Vec<Listener>,
    observer: Option<IntersectionObserver>,
    #[allow(dead_code)] // must outlive the observer
    observer_closure: Option<ObserverClosure>,
}

#[wasm_bindgen]
impl VirtualGrid {
    /// Mount a grid inside `container`. `config` is a partial
    /// configuration object; omitted fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, config: JsValue) -> std::result::Result<VirtualGrid, JsValue> {
        console_error_panic_hook::set_once();

        let mut config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("invalid grid config: {e}")))?
        };
        Self::fit_viewport(&mut config, &container);

        let surface = DomSurface::new(&container).map_err(to_js)?;
        let engine = GridEngine::new(config, surface).map_err(to_js)?;
        let state = Rc::new(RefCell::new(SharedState {
            engine: Some(engine),
            gesture: None,
        }));

        let mut grid = VirtualGrid {
            state,
            container,
            listeners: Vec::new(),
            observer: None,
            observer_closure: None,
        };
        grid.attach_listeners().map_err(to_js)?;
        grid.observe_sentinels().map_err(to_js)?;
        info!("virtual grid mounted");
        Ok(grid)
    }

    /// Insert a row `"before"` or `"after"` the selected cell. Returns the
    /// new row's index, or `undefined` without a selection.
    #[wasm_bindgen(js_name = "insertRow")]
    pub fn insert_row(&self, position: &str) -> std::result::Result<Option<u32>, JsValue> {
        let position = parse_position(position)?;
        Ok(self.with_engine(|engine| engine.insert_row(position)).flatten())
    }

    #[wasm_bindgen(js_name = "removeRow")]
    pub fn remove_row(&self) -> bool {
        self.with_engine(GridEngine::remove_row).unwrap_or(false)
    }

    /// Insert a column `"before"` or `"after"` the selected cell.
    #[wasm_bindgen(js_name = "insertColumn")]
    pub fn insert_column(&self, position: &str) -> std::result::Result<Option<u32>, JsValue> {
        let position = parse_position(position)?;
        match self.with_engine(|engine| engine.insert_column(position)) {
            Some(result) => result.map_err(to_js),
            None => Ok(None),
        }
    }

    #[wasm_bindgen(js_name = "removeColumn")]
    pub fn remove_column(&self) -> bool {
        self.with_engine(GridEngine::remove_column).unwrap_or(false)
    }

    /// `{ canInsertRow, canRemoveRow, canInsertColumn, canRemoveColumn }`
    #[wasm_bindgen(js_name = "actionState")]
    pub fn action_state(&self) -> std::result::Result<JsValue, JsValue> {
        let state = self
            .with_engine(|engine| engine.action_state())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `[row, col]` of the selected cell, if any.
    #[wasm_bindgen(js_name = "selectedCell")]
    pub fn selected_cell(&self) -> Option<Vec<u32>> {
        self.with_engine(|engine| engine.selected())
            .flatten()
            .map(|coord| vec![coord.row, coord.col])
    }

    /// Store `value` in a cell; returns the detected type.
    #[wasm_bindgen(js_name = "setCellValue")]
    pub fn set_cell_value(
        &self,
        row: u32,
        col: u32,
        value: &str,
    ) -> std::result::Result<String, JsValue> {
        let kind = self
            .with_engine(|engine| engine.set_cell_value(row, col, value))
            .ok_or_else(|| JsValue::from_str("grid destroyed"))?
            .map_err(to_js)?;
        Ok(kind.as_str().to_owned())
    }

    /// Re-read the container size and re-render.
    #[allow(clippy::cast_precision_loss)]
    pub fn refresh(&self) -> std::result::Result<(), JsValue> {
        let width = self.container.client_width() as f32;
        let height = self.container.client_height() as f32;
        self.with_engine(|engine| {
            if width > 0.0 && height > 0.0 {
                engine.resize_viewport(width, height).map(|_| ())
            } else {
                engine.on_viewport_changed();
                Ok(())
            }
        })
        .unwrap_or(Ok(()))
        .map_err(to_js)
    }

    /// Remove every listener and element the grid created.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_closure = None;
        let mut state = self.state.borrow_mut();
        state.gesture = None;
        if let Some(engine) = state.engine.take() {
            let surface = engine.teardown();
            surface.remove();
        }
        let _ = self.container.style().remove_property("overflow");
        info!("virtual grid destroyed");
    }
}

impl VirtualGrid {
    #[allow(clippy::cast_precision_loss)]
    fn fit_viewport(config: &mut GridConfig, container: &HtmlElement) {
        let width = container.client_width();
        let height = container.client_height();
        if width > 0 {
            config.viewport_width = width as f32;
        }
        if height > 0 {
            config.viewport_height = height as f32;
        }
    }

    fn attach_listeners(&mut self) -> Result<()> {
        let target: &web_sys::EventTarget = self.container.as_ref();

        let weak = Rc::downgrade(&self.state);
        let container = self.container.clone();
        self.listeners.push(Listener::add(target, "scroll", move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                events::handle_scroll(&state, &container);
            }
        })?);

        let weak = Rc::downgrade(&self.state);
        self.listeners.push(Listener::add(target, "click", move |event: Event| {
            if let Some(state) = weak.upgrade() {
                events::handle_click(&state, &event);
            }
        })?);

        let weak = Rc::downgrade(&self.state);
        let container = self.container.clone();
        self.listeners.push(Listener::add(target, "mousedown", move |event: Event| {
            if let Some(state) = weak.upgrade() {
                if let Err(err) = events::handle_mouse_down(&state, &container, &event) {
                    debug!(error = %err, "anchor press not armed");
                }
            }
        })?);

        let weak = Rc::downgrade(&self.state);
        self.listeners.push(Listener::add(target, "dragstart", move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                events::handle_drag_start(&state);
            }
        })?);

        let weak = Rc::downgrade(&self.state);
        let container = self.container.clone();
        self.listeners.push(Listener::add(target, "dragend", move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                events::handle_drag_end(&state, &container);
            }
        })?);

        Ok(())
    }

    fn observe_sentinels(&mut self) -> Result<()> {
        let weak = Rc::downgrade(&self.state);
        let container = self.container.clone();
        let closure: ObserverClosure = Closure::wrap(Box::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let entered = entries.iter().any(|entry| {
                    entry
                        .dyn_into::<IntersectionObserverEntry>()
                        .is_ok_and(|entry| entry.is_intersecting())
                });
                if !entered {
                    return;
                }
                if let Some(state) = weak.upgrade() {
                    events::handle_intersection(&state, &container);
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root(Some(self.container.as_ref()));
        options.set_threshold(&JsValue::from_f64(0.0));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)?;

        if let Some(engine) = self.state.borrow().engine.as_ref() {
            observer.observe(engine.pool().top_sentinel().element());
            observer.observe(engine.pool().bottom_sentinel().element());
        }

        self.observer = Some(observer);
        self.observer_closure = Some(closure);
        Ok(())
    }

    fn with_engine<T>(&self, f: impl FnOnce(&mut GridEngine<DomSurface>) -> T) -> Option<T> {
        let mut state = self.state.borrow_mut();
        state.engine.as_mut().map(f)
    }
}

impl Drop for VirtualGrid {
    fn drop(&mut self) {
        if self.state.borrow().engine.is_some() {
            self.destroy();
        }
    }
}

fn parse_position(position: &str) -> std::result::Result<InsertPosition, JsValue> {
    InsertPosition::parse(position)
        .ok_or_else(|| JsValue::from_str(&format!("expected \"before\" or \"after\", got {position:?}")))
}

fn to_js(err: GridError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
