//! Scroll, click, drag and visibility handlers for `VirtualGrid`.
//!
//! Handlers resolve what was hit from the element's live `data-*`
//! attributes, then call into the engine while holding the shared state
//! borrow for the duration of one callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, EventTarget, HtmlElement, MouseEvent};

use super::listener::Listener;
use super::{Gesture, SharedState};
use crate::error::Result;
use crate::types::Axis;

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hit {
    Cell { slot: usize, col: u32 },
    Anchor { axis: Axis, key: usize },
    Other,
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

fn attribute<T: std::str::FromStr>(element: &Element, name: &str) -> Option<T> {
    element.get_attribute(name)?.parse().ok()
}

pub(crate) fn hit_target(event: &Event) -> Hit {
    if let Some(cell) = closest(event, ".cell") {
        if let (Some(slot), Some(col)) = (
            attribute(&cell, "data-row-slot"),
            attribute(&cell, "data-index"),
        ) {
            return Hit::Cell { slot, col };
        }
    }
    if let Some(anchor) = closest(event, ".row-anchor") {
        if let Some(key) = attribute(&anchor, "data-row-slot") {
            return Hit::Anchor {
                axis: Axis::Row,
                key,
            };
        }
    }
    if let Some(anchor) = closest(event, ".column-anchor") {
        if let Some(key) = attribute(&anchor, "data-index") {
            return Hit::Anchor {
                axis: Axis::Column,
                key,
            };
        }
    }
    Hit::Other
}

#[allow(clippy::cast_precision_loss)]
fn container_scroll(container: &HtmlElement) -> (f32, f32) {
    (container.scroll_left() as f32, container.scroll_top() as f32)
}

fn set_overflow_locked(container: &HtmlElement, locked: bool) {
    let style = container.style();
    if locked {
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.set_property("overflow", "auto");
    }
}

/// Container scrolled: update the viewport and re-render if the window
/// went stale.
pub(crate) fn handle_scroll(state: &Rc<RefCell<SharedState>>, container: &HtmlElement) {
    let mut s = state.borrow_mut();
    let (x, y) = container_scroll(container);
    if let Some(engine) = s.engine.as_mut() {
        engine.set_scroll(x, y);
    }
}

/// A sentinel crossed the container edge: always re-render.
pub(crate) fn handle_intersection(state: &Rc<RefCell<SharedState>>, container: &HtmlElement) {
    let mut s = state.borrow_mut();
    let (x, y) = container_scroll(container);
    if let Some(engine) = s.engine.as_mut() {
        engine.update_scroll(x, y);
        engine.on_viewport_changed();
    }
}

pub(crate) fn handle_click(state: &Rc<RefCell<SharedState>>, event: &Event) {
    let mut s = state.borrow_mut();
    let Some(engine) = s.engine.as_mut() else {
        return;
    };
    match hit_target(event) {
        Hit::Cell { slot, col } => {
            engine.click_cell(slot, col);
        }
        Hit::Anchor { .. } | Hit::Other => engine.click_elsewhere(),
    }
}

/// Pointer pressed. On an anchor this arms the resize gesture and acquires
/// the temporary drag-over and mouse-up listeners.
pub(crate) fn handle_mouse_down(
    state: &Rc<RefCell<SharedState>>,
    container: &HtmlElement,
    event: &Event,
) -> Result<()> {
    let Hit::Anchor { axis, key } = hit_target(event) else {
        return Ok(());
    };

    let target: EventTarget = container.clone().into();
    let drag_over = {
        let weak = Rc::downgrade(state);
        let container = container.clone();
        Listener::add(&target, "dragover", move |event: Event| {
            event.prevent_default();
            if let Some(state) = weak.upgrade() {
                handle_drag_over(&state, &container, &event, axis);
            }
        })?
    };
    let mouse_up = {
        let weak: Weak<RefCell<SharedState>> = Rc::downgrade(state);
        let container = container.clone();
        Listener::add(&target, "mouseup", move |_event: Event| {
            if let Some(state) = weak.upgrade() {
                handle_mouse_up(&state, &container, axis);
            }
        })?
    };

    let mut s = state.borrow_mut();
    if let Some(engine) = s.engine.as_mut() {
        engine.anchor_press(axis, key);
    }
    s.gesture = Some(Gesture {
        axis,
        _drag_over: drag_over,
        mouse_up: Some(mouse_up),
    });
    set_overflow_locked(container, true);
    Ok(())
}

/// Native drag started: from now on only drop ends the gesture.
pub(crate) fn handle_drag_start(state: &Rc<RefCell<SharedState>>) {
    let mut s = state.borrow_mut();
    let SharedState { engine, gesture } = &mut *s;
    let Some(gesture) = gesture.as_mut() else {
        return;
    };
    gesture.mouse_up = None;
    if let Some(engine) = engine.as_mut() {
        engine.anchor_drag_start(gesture.axis);
    }
}

#[allow(clippy::cast_precision_loss)]
fn handle_drag_over(
    state: &Rc<RefCell<SharedState>>,
    container: &HtmlElement,
    event: &Event,
    axis: Axis,
) {
    let Some(event) = event.dyn_ref::<DragEvent>() else {
        return;
    };
    let mouse: &MouseEvent = event.as_ref();
    let rect = container.get_bounding_client_rect();
    let pointer = match axis {
        Axis::Row => mouse.client_y() as f32 - rect.top() as f32,
        Axis::Column => mouse.client_x() as f32 - rect.left() as f32,
    };
    let mut s = state.borrow_mut();
    if let Some(engine) = s.engine.as_mut() {
        engine.anchor_drag_over(axis, pointer);
    }
}

/// Drag finished: commit and release the gesture listeners.
pub(crate) fn handle_drag_end(state: &Rc<RefCell<SharedState>>, container: &HtmlElement) {
    let mut s = state.borrow_mut();
    let Some(gesture) = s.gesture.take() else {
        return;
    };
    if let Some(engine) = s.engine.as_mut() {
        engine.anchor_drop(gesture.axis);
    }
    drop(gesture);
    set_overflow_locked(container, false);
}

/// Pointer released without a drag: disarm and release the listeners.
fn handle_mouse_up(state: &Rc<RefCell<SharedState>>, container: &HtmlElement, axis: Axis) {
    let mut s = state.borrow_mut();
    if let Some(engine) = s.engine.as_mut() {
        engine.anchor_release(axis);
    }
    s.gesture = None;
    set_overflow_locked(container, false);
}
