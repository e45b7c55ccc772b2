//! web-sys backend: every handle is an absolutely positioned `<div>`.
//!
//! Offsets are applied as CSS transforms. Row parts carry `data-row-slot`,
//! bound elements carry `data-index`; the browser binding reads these back
//! at event time to find out what was clicked or pressed.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::{GridError, Result};

use super::backend::{ElementKind, RenderHandle, RenderSurface};

/// A pooled DOM element.
#[derive(Debug, Clone)]
pub struct DomHandle {
    element: HtmlElement,
    kind: ElementKind,
}

impl DomHandle {
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl RenderHandle for DomHandle {
    fn set_offset(&mut self, x: f32, y: f32) {
        let _ = self
            .element
            .style()
            .set_property("transform", &format!("translate({x}px, {y}px)"));
    }

    fn set_size(&mut self, width: f32, height: f32) {
        let style = self.element.style();
        let _ = style.set_property("width", &format!("{width}px"));
        if !self.kind.is_anchor() {
            let _ = style.set_property("height", &format!("{height}px"));
        }
    }

    fn set_visible(&mut self, visible: bool) {
        let style = self.element.style();
        if visible {
            let _ = style.remove_property("display");
        } else {
            let _ = style.set_property("display", "none");
        }
    }

    fn set_content(&mut self, text: &str) {
        if self.element.text_content().as_deref() != Some(text) {
            self.element.set_text_content(Some(text));
        }
    }

    fn set_binding(&mut self, index: Option<u32>) {
        let _ = match index {
            Some(index) => self.element.set_attribute("data-index", &index.to_string()),
            None => self.element.remove_attribute("data-index"),
        };
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        let class = if self.kind.is_anchor() {
            "active"
        } else {
            "selected"
        };
        let _ = self
            .element
            .class_list()
            .toggle_with_force(class, highlighted);
    }
}

/// Creates grid elements inside a table element in the scroll container.
pub struct DomSurface {
    document: Document,
    table: HtmlElement,
    row_headers: HtmlElement,
    column_headers: HtmlElement,
}

impl DomSurface {
    /// Build the table skeleton inside `container`.
    pub fn new(container: &HtmlElement) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| GridError::Dom("no document".into()))?;

        let table = create_div(&document, "table")?;
        let column_headers = create_div(&document, "column-headers")?;
        let row_headers = create_div(&document, "row-headers")?;
        table.append_child(&column_headers)?;
        table.append_child(&row_headers)?;
        container.append_child(&table)?;

        Ok(Self {
            document,
            table,
            row_headers,
            column_headers,
        })
    }

    /// The element sized to the full table extent.
    pub fn table(&self) -> &HtmlElement {
        &self.table
    }

    /// Remove the table skeleton from the page.
    pub fn remove(&self) {
        self.table.remove();
    }
}

impl RenderSurface for DomSurface {
    type Handle = DomHandle;

    fn create(
        &mut self,
        kind: ElementKind,
        slot: Option<usize>,
        parent: Option<&DomHandle>,
    ) -> Result<DomHandle> {
        let element = create_div(&self.document, kind.class_name())?;
        if let Some(slot) = slot {
            element.set_attribute("data-row-slot", &slot.to_string())?;
        }
        if kind.is_anchor() {
            element.set_attribute("draggable", "true")?;
        }

        let parent: &HtmlElement = match (parent, kind) {
            (Some(parent), _) => &parent.element,
            (None, ElementKind::RowHeader | ElementKind::RowAnchor) => &self.row_headers,
            (None, ElementKind::ColumnHeader | ElementKind::ColumnAnchor) => &self.column_headers,
            (None, _) => &self.table,
        };
        parent.append_child(&element)?;
        Ok(DomHandle { element, kind })
    }

    fn discard(&mut self, handle: DomHandle) {
        handle.element.remove();
    }

    fn set_extent(&mut self, width: f32, height: f32) {
        let style = self.table.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GridError::Dom("created element is not an HtmlElement".into()))?;
    element.set_class_name(class);
    Ok(element)
}
