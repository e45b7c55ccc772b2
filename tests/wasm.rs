#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

use vgrid::render::DomSurface;
use vgrid::{GridConfig, GridEngine, VirtualGrid};

wasm_bindgen_test_configure!(run_in_browser);

fn container(width: u32, height: u32) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    let style = element.style();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    style.set_property("overflow", "auto").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn count(root: &HtmlElement, selector: &str) -> u32 {
    root.query_selector_all(selector).unwrap().length()
}

#[wasm_bindgen_test]
fn dom_backend_materializes_the_pool() {
    let root = container(800, 600);
    let surface = DomSurface::new(&root).unwrap();
    let config = GridConfig {
        row_count: 1_000,
        column_count: 5,
        seed_coordinates: true,
        ..GridConfig::default()
    };
    let engine = GridEngine::new(config, surface).unwrap();

    let capacity = engine.pool().capacity() as u32;
    assert_eq!(count(&root, ".row"), capacity);
    assert_eq!(count(&root, ".cell"), capacity * 5);
    assert_eq!(count(&root, ".column-header"), 5);
    assert_eq!(count(&root, ".sentinel"), 2);

    let first = root.query_selector(".row[data-index='0'] .cell").unwrap().unwrap();
    assert_eq!(first.text_content().as_deref(), Some("0, 0"));

    let surface = engine.teardown();
    surface.remove();
    assert_eq!(count(&root, ".cell"), 0);
    root.remove();
}

#[wasm_bindgen_test]
fn virtual_grid_runs_structural_commands() {
    let root = container(800, 600);
    let config = serde_wasm_bindgen::to_value(&GridConfig {
        row_count: 10,
        column_count: 4,
        seed_coordinates: true,
        ..GridConfig::default()
    })
    .unwrap();
    let mut grid = VirtualGrid::new(root.clone(), config).unwrap();

    // Without a selection every command is a no-op.
    assert_eq!(grid.insert_row("before").unwrap(), None);
    assert!(grid.selected_cell().is_none());
    assert!(grid.insert_row("sideways").is_err());

    let cell: HtmlElement = root
        .query_selector(".row[data-index='5'] .cell[data-index='1']")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    cell.click();
    assert_eq!(grid.selected_cell(), Some(vec![5, 1]));
    assert!(cell.class_list().contains("selected"));

    assert_eq!(grid.insert_row("before").unwrap(), Some(5));
    assert_eq!(count(&root, ".row[data-index]"), 11);
    assert_eq!(grid.set_cell_value(0, 0, "12").unwrap(), "Number");

    grid.destroy();
    assert_eq!(count(&root, ".row"), 0);
    root.remove();
}

#[wasm_bindgen_test]
fn undefined_config_takes_defaults() {
    let root = container(640, 480);
    let mut grid = VirtualGrid::new(root.clone(), JsValue::UNDEFINED).unwrap();
    assert_eq!(count(&root, ".column-header"), 26);
    grid.destroy();
    root.remove();
}

#[wasm_bindgen_test]
fn anchor_click_clears_selection() {
    let root = container(800, 600);
    let mut grid = VirtualGrid::new(root.clone(), JsValue::UNDEFINED).unwrap();

    let cell: HtmlElement = root
        .query_selector(".row[data-index='2'] .cell[data-index='3']")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    cell.click();
    assert_eq!(grid.selected_cell(), Some(vec![2, 3]));

    let anchor: HtmlElement = root
        .query_selector(".column-anchor[data-index='0']")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    anchor.click();
    assert!(grid.selected_cell().is_none());
    assert!(!cell.class_list().contains("selected"));

    grid.destroy();
    root.remove();
}
