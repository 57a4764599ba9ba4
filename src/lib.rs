use wasm_bindgen::prelude::*;
use web_sys::Document;

#[macro_use]
pub mod macros;

pub mod canvas;
pub mod catalog;
pub mod components;
pub mod config;
pub mod constants;
pub mod graph;
pub mod ids;
pub mod layout;
pub mod messages;
pub mod models;
pub mod payload;
pub mod reducers;
pub mod state;
pub mod update;
pub mod viewport;

use catalog::Catalog;
use messages::Message;
use models::GraphSnapshot;
use state::{dispatch_global_message, APP_STATE};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    ensure_app_container(&document)?;

    // Sidebar first so it lands to the left of the canvas
    components::sidebar::refresh_sidebar(&document)?;
    components::canvas_editor::setup_canvas(&document)?;

    console_log!("Agent canvas ready");
    Ok(())
}

fn ensure_app_container(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("app-container").is_some() {
        return Ok(());
    }
    let container = document.create_element("div")?;
    container.set_id("app-container");
    container.set_class_name("app-container");
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&container)?;
    Ok(())
}

/// Current nodes and edges as a plain JS object `{nodes, edges}`.
#[wasm_bindgen]
pub fn graph_snapshot() -> Result<JsValue, JsValue> {
    APP_STATE.with(|state| {
        let state = state.borrow();
        let snapshot = GraphSnapshot {
            nodes: &state.nodes,
            edges: &state.edges,
        };
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Replace the asset catalog with `{tools: [...], agent: {name}}` and
/// re-render the sidebar.  Nodes already on the canvas keep their tools.
#[wasm_bindgen]
pub fn load_catalog(value: JsValue) -> Result<(), JsValue> {
    let catalog: Catalog = serde_wasm_bindgen::from_value(value)?;
    catalog.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    dispatch_global_message(Message::CatalogLoaded(catalog));
    Ok(())
}
