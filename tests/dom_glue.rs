//! Browser tests for the DataTransfer glue and the sidebar markup.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]

use agent_canvas_frontend::components::canvas_editor::setup_canvas;
use agent_canvas_frontend::components::sidebar::{refresh_sidebar, write_payload};
use agent_canvas_frontend::constants::DRAG_MIME_TYPE;
use agent_canvas_frontend::models::{AgentTemplate, Tool};
use agent_canvas_frontend::payload::{self, DropPayload};
use agent_canvas_frontend::state::APP_STATE;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{window, DataTransfer, DragEvent, DragEventInit, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn write_payload_round_trips_through_data_transfer() {
    let tool = Tool {
        id: "tool-3".into(),
        name: "web-search-tool".into(),
        description: "For web-based searches...".into(),
    };
    let dt = DataTransfer::new().unwrap();
    write_payload(&dt, DRAG_MIME_TYPE, &DropPayload::Tool(tool.clone())).unwrap();

    assert_eq!(dt.effect_allowed(), "move");
    let raw = dt.get_data(DRAG_MIME_TYPE).unwrap();
    assert_eq!(payload::decode(&raw).unwrap(), DropPayload::Tool(tool));
}

#[wasm_bindgen_test]
fn sidebar_renders_agent_and_tool_cards() {
    let document = window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id("app-container");
    document.body().unwrap().append_child(&container).unwrap();

    refresh_sidebar(&document).expect("sidebar renders");
    // Re-rendering reuses the same element instead of stacking sidebars
    refresh_sidebar(&document).expect("sidebar re-renders");

    let sidebars = document.query_selector_all("#asset-sidebar").unwrap();
    assert_eq!(sidebars.length(), 1);

    let sidebar = document.get_element_by_id("asset-sidebar").unwrap();
    assert_eq!(
        container.first_element_child().map(|el| el.id()),
        Some("asset-sidebar".to_string())
    );
    assert!(sidebar.text_content().unwrap().contains("Asset Library"));

    let cards = sidebar.query_selector_all(".asset-card").unwrap();
    assert_eq!(cards.length(), 5, "one agent card plus four tools");

    let first_tool = sidebar.query_selector("[data-tool-id='tool-1']").unwrap().unwrap();
    assert_eq!(first_tool.get_attribute("draggable").as_deref(), Some("true"));
    assert!(first_tool.text_content().unwrap().contains("bulk-doc-check"));

    container.remove();
}

fn drop_at(target: &web_sys::Element, client_x: f64, client_y: f64, payload: &DropPayload) {
    let dt = DataTransfer::new().unwrap();
    write_payload(&dt, DRAG_MIME_TYPE, payload).unwrap();
    let init = DragEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_client_x(client_x.round() as i32);
    init.set_client_y(client_y.round() as i32);
    init.set_data_transfer(Some(&dt));
    let event = DragEvent::new_with_event_init_dict("drop", &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn drops_follow_the_canvas_when_the_page_layout_shifts() {
    let document = window().unwrap().document().unwrap();
    let app = document.create_element("div").unwrap();
    app.set_id("app-container");
    document.body().unwrap().append_child(&app).unwrap();

    let spacer = document.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    spacer.style().set_property("height", "300px").unwrap();
    app.append_child(&spacer).unwrap();

    let container = document.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    container.set_id("canvas-container");
    container.style().set_property("width", "600px").unwrap();
    container.style().set_property("height", "400px").unwrap();
    app.append_child(&container).unwrap();

    setup_canvas(&document).expect("canvas sets up");
    let canvas = document.get_element_by_id("node-canvas").unwrap();

    let rect = canvas.get_bounding_client_rect();
    let agent = DropPayload::Agent(AgentTemplate { name: "Agent".into() });
    drop_at(&canvas, rect.left() + 50.0, rect.top() + 20.0, &agent);

    let (node_id, position) = APP_STATE.with(|state| {
        let state = state.borrow();
        assert_eq!(state.nodes.len(), 1);
        (state.nodes[0].id.clone(), state.nodes[0].position)
    });
    assert!((position.x - 50.0).abs() <= 1.0 && (position.y - 20.0).abs() <= 1.0);

    // Move the canvas up the page without resizing the window
    spacer.style().set_property("height", "100px").unwrap();
    let moved = canvas.get_bounding_client_rect();
    assert!(moved.top() < rect.top());

    let tool = DropPayload::Tool(Tool {
        id: "tool-1".into(),
        name: "bulk-doc-check".into(),
        description: "Checks documents in bulk".into(),
    });
    drop_at(&canvas, moved.left() + 80.0, moved.top() + 40.0, &tool);

    APP_STATE.with(|state| {
        let state = state.borrow();
        assert_eq!(state.nodes.len(), 1, "the tool landed on the node, not the canvas");
        let node = state.node(&node_id).unwrap();
        assert_eq!(node.data.tools.len(), 1);
        assert_eq!(node.data.tools[0].id, "tool-1");
    });

    app.remove();
}
