//! The "Asset Library" sidebar: one draggable Agent card followed by a card
//! per catalog tool.  Dragging a card writes its JSON payload into the
//! `DataTransfer` under the editor's mime type; nothing else happens until
//! the drop lands on the canvas.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DataTransfer, Document, DragEvent, Element};

use crate::constants::DROP_EFFECT_MOVE;
use crate::models::Tool;
use crate::payload::{self, DropPayload};
use crate::state::APP_STATE;

/// Encode `payload` into the transfer slot reserved for `mime`.
pub fn write_payload(data_transfer: &DataTransfer, mime: &str, payload: &DropPayload) -> Result<(), JsValue> {
    let json = payload::encode(payload).map_err(|e| JsValue::from_str(&e.to_string()))?;
    data_transfer.set_data(mime, &json)?;
    data_transfer.set_effect_allowed(DROP_EFFECT_MOVE);
    Ok(())
}

/// (Re-)create the sidebar and insert it as the first child of
/// `<div id="app-container">`, falling back to `<body>`.
pub fn refresh_sidebar(document: &Document) -> Result<(), JsValue> {
    let root = match document.get_element_by_id("asset-sidebar") {
        Some(existing) => existing,
        None => {
            let el = document.create_element("aside")?;
            el.set_id("asset-sidebar");
            el.set_class_name("asset-sidebar");
            if let Some(parent) = document.get_element_by_id("app-container") {
                parent.insert_before(&el, parent.first_child().as_ref())?;
            } else if let Some(body) = document.body() {
                body.append_child(&el)?;
            }
            el
        }
    };

    // Clone what we need so no borrow is held while touching the DOM.
    let (catalog, mime) = APP_STATE.with(|state| {
        let state = state.borrow();
        (state.catalog.clone(), state.config.drag_mime_type.clone())
    });

    root.set_inner_html("");

    let title = document.create_element("h2")?;
    title.set_class_name("sidebar-title");
    title.set_text_content(Some("Asset Library"));
    root.append_child(&title)?;

    let new_assets = section(document, &root, "Add New Assets")?;
    let agent_card = render_card(document, "👤", &catalog.agent.name, None)?;
    add_drag_listener(&agent_card, DropPayload::Agent(catalog.agent.clone()), mime.clone())?;
    new_assets.append_child(&agent_card)?;

    let existing = section(document, &root, "Choose from Existing Assets")?;
    let label = document.create_element("p")?;
    label.set_class_name("sidebar-label");
    label.set_text_content(Some("Tools"));
    existing.append_child(&label)?;

    for tool in &catalog.tools {
        let card = render_tool_card(document, tool)?;
        add_drag_listener(&card, DropPayload::Tool(tool.clone()), mime.clone())?;
        existing.append_child(&card)?;
    }

    Ok(())
}

fn section(document: &Document, root: &Element, heading: &str) -> Result<Element, JsValue> {
    let section = document.create_element("div")?;
    section.set_class_name("sidebar-section");
    let h3 = document.create_element("h3")?;
    h3.set_class_name("sidebar-heading");
    h3.set_text_content(Some(heading));
    section.append_child(&h3)?;
    root.append_child(&section)?;
    Ok(section)
}

fn render_tool_card(document: &Document, tool: &Tool) -> Result<Element, JsValue> {
    let card = render_card(document, "🔧", &tool.name, Some(&tool.description))?;
    card.set_attribute("data-tool-id", &tool.id)?;
    Ok(card)
}

fn render_card(document: &Document, icon: &str, title: &str, subtitle: Option<&str>) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("asset-card");
    card.set_attribute("draggable", "true")?;

    let icon_el = document.create_element("span")?;
    icon_el.set_class_name("asset-card-icon");
    icon_el.set_text_content(Some(icon));
    card.append_child(&icon_el)?;

    let text = document.create_element("div")?;
    text.set_class_name("asset-card-text");
    let name = document.create_element("span")?;
    name.set_class_name("asset-card-title");
    name.set_text_content(Some(title));
    text.append_child(&name)?;
    if let Some(subtitle) = subtitle {
        let desc = document.create_element("span")?;
        desc.set_class_name("asset-card-subtitle");
        desc.set_text_content(Some(subtitle));
        text.append_child(&desc)?;
    }
    card.append_child(&text)?;

    Ok(card)
}

fn add_drag_listener(element: &Element, payload: DropPayload, mime: String) -> Result<(), JsValue> {
    let ondragstart = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
        let Some(data_transfer) = event.data_transfer() else {
            return;
        };
        // An encoding failure just means this drag carries nothing for us.
        if let Err(e) = write_payload(&data_transfer, &mime, &payload) {
            crate::console_warn!("Failed to start drag: {:?}", e);
        }
    });
    element.add_event_listener_with_callback("dragstart", ondragstart.as_ref().unchecked_ref())?;
    ondragstart.forget(); // the card lives as long as the page

    Ok(())
}
