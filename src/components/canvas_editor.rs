//! Canvas element setup and DOM event wiring.
//!
//! Every listener here only translates the browser event into a `Message`
//! and dispatches it; hit-testing and state changes happen in the reducers.
//! Positions are measured against the canvas' bounding rect when the event
//! arrives, so layout shifts around the canvas never skew them.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, DragEvent, Element, Event, HtmlCanvasElement,
    HtmlElement, KeyboardEvent, MouseEvent, WheelEvent,
};

use crate::constants::DROP_EFFECT_MOVE;
use crate::messages::Message;
use crate::models::Position;
use crate::state::{dispatch_global_message, Gesture, APP_STATE};

pub fn setup_canvas(document: &Document) -> Result<(), JsValue> {
    let container = match document.get_element_by_id("canvas-container") {
        Some(existing) => existing,
        None => {
            let el = document.create_element("div")?;
            el.set_id("canvas-container");
            el.set_class_name("canvas-container");
            match document.get_element_by_id("app-container") {
                Some(parent) => parent.append_child(&el)?,
                None => document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?
                    .append_child(&el)?,
            };
            el
        }
    };

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id("node-canvas");
    container.append_child(&canvas)?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.canvas = Some(canvas.clone());
        state.context = Some(context);
    });

    resize_canvas(&canvas)?;
    create_controls(document, &container)?;

    setup_drag_events(&canvas)?;
    setup_pointer_events(&canvas)?;
    setup_keyboard_events(document)?;
    setup_resize_handler(&canvas)?;

    // Frame whatever is already on the canvas
    dispatch_global_message(Message::FitView);

    Ok(())
}

/// Match the bitmap to the container at device pixel ratio and report the
/// new CSS size to the viewport.
pub fn resize_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let dpr = window.device_pixel_ratio();

    let (width, height) = match canvas.parent_element() {
        Some(container) => (container.client_width() as f64, container.client_height() as f64),
        None => (window.inner_width()?.as_f64().unwrap_or(800.0), window.inner_height()?.as_f64().unwrap_or(600.0)),
    };

    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    canvas.style().set_property("width", &format!("{}px", width))?;
    canvas.style().set_property("height", &format!("{}px", height))?;

    dispatch_global_message(Message::CanvasResized { width, height });
    Ok(())
}

/// Event position relative to the canvas' top-left corner, in CSS pixels.
/// The rect is read on every call; the sidebar, page scroll or the host's
/// own layout can move the canvas at any time.
pub fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Position {
    let rect = canvas.get_bounding_client_rect();
    Position::new(
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

/// Whether the drag advertises our mime type.  The payload itself is only
/// readable on drop, so this is all the hint logic gets to see.
fn has_payload(event: &DragEvent) -> bool {
    let mime = APP_STATE.with(|state| state.borrow().config.drag_mime_type.clone());
    event
        .data_transfer()
        .map(|dt| dt.types().iter().any(|t| t.as_string().as_deref() == Some(mime.as_str())))
        .unwrap_or(false)
}

fn setup_drag_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Accepting the drop requires preventing the default on dragover
    let canvas_clone = canvas.clone();
    let ondragover = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
        event.prevent_default();
        if let Some(dt) = event.data_transfer() {
            dt.set_drop_effect(DROP_EFFECT_MOVE);
        }
        dispatch_global_message(Message::DragOver {
            screen: canvas_point(&canvas_clone, &event),
            has_payload: has_payload(&event),
        });
    });
    canvas.add_event_listener_with_callback("dragover", ondragover.as_ref().unchecked_ref())?;
    ondragover.forget();

    let ondragleave = Closure::<dyn FnMut(_)>::new(move |_event: DragEvent| {
        dispatch_global_message(Message::DragLeaveCanvas);
    });
    canvas.add_event_listener_with_callback("dragleave", ondragleave.as_ref().unchecked_ref())?;
    ondragleave.forget();

    let canvas_clone = canvas.clone();
    let ondrop = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
        event.prevent_default();
        let mime = APP_STATE.with(|state| state.borrow().config.drag_mime_type.clone());
        let data = event
            .data_transfer()
            .and_then(|dt| dt.get_data(&mime).ok())
            .filter(|s| !s.is_empty());
        dispatch_global_message(Message::Drop {
            screen: canvas_point(&canvas_clone, &event),
            data,
        });
    });
    canvas.add_event_listener_with_callback("drop", ondrop.as_ref().unchecked_ref())?;
    ondrop.forget();

    Ok(())
}

fn setup_pointer_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;

    let canvas_clone = canvas.clone();
    let mousedown = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        if event.button() != 0 {
            return;
        }
        dispatch_global_message(Message::PointerDown { screen: canvas_point(&canvas_clone, &event) });
    });
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    // Move/up are tracked on the window so gestures survive leaving the canvas
    let canvas_clone = canvas.clone();
    let mousemove = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        let idle = APP_STATE.with(|state| state.borrow().gesture == Gesture::Idle);
        if !idle {
            dispatch_global_message(Message::PointerMove { screen: canvas_point(&canvas_clone, &event) });
        }
    });
    window.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
    mousemove.forget();

    let canvas_clone = canvas.clone();
    let mouseup = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
        dispatch_global_message(Message::PointerUp { screen: canvas_point(&canvas_clone, &event) });
    });
    window.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
    mouseup.forget();

    let canvas_clone = canvas.clone();
    let wheel = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
        event.prevent_default();
        dispatch_global_message(Message::Wheel {
            screen: canvas_point(&canvas_clone, &event),
            delta_y: event.delta_y(),
        });
    });
    // Non-passive so prevent_default stops the page from scrolling
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &options,
    )?;
    wheel.forget();

    Ok(())
}

/// Keys typed into form fields or contenteditable regions belong to the
/// host page, not the canvas.
pub fn is_editable_target(event: &Event) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    if element.is_content_editable() {
        return true;
    }
    matches!(
        element.tag_name().to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}

fn setup_keyboard_events(document: &Document) -> Result<(), JsValue> {
    let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        if !matches!(event.key().as_str(), "Delete" | "Backspace") || is_editable_target(&event) {
            return;
        }
        let has_selection = APP_STATE.with(|state| {
            let state = state.borrow();
            state.selected_node.is_some() || state.selected_edge.is_some()
        });
        if has_selection {
            event.prevent_default();
            dispatch_global_message(Message::DeleteSelected);
        }
    });
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();
    Ok(())
}

/// Zoom in / zoom out / fit view buttons in the canvas' bottom-left corner.
fn create_controls(document: &Document, container: &Element) -> Result<(), JsValue> {
    if document.get_element_by_id("canvas-controls").is_some() {
        return Ok(());
    }
    if let Some(container) = container.dyn_ref::<HtmlElement>() {
        container.style().set_property("position", "relative")?;
    }

    let controls = document.create_element("div")?;
    controls.set_id("canvas-controls");
    controls.set_class_name("canvas-controls");
    controls.set_attribute(
        "style",
        "position: absolute; left: 12px; bottom: 12px; display: flex; flex-direction: column; gap: 4px;",
    )?;

    for (label, title, message) in [
        ("+", "Zoom in", Message::ZoomIn),
        ("−", "Zoom out", Message::ZoomOut),
        ("⤢", "Fit view", Message::FitView),
    ] {
        let button = document.create_element("button")?;
        button.set_class_name("canvas-control-button");
        button.set_attribute("type", "button")?;
        button.set_attribute("title", title)?;
        button.set_text_content(Some(label));

        let onclick = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            dispatch_global_message(message.clone());
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();

        controls.append_child(&button)?;
    }

    container.append_child(&controls)?;
    Ok(())
}

fn setup_resize_handler(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let canvas_clone = canvas.clone();
    let resize_callback = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = resize_canvas(&canvas_clone) {
            crate::console_error!("Failed to resize canvas: {:?}", e);
        }
    });
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no global window exists"))?
        .add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
    // Leak the closure to keep it alive for the lifetime of the application
    resize_callback.forget();
    Ok(())
}
