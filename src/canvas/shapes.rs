use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::constants::*;
use crate::layout::{self, Rect};
use crate::models::Position;

/// Trace a rounded rectangle; the caller fills and/or strokes it.
pub fn rounded_rect_path(context: &CanvasRenderingContext2d, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

    context.begin_path();
    context.move_to(x + r, y);
    context.line_to(x + w - r, y);
    context.quadratic_curve_to(x + w, y, x + w, y + r);
    context.line_to(x + w, y + h - r);
    context.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    context.line_to(x + r, y + h);
    context.quadratic_curve_to(x, y + h, x, y + h - r);
    context.line_to(x, y + r);
    context.quadratic_curve_to(x, y, x + r, y);
    context.close_path();
}

pub fn set_dashed(context: &CanvasRenderingContext2d, dashed: bool) {
    let pattern = if dashed {
        js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(3.0))
    } else {
        js_sys::Array::new()
    };
    let _ = context.set_line_dash(&pattern);
}

/// Smooth S-curve from a bottom handle down to a top handle.
pub fn draw_bezier_edge(context: &CanvasRenderingContext2d, from: Position, to: Position, color: &str, line_width: f64) {
    let [start, c1, c2, end] = layout::edge_curve(from, to);

    context.begin_path();
    context.move_to(start.x, start.y);
    context.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
    context.set_stroke_style_str(color);
    context.set_line_width(line_width);
    context.stroke();
}

pub fn draw_handle(context: &CanvasRenderingContext2d, at: Position) {
    context.begin_path();
    let _ = context.arc(at.x, at.y, HANDLE_RADIUS, 0.0, 2.0 * std::f64::consts::PI);
    context.set_fill_style_str(HANDLE_COLOR);
    context.fill();
    context.set_stroke_style_str(NODE_FILL_AGENT);
    context.set_line_width(1.5);
    context.stroke();
}
