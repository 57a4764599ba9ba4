use web_sys::CanvasRenderingContext2d;

use super::shapes;
use crate::constants::*;
use crate::layout::{self, NodeLayout};
use crate::models::AgentNode;
use crate::state::{AppState, Gesture};
use crate::viewport::Viewport;

pub fn draw(state: &AppState) {
    let (Some(canvas_el), Some(context)) = (&state.canvas, &state.context) else {
        return;
    };

    let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);

    // Reset any previous transforms and clear with the background colour
    let _ = context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, canvas_el.width() as f64, canvas_el.height() as f64);
    let _ = context.scale(dpr, dpr);

    draw_grid(context, &state.viewport, state.config.grid_spacing);

    // Apply viewport transform (scale and translate)
    context.save();
    let vp = &state.viewport;
    let _ = context.scale(vp.zoom, vp.zoom);
    let _ = context.translate(-vp.x, -vp.y);

    let width = state.config.node_width;
    let layouts: Vec<NodeLayout> = state.nodes.iter().map(|n| layout::layout_node(n, width)).collect();

    // Edges first so nodes sit on top of them
    for edge in &state.edges {
        let source = state.node_index(&edge.source);
        let target = state.node_index(&edge.target);
        if let (Some(s), Some(t)) = (source, target) {
            let (color, line_width) = if state.selected_edge.as_deref() == Some(edge.id.as_str()) {
                (NODE_BORDER_SELECTED, 3.0)
            } else {
                (CONNECTION_LINE_COLOR, 2.0)
            };
            shapes::draw_bezier_edge(
                context,
                layouts[s].source_handle,
                layouts[t].target_handle,
                color,
                line_width,
            );
        }
    }

    if let Gesture::Connecting { source, pointer } = &state.gesture {
        if let Some(s) = state.node_index(source) {
            shapes::draw_bezier_edge(context, layouts[s].source_handle, *pointer, NODE_BORDER_SELECTED, 2.0);
        }
    }

    for (node, node_layout) in state.nodes.iter().zip(&layouts) {
        let hinted = state.drag_over_node.as_deref() == Some(node.id.as_str());
        let selected = state.selected_node.as_deref() == Some(node.id.as_str());
        draw_agent_node(context, node, node_layout, hinted, selected);
    }

    context.restore();
}

/// Dotted background, drawn in screen space so dots stay crisp at any zoom.
fn draw_grid(context: &CanvasRenderingContext2d, vp: &Viewport, spacing: f64) {
    let step = spacing * vp.zoom;
    if step < 4.0 {
        return;
    }
    let offset_x = (-vp.x * vp.zoom).rem_euclid(step);
    let offset_y = (-vp.y * vp.zoom).rem_euclid(step);

    context.set_fill_style_str(GRID_DOT_COLOR);
    let mut x = offset_x;
    while x < vp.width {
        let mut y = offset_y;
        while y < vp.height {
            context.fill_rect(x - 0.75, y - 0.75, 1.5, 1.5);
            y += step;
        }
        x += step;
    }
}

fn draw_agent_node(
    context: &CanvasRenderingContext2d,
    node: &AgentNode,
    node_layout: &NodeLayout,
    hinted: bool,
    selected: bool,
) {
    let bounds = node_layout.bounds;
    context.save();

    // Card
    context.set_shadow_color("rgba(0, 0, 0, 0.35)");
    context.set_shadow_blur(12.0);
    context.set_shadow_offset_y(4.0);
    context.set_fill_style_str(NODE_FILL_AGENT);
    shapes::rounded_rect_path(context, bounds, 8.0);
    context.fill();
    context.set_shadow_blur(0.0);
    context.set_shadow_offset_y(0.0);

    if selected {
        context.set_stroke_style_str(NODE_BORDER_SELECTED);
        context.set_line_width(3.0);
    } else {
        context.set_stroke_style_str(NODE_BORDER_AGENT);
        context.set_line_width(2.0);
    }
    context.stroke();

    // Header: icon, label and model line
    let header_x = bounds.x + NODE_PADDING;
    let header_y = bounds.y + NODE_PADDING;
    context.set_text_align("left");
    context.set_text_baseline("top");
    context.set_font("18px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str("#60a5fa");
    let _ = context.fill_text("👤", header_x, header_y + 6.0);

    context.set_font("bold 14px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(TEXT_PRIMARY);
    let _ = context.fill_text(&node.data.label, header_x + 30.0, header_y + 2.0);

    context.set_font("11px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(TEXT_MUTED);
    let model = format!("{} {}", node.data.model_family, node.data.model_name);
    let _ = context.fill_text(&model, header_x + 30.0, header_y + 22.0);

    // Tool drop zone
    let zone = node_layout.tool_zone;
    shapes::rounded_rect_path(context, zone, 6.0);
    if hinted {
        context.set_fill_style_str(TOOL_ZONE_FILL_ACTIVE);
        context.fill();
        context.set_stroke_style_str(TOOL_ZONE_BORDER_ACTIVE);
    } else {
        context.set_stroke_style_str(TOOL_ZONE_BORDER);
    }
    context.set_line_width(1.0);
    shapes::set_dashed(context, true);
    context.stroke();
    shapes::set_dashed(context, false);

    context.set_font("13px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str("#d1d5db");
    let title = format!("Tools ({})", node.data.tools.len());
    let _ = context.fill_text(&title, zone.x + 8.0, zone.y + 8.0);

    if node.data.tools.is_empty() {
        let placeholder = if hinted { "Release to add tool" } else { "Drop tool here" };
        context.set_font("11px system-ui, -apple-system, sans-serif");
        context.set_fill_style_str(TEXT_SUBTLE);
        context.set_text_align("center");
        let _ = context.fill_text(placeholder, zone.x + zone.width / 2.0, zone.y + TOOL_ZONE_TITLE_HEIGHT + 10.0);
        context.set_text_align("left");
    }

    // Tool pills
    context.set_font("11px system-ui, -apple-system, sans-serif");
    context.set_text_baseline("middle");
    for (tool, pill) in node.data.tools.iter().zip(&node_layout.pills) {
        shapes::rounded_rect_path(context, pill.rect, pill.rect.height / 2.0);
        context.set_fill_style_str(TOOL_PILL_FILL);
        context.fill();

        // Long names are clipped to the pill
        context.save();
        shapes::rounded_rect_path(context, pill.rect, pill.rect.height / 2.0);
        context.clip();
        context.set_fill_style_str(TEXT_PRIMARY);
        let mid_y = pill.rect.y + pill.rect.height / 2.0;
        let _ = context.fill_text("🔧", pill.rect.x + 6.0, mid_y);
        let _ = context.fill_text(&tool.name, pill.rect.x + TOOL_PILL_ICON_WIDTH, mid_y);
        context.restore();

        context.set_text_align("center");
        context.set_fill_style_str(TEXT_PRIMARY);
        let _ = context.fill_text(
            "×",
            pill.remove.x + pill.remove.width / 2.0,
            pill.remove.y + pill.remove.height / 2.0,
        );
        context.set_text_align("left");
    }

    // Connection handles
    shapes::draw_handle(context, node_layout.target_handle);
    shapes::draw_handle(context, node_layout.source_handle);

    context.restore();
}
