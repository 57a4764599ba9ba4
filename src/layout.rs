//! Node geometry and hit-testing in canvas space.
//!
//! The renderer draws exactly the rectangles computed here and the reducers
//! hit-test against the same rectangles, so what the user sees is what the
//! pointer hits.

use unicode_segmentation::UnicodeSegmentation;

use crate::constants::*;
use crate::models::{AgentNode, Edge, Position, Tool};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PillLayout {
    pub tool_id: String,
    pub rect: Rect,
    pub remove: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub bounds: Rect,
    pub tool_zone: Rect,
    pub pills: Vec<PillLayout>,
    pub target_handle: Position,
    pub source_handle: Position,
}

/// Estimated on-screen width of a tool pill.
pub fn pill_width(tool: &Tool) -> f64 {
    let chars = tool.name.graphemes(true).count() as f64;
    TOOL_PILL_ICON_WIDTH + chars * TOOL_PILL_CHAR_WIDTH + TOOL_PILL_REMOVE_SIZE + 12.0
}

pub fn layout_node(node: &AgentNode, width: f64) -> NodeLayout {
    let Position { x, y } = node.position;
    let inner_x = x + NODE_PADDING;
    let inner_width = width - 2.0 * NODE_PADDING;
    let zone_y = y + NODE_PADDING + NODE_HEADER_HEIGHT;

    // Pills flow left to right and wrap inside the tool zone.
    let row_start = inner_x + 8.0;
    let row_end = inner_x + inner_width - 8.0;
    let mut cursor_x = row_start;
    let mut cursor_y = zone_y + 8.0 + TOOL_ZONE_TITLE_HEIGHT;
    let mut pills = Vec::with_capacity(node.data.tools.len());

    for tool in &node.data.tools {
        let w = pill_width(tool).min(row_end - row_start);
        if cursor_x > row_start && cursor_x + w > row_end {
            cursor_x = row_start;
            cursor_y += TOOL_PILL_HEIGHT + TOOL_PILL_GAP;
        }
        let rect = Rect::new(cursor_x, cursor_y, w, TOOL_PILL_HEIGHT);
        let remove = Rect::new(
            rect.right() - 4.0 - TOOL_PILL_REMOVE_SIZE,
            rect.y + (TOOL_PILL_HEIGHT - TOOL_PILL_REMOVE_SIZE) / 2.0,
            TOOL_PILL_REMOVE_SIZE,
            TOOL_PILL_REMOVE_SIZE,
        );
        pills.push(PillLayout {
            tool_id: tool.id.clone(),
            rect,
            remove,
        });
        cursor_x += w + TOOL_PILL_GAP;
    }

    let content_height = match pills.last() {
        Some(last) => last.rect.bottom() + 8.0 - zone_y,
        None => 0.0,
    };
    let zone_height = content_height.max(TOOL_ZONE_MIN_HEIGHT);
    let tool_zone = Rect::new(inner_x, zone_y, inner_width, zone_height);

    let height = NODE_PADDING + NODE_HEADER_HEIGHT + zone_height + NODE_PADDING;
    let bounds = Rect::new(x, y, width, height);

    NodeLayout {
        bounds,
        tool_zone,
        pills,
        target_handle: Position::new(x + width / 2.0, y),
        source_handle: Position::new(x + width / 2.0, y + height),
    }
}

/// What sits under a canvas-space point, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    RemoveTool { node_id: String, tool_id: String },
    SourceHandle { node_id: String },
    TargetHandle { node_id: String },
    Node { node_id: String },
    Canvas,
}

fn near(a: Position, b: Position, radius: f64) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy <= radius * radius
}

/// Nodes later in the collection are drawn on top, so they are tested first.
pub fn hit_test(nodes: &[AgentNode], width: f64, point: Position) -> HitTarget {
    let grab_radius = HANDLE_RADIUS * 2.0;
    for node in nodes.iter().rev() {
        let layout = layout_node(node, width);
        if near(point, layout.source_handle, grab_radius) {
            return HitTarget::SourceHandle { node_id: node.id.clone() };
        }
        if near(point, layout.target_handle, grab_radius) {
            return HitTarget::TargetHandle { node_id: node.id.clone() };
        }
        if !layout.bounds.contains(point) {
            continue;
        }
        if let Some(pill) = layout.pills.iter().find(|p| p.remove.contains(point)) {
            return HitTarget::RemoveTool {
                node_id: node.id.clone(),
                tool_id: pill.tool_id.clone(),
            };
        }
        return HitTarget::Node { node_id: node.id.clone() };
    }
    HitTarget::Canvas
}

/// Topmost node whose box contains `point`.
pub fn node_at<'a>(nodes: &'a [AgentNode], width: f64, point: Position) -> Option<&'a AgentNode> {
    nodes
        .iter()
        .rev()
        .find(|node| layout_node(node, width).bounds.contains(point))
}

/// Control points of the S-curve from a source handle down to a target
/// handle.  The renderer strokes exactly this curve.
pub fn edge_curve(from: Position, to: Position) -> [Position; 4] {
    let bend = ((to.y - from.y).abs() / 2.0).max(40.0);
    [
        from,
        Position::new(from.x, from.y + bend),
        Position::new(to.x, to.y - bend),
        to,
    ]
}

fn bezier_point(c: &[Position; 4], t: f64) -> Position {
    let u = 1.0 - t;
    let (a, b, cc, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Position::new(
        a * c[0].x + b * c[1].x + cc * c[2].x + d * c[3].x,
        a * c[0].y + b * c[1].y + cc * c[2].y + d * c[3].y,
    )
}

fn distance_to_segment(p: Position, a: Position, b: Position) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    (cx * cx + cy * cy).sqrt()
}

/// Handle positions of `edge`, or `None` if either end is not a live node.
pub fn edge_endpoints(nodes: &[AgentNode], width: f64, edge: &Edge) -> Option<(Position, Position)> {
    let source = nodes.iter().find(|n| n.id == edge.source)?;
    let target = nodes.iter().find(|n| n.id == edge.target)?;
    Some((
        layout_node(source, width).source_handle,
        layout_node(target, width).target_handle,
    ))
}

/// Topmost edge whose curve passes within `tolerance` of `point`.
pub fn edge_at<'a>(
    nodes: &[AgentNode],
    edges: &'a [Edge],
    width: f64,
    point: Position,
    tolerance: f64,
) -> Option<&'a Edge> {
    const SAMPLES: usize = 24;
    edges.iter().rev().find(|edge| {
        let Some((from, to)) = edge_endpoints(nodes, width, edge) else {
            return false;
        };
        let curve = edge_curve(from, to);
        let mut prev = from;
        (1..=SAMPLES).any(|i| {
            let next = bezier_point(&curve, i as f64 / SAMPLES as f64);
            let hit = distance_to_segment(point, prev, next) <= tolerance;
            prev = next;
            hit
        })
    })
}

/// Smallest rectangle containing every node, or `None` for an empty graph.
pub fn graph_bounds(nodes: &[AgentNode], width: f64) -> Option<Rect> {
    let mut boxes = nodes.iter().map(|n| layout_node(n, width).bounds);
    let first = boxes.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.right(), first.bottom());
    for b in boxes {
        min_x = min_x.min(b.x);
        min_y = min_y.min(b.y);
        max_x = max_x.max(b.right());
        max_y = max_y.max(b.bottom());
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}
