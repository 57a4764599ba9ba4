//! Canvas reducer.
//!
//! Handles drops on empty canvas, connections, pass-through node/edge changes,
//! selection, and the pointer/viewport gestures.  Drag events arrive here for
//! the whole canvas element and are routed by hit-testing: the topmost agent
//! node under the pointer takes the event, otherwise the canvas does.  A drop
//! handled by a node never reaches the canvas handler.

use crate::constants::{
    CONTROL_ZOOM_STEP, EDGE_HIT_TOLERANCE, FIT_VIEW_MAX_ZOOM, FIT_VIEW_PADDING, ZOOM_STEP_IN, ZOOM_STEP_OUT,
};
use crate::graph;
use crate::layout::{self, HitTarget};
use crate::messages::{Command, Message};
use crate::models::{Connection, EdgeChange, NodeChange, Position};
use crate::payload::{self, DropPayload};
use crate::reducers::agent_node;
use crate::state::{AppState, Gesture};

fn node_under(state: &AppState, screen: Position) -> Option<String> {
    let point = state.viewport.screen_to_canvas(screen);
    layout::node_at(&state.nodes, state.config.node_width, point).map(|n| n.id.clone())
}

fn clear_drag_hint(state: &mut AppState) -> bool {
    match state.drag_over_node.clone() {
        Some(node_id) => agent_node::drag_leave(state, &node_id),
        None => false,
    }
}

/// Move the drop hint to whichever node is under the pointer.
pub fn drag_over(state: &mut AppState, screen: Position, has_payload: bool) -> bool {
    let hovered = node_under(state, screen);
    if state.drag_over_node == hovered {
        return false;
    }
    let mut changed = clear_drag_hint(state);
    if let Some(node_id) = hovered {
        changed |= agent_node::drag_enter(state, &node_id, has_payload);
    }
    changed
}

/// Route a drop to the most specific target under the pointer.
pub fn route_drop(state: &mut AppState, screen: Position, data: Option<&str>) -> bool {
    match node_under(state, screen) {
        Some(node_id) => agent_node::drop_on_node(state, &node_id, data),
        None => {
            let hint_cleared = clear_drag_hint(state);
            drop_on_canvas(state, screen, data) || hint_cleared
        }
    }
}

/// Drop on empty canvas: only agent payloads create anything.  Callers have
/// already established that no node is under `screen`.
fn drop_on_canvas(state: &mut AppState, screen: Position, data: Option<&str>) -> bool {
    match payload::read_drop(data) {
        Some(DropPayload::Agent(template)) => {
            let position = state.viewport.screen_to_canvas(screen);
            let node_id = state.add_agent_node(template.name, position);
            crate::console_log!("Created node {} at ({}, {})", node_id, position.x, position.y);
            true
        }
        Some(DropPayload::Tool(tool)) => {
            crate::console_log!("Tool {} dropped on empty canvas, ignoring", tool.id);
            false
        }
        None => false,
    }
}

pub fn connect(state: &mut AppState, connection: &Connection) -> bool {
    match graph::add_edge(&state.nodes, &mut state.edges, connection) {
        Some(edge_id) => {
            crate::console_log!("Created new edge with ID: {}", edge_id);
            state.touch();
            true
        }
        None => false,
    }
}

pub fn apply_node_changes(state: &mut AppState, changes: &[NodeChange]) -> bool {
    let changed = graph::apply_node_changes(
        changes,
        &mut state.nodes,
        &mut state.edges,
        &mut state.selected_node,
    );
    if let Some(hinted) = state.drag_over_node.as_deref() {
        if state.node(hinted).is_none() {
            state.drag_over_node = None;
        }
    }
    // Removing a node may have taken the selected edge with it
    if let Some(edge_id) = state.selected_edge.as_deref() {
        if !state.edges.iter().any(|e| e.id == edge_id) {
            state.selected_edge = None;
        }
    }
    if changed {
        state.touch();
    }
    changed
}

pub fn apply_edge_changes(state: &mut AppState, changes: &[EdgeChange]) -> bool {
    let changed = graph::apply_edge_changes(changes, &mut state.edges, &mut state.selected_edge);
    if changed {
        state.touch();
    }
    changed
}

/// Select one node or edge (or nothing), dropping any other selection.
fn select(state: &mut AppState, node: Option<String>, edge: Option<String>) -> bool {
    let mut node_changes = Vec::new();
    if let Some(id) = state.selected_node.clone() {
        if node.as_deref() != Some(id.as_str()) {
            node_changes.push(NodeChange::Select { id, selected: false });
        }
    }
    if let Some(id) = node {
        node_changes.push(NodeChange::Select { id, selected: true });
    }

    let mut edge_changes = Vec::new();
    if let Some(id) = state.selected_edge.clone() {
        if edge.as_deref() != Some(id.as_str()) {
            edge_changes.push(EdgeChange::Select { id, selected: false });
        }
    }
    if let Some(id) = edge {
        edge_changes.push(EdgeChange::Select { id, selected: true });
    }

    let nodes_changed = apply_node_changes(state, &node_changes);
    apply_edge_changes(state, &edge_changes) || nodes_changed
}

fn pointer_down(state: &mut AppState, screen: Position) -> bool {
    let point = state.viewport.screen_to_canvas(screen);
    match layout::hit_test(&state.nodes, state.config.node_width, point) {
        HitTarget::RemoveTool { node_id, tool_id } => {
            state.gesture = Gesture::Idle;
            agent_node::delete_tool(state, &node_id, &tool_id)
        }
        HitTarget::SourceHandle { node_id } => {
            state.gesture = Gesture::Connecting { source: node_id, pointer: point };
            state.touch();
            true
        }
        HitTarget::TargetHandle { node_id } | HitTarget::Node { node_id } => {
            let Some(node) = state.node(&node_id) else {
                return false;
            };
            let grab_offset = Position::new(point.x - node.position.x, point.y - node.position.y);
            state.gesture = Gesture::MovingNode { node_id: node_id.clone(), grab_offset };
            select(state, Some(node_id), None)
        }
        HitTarget::Canvas => {
            let tolerance = EDGE_HIT_TOLERANCE / state.viewport.zoom;
            let edge = layout::edge_at(&state.nodes, &state.edges, state.config.node_width, point, tolerance)
                .map(|e| e.id.clone());
            match edge {
                Some(edge_id) => {
                    state.gesture = Gesture::Idle;
                    select(state, None, Some(edge_id))
                }
                None => {
                    state.gesture = Gesture::Panning { last: screen };
                    select(state, None, None)
                }
            }
        }
    }
}

fn pointer_move(state: &mut AppState, screen: Position) -> bool {
    let point = state.viewport.screen_to_canvas(screen);
    match state.gesture.clone() {
        Gesture::Idle => false,
        Gesture::MovingNode { node_id, grab_offset } => {
            let position = Position::new(point.x - grab_offset.x, point.y - grab_offset.y);
            apply_node_changes(state, &[NodeChange::Position { id: node_id, position }])
        }
        Gesture::Panning { last } => {
            state.viewport.pan_by(screen.x - last.x, screen.y - last.y);
            state.gesture = Gesture::Panning { last: screen };
            state.touch();
            true
        }
        Gesture::Connecting { source, .. } => {
            state.gesture = Gesture::Connecting { source, pointer: point };
            state.touch();
            true
        }
    }
}

fn pointer_up(state: &mut AppState, screen: Position) -> bool {
    let gesture = std::mem::replace(&mut state.gesture, Gesture::Idle);
    let Gesture::Connecting { source, .. } = gesture else {
        return false;
    };

    // The rubber band disappears whether or not an edge is created.
    state.touch();
    let point = state.viewport.screen_to_canvas(screen);
    let target = match layout::hit_test(&state.nodes, state.config.node_width, point) {
        HitTarget::TargetHandle { node_id }
        | HitTarget::Node { node_id }
        | HitTarget::SourceHandle { node_id }
        | HitTarget::RemoveTool { node_id, .. } => node_id,
        HitTarget::Canvas => return true,
    };
    if target != source {
        connect(state, &Connection::new(source, target));
    }
    true
}

/// Zoom by `factor` about `screen`, within the configured limits.
fn zoom_by(state: &mut AppState, screen: Position, factor: f64) -> bool {
    let new_zoom = state.config.clamp_zoom(state.viewport.zoom * factor);
    if new_zoom == state.viewport.zoom {
        return false;
    }
    state.viewport.zoom_at(screen, new_zoom);
    state.touch();
    true
}

fn wheel(state: &mut AppState, screen: Position, delta_y: f64) -> bool {
    let step = if delta_y > 0.0 { ZOOM_STEP_OUT } else { ZOOM_STEP_IN };
    zoom_by(state, screen, step)
}

/// Frame every node in the view.  No-op on an empty canvas.
pub fn fit_view(state: &mut AppState) -> bool {
    let Some(bounds) = layout::graph_bounds(&state.nodes, state.config.node_width) else {
        return false;
    };
    let max_zoom = FIT_VIEW_MAX_ZOOM.min(state.config.max_zoom);
    let min_zoom = state.config.min_zoom.min(max_zoom);
    let before = state.viewport;
    state.viewport.fit_bounds(bounds, FIT_VIEW_PADDING, min_zoom, max_zoom);
    if state.viewport == before {
        return false;
    }
    state.touch();
    true
}

fn delete_selected(state: &mut AppState) -> bool {
    if let Some(id) = state.selected_edge.clone() {
        crate::console_log!("Deleting edge {}", id);
        return apply_edge_changes(state, &[EdgeChange::Remove { id }]);
    }
    match state.selected_node.clone() {
        Some(id) => {
            crate::console_log!("Deleting node {}", id);
            apply_node_changes(state, &[NodeChange::Remove { id }])
        }
        None => false,
    }
}

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    let changed = match msg {
        Message::DragOver { screen, has_payload } => drag_over(state, *screen, *has_payload),
        Message::DragLeaveCanvas => clear_drag_hint(state),
        Message::Drop { screen, data } => route_drop(state, *screen, data.as_deref()),
        Message::NodesChanged(changes) => apply_node_changes(state, changes),
        Message::EdgesChanged(changes) => apply_edge_changes(state, changes),
        Message::PointerDown { screen } => pointer_down(state, *screen),
        Message::PointerMove { screen } => pointer_move(state, *screen),
        Message::PointerUp { screen } => pointer_up(state, *screen),
        Message::Wheel { screen, delta_y } => wheel(state, *screen, *delta_y),
        Message::ZoomIn => {
            let center = state.viewport.center();
            zoom_by(state, center, CONTROL_ZOOM_STEP)
        }
        Message::ZoomOut => {
            let center = state.viewport.center();
            zoom_by(state, center, 1.0 / CONTROL_ZOOM_STEP)
        }
        Message::FitView => fit_view(state),
        Message::DeleteSelected => delete_selected(state),
        Message::CanvasResized { width, height } => {
            state.viewport.width = *width;
            state.viewport.height = *height;
            state.touch();
            true
        }
        _ => return false,
    };
    if changed {
        cmds.push(Command::Redraw);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentTemplate, Tool};
    use crate::payload::encode;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn agent_drop() -> Option<String> {
        Some(encode(&DropPayload::Agent(AgentTemplate { name: "Single Agent".into() })).unwrap())
    }

    fn tool_drop(id: &str) -> Option<String> {
        let tool = Tool { id: id.into(), name: id.into(), description: String::new() };
        Some(encode(&DropPayload::Tool(tool)).unwrap())
    }

    fn run(state: &mut AppState, msg: Message) -> Vec<Command> {
        let mut cmds = Vec::new();
        assert!(update(state, &msg, &mut cmds), "canvas reducer should own {:?}", msg);
        cmds
    }

    #[test]
    fn agent_drop_uses_viewport_transform() {
        let mut state = AppState::new();
        state.viewport.zoom = 2.0;
        state.viewport.x = 10.0;

        let cmds = run(&mut state, Message::Drop { screen: Position::new(100.0, 100.0), data: agent_drop() });
        assert_eq!(cmds, [Command::Redraw]);
        assert_eq!(state.nodes.len(), 1);
        assert_eq!(state.nodes[0].position, Position::new(60.0, 50.0));
        assert_eq!(state.nodes[0].data.label, "Single Agent");
    }

    #[test]
    fn tool_drop_on_empty_canvas_changes_nothing() {
        let mut state = AppState::new();
        state.add_agent_node("A".into(), Position::default());
        let before = state.nodes.clone();
        let version = state.version;

        let cmds = run(&mut state, Message::Drop { screen: Position::new(900.0, 900.0), data: tool_drop("tool-1") });
        assert!(cmds.is_empty());
        assert_eq!(state.nodes, before);
        assert_eq!(state.version, version);
    }

    #[test]
    fn agent_drop_on_existing_node_is_discarded() {
        let mut state = AppState::new();
        state.add_agent_node("A".into(), Position::default());
        run(&mut state, Message::Drop { screen: Position::new(20.0, 20.0), data: agent_drop() });
        assert_eq!(state.nodes.len(), 1);
    }

    #[test]
    fn drag_over_moves_hint_between_nodes() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(500.0, 0.0));

        run(&mut state, Message::DragOver { screen: Position::new(10.0, 10.0), has_payload: true });
        assert_eq!(state.drag_over_node.as_deref(), Some(a.as_str()));

        run(&mut state, Message::DragOver { screen: Position::new(510.0, 10.0), has_payload: true });
        assert_eq!(state.drag_over_node.as_deref(), Some(b.as_str()));

        run(&mut state, Message::DragOver { screen: Position::new(400.0, 400.0), has_payload: true });
        assert_eq!(state.drag_over_node, None);

        run(&mut state, Message::DragOver { screen: Position::new(10.0, 10.0), has_payload: false });
        assert_eq!(state.drag_over_node, None, "foreign drags never light up a node");
    }

    #[test]
    fn drag_leaving_canvas_clears_hint() {
        let mut state = AppState::new();
        state.add_agent_node("A".into(), Position::default());
        run(&mut state, Message::DragOver { screen: Position::new(10.0, 10.0), has_payload: true });
        run(&mut state, Message::DragLeaveCanvas);
        assert_eq!(state.drag_over_node, None);
    }

    #[test]
    fn dragging_from_source_handle_connects_nodes() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(0.0, 400.0));
        let source = layout::layout_node(state.node(&a).unwrap(), state.config.node_width).source_handle;
        let target = layout::layout_node(state.node(&b).unwrap(), state.config.node_width).target_handle;

        run(&mut state, Message::PointerDown { screen: source });
        assert!(matches!(state.gesture, Gesture::Connecting { .. }));
        run(&mut state, Message::PointerMove { screen: Position::new(100.0, 300.0) });
        run(&mut state, Message::PointerUp { screen: target });

        assert_eq!(state.gesture, Gesture::Idle);
        assert_eq!(state.edges.len(), 1);
        assert_eq!(state.edges[0].source, a);
        assert_eq!(state.edges[0].target, b);
    }

    #[test]
    fn releasing_connection_on_canvas_creates_nothing() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let source = layout::layout_node(state.node(&a).unwrap(), state.config.node_width).source_handle;
        run(&mut state, Message::PointerDown { screen: source });
        run(&mut state, Message::PointerUp { screen: Position::new(900.0, 900.0) });
        assert!(state.edges.is_empty());
        assert_eq!(state.gesture, Gesture::Idle);
    }

    #[test]
    fn dragging_a_node_moves_and_selects_it() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        run(&mut state, Message::PointerDown { screen: Position::new(50.0, 40.0) });
        assert_eq!(state.selected_node.as_deref(), Some(a.as_str()));
        run(&mut state, Message::PointerMove { screen: Position::new(150.0, 90.0) });
        run(&mut state, Message::PointerUp { screen: Position::new(150.0, 90.0) });
        assert_eq!(state.node(&a).unwrap().position, Position::new(100.0, 50.0));
        assert_eq!(state.gesture, Gesture::Idle);
    }

    #[test]
    fn clicking_remove_button_detaches_tool() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        agent_node::drop_on_node(&mut state, &a, tool_drop("tool-1").as_deref());
        let remove = layout::layout_node(state.node(&a).unwrap(), state.config.node_width).pills[0].remove;

        run(&mut state, Message::PointerDown { screen: Position::new(remove.x + 2.0, remove.y + 2.0) });
        assert!(state.node(&a).unwrap().data.tools.is_empty());
        assert_eq!(state.gesture, Gesture::Idle);
    }

    #[test]
    fn panning_and_zooming_update_viewport() {
        let mut state = AppState::new();
        run(&mut state, Message::PointerDown { screen: Position::new(100.0, 100.0) });
        run(&mut state, Message::PointerMove { screen: Position::new(130.0, 80.0) });
        run(&mut state, Message::PointerUp { screen: Position::new(130.0, 80.0) });
        assert_eq!((state.viewport.x, state.viewport.y), (-30.0, 20.0));

        run(&mut state, Message::Wheel { screen: Position::new(0.0, 0.0), delta_y: -1.0 });
        assert!((state.viewport.zoom - ZOOM_STEP_IN).abs() < 1e-12);

        state.viewport.zoom = state.config.max_zoom;
        let cmds = run(&mut state, Message::Wheel { screen: Position::default(), delta_y: -1.0 });
        assert!(cmds.is_empty(), "zoom is already at its limit");
    }

    #[test]
    fn delete_selected_removes_node_and_edges() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(0.0, 400.0));
        connect(&mut state, &Connection::new(a.clone(), b.clone()));
        run(&mut state, Message::NodesChanged(vec![NodeChange::Select { id: a.clone(), selected: true }]));

        run(&mut state, Message::DeleteSelected);
        assert!(state.node(&a).is_none());
        assert!(state.edges.is_empty());
        assert_eq!(state.selected_node, None);

        let cmds = run(&mut state, Message::DeleteSelected);
        assert!(cmds.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let mut state = AppState::new();
        run(&mut state, Message::Drop { screen: Position::new(0.0, 0.0), data: agent_drop() });
        let first = state.nodes[0].id.clone();
        run(&mut state, Message::NodesChanged(vec![NodeChange::Remove { id: first.clone() }]));
        run(&mut state, Message::Drop { screen: Position::new(0.0, 0.0), data: agent_drop() });
        assert_eq!(state.nodes.len(), 1);
        assert_ne!(state.nodes[0].id, first);
    }

    fn edge_midpoint(state: &AppState, edge_index: usize) -> Position {
        let (from, to) =
            layout::edge_endpoints(&state.nodes, state.config.node_width, &state.edges[edge_index]).unwrap();
        let [start, c1, c2, end] = layout::edge_curve(from, to);
        // Cubic bezier at t = 0.5
        Position::new(
            (start.x + 3.0 * c1.x + 3.0 * c2.x + end.x) / 8.0,
            (start.y + 3.0 * c1.y + 3.0 * c2.y + end.y) / 8.0,
        )
    }

    #[test]
    fn clicking_an_edge_selects_it_and_delete_removes_it() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(0.0, 400.0));
        let c = state.add_agent_node("C".into(), Position::new(500.0, 400.0));
        connect(&mut state, &Connection::new(a.clone(), b.clone()));
        connect(&mut state, &Connection::new(a.clone(), c.clone()));
        run(&mut state, Message::PointerDown { screen: Position::new(50.0, 40.0) });
        assert_eq!(state.selected_node.as_deref(), Some(a.as_str()));
        run(&mut state, Message::PointerUp { screen: Position::new(50.0, 40.0) });

        let mid = edge_midpoint(&state, 0);
        let cmds = run(&mut state, Message::PointerDown { screen: mid });
        assert_eq!(cmds, [Command::Redraw]);
        assert_eq!(state.selected_edge.as_deref(), Some(state.edges[0].id.as_str()));
        assert_eq!(state.selected_node, None, "selecting an edge drops the node selection");
        assert_eq!(state.gesture, Gesture::Idle);

        run(&mut state, Message::DeleteSelected);
        assert_eq!(state.nodes.len(), 3, "only the edge goes");
        assert_eq!(state.edges.len(), 1);
        assert_eq!(state.edges[0].target, c);
        assert_eq!(state.selected_edge, None);
    }

    #[test]
    fn clicking_empty_canvas_clears_edge_selection() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(0.0, 400.0));
        connect(&mut state, &Connection::new(a, b));
        let id = state.edges[0].id.clone();
        run(&mut state, Message::EdgesChanged(vec![EdgeChange::Select { id, selected: true }]));
        assert!(state.selected_edge.is_some());

        run(&mut state, Message::PointerDown { screen: Position::new(700.0, 200.0) });
        assert_eq!(state.selected_edge, None);
        assert!(matches!(state.gesture, Gesture::Panning { .. }));
    }

    #[test]
    fn removing_a_node_clears_selection_of_its_edge() {
        let mut state = AppState::new();
        let a = state.add_agent_node("A".into(), Position::new(0.0, 0.0));
        let b = state.add_agent_node("B".into(), Position::new(0.0, 400.0));
        connect(&mut state, &Connection::new(a, b.clone()));
        let id = state.edges[0].id.clone();
        run(&mut state, Message::EdgesChanged(vec![EdgeChange::Select { id, selected: true }]));

        run(&mut state, Message::NodesChanged(vec![NodeChange::Remove { id: b }]));
        assert!(state.edges.is_empty());
        assert_eq!(state.selected_edge, None);
    }

    #[test]
    fn fit_view_frames_all_nodes_within_zoom_limits() {
        let mut state = AppState::new();
        assert!(run(&mut state, Message::FitView).is_empty(), "nothing to frame");

        state.add_agent_node("A".into(), Position::new(-2000.0, -1000.0));
        state.add_agent_node("B".into(), Position::new(3000.0, 2500.0));
        run(&mut state, Message::FitView);

        let vp = state.viewport;
        assert!(vp.zoom >= state.config.min_zoom && vp.zoom <= FIT_VIEW_MAX_ZOOM);
        let bounds = layout::graph_bounds(&state.nodes, state.config.node_width).unwrap();
        let top_left = vp.canvas_to_screen(Position::new(bounds.x, bounds.y));
        let bottom_right = vp.canvas_to_screen(Position::new(bounds.right(), bounds.bottom()));
        assert!(top_left.x >= 0.0 && top_left.y >= 0.0);
        assert!(bottom_right.x <= vp.width + 1e-9 && bottom_right.y <= vp.height + 1e-9);

        // Fitting again changes nothing
        assert!(run(&mut state, Message::FitView).is_empty());
    }

    #[test]
    fn fit_view_does_not_magnify_a_single_node() {
        let mut state = AppState::new();
        state.viewport.zoom = 3.0;
        state.add_agent_node("A".into(), Position::new(100.0, 100.0));
        run(&mut state, Message::FitView);
        assert_eq!(state.viewport.zoom, FIT_VIEW_MAX_ZOOM);
    }

    #[test]
    fn zoom_controls_step_about_the_view_centre() {
        let mut state = AppState::new();
        let centre = state.viewport.center();
        let anchor = state.viewport.screen_to_canvas(centre);

        run(&mut state, Message::ZoomIn);
        assert!((state.viewport.zoom - CONTROL_ZOOM_STEP).abs() < 1e-12);
        let moved = state.viewport.screen_to_canvas(centre);
        assert!((moved.x - anchor.x).abs() < 1e-9 && (moved.y - anchor.y).abs() < 1e-9);

        run(&mut state, Message::ZoomOut);
        assert!((state.viewport.zoom - 1.0).abs() < 1e-12);

        state.viewport.zoom = state.config.min_zoom;
        assert!(run(&mut state, Message::ZoomOut).is_empty());
    }

    proptest! {
        #[test]
        fn node_ids_stay_unique_across_drops_and_deletions(ops in prop::collection::vec(any::<Option<u8>>(), 1..40)) {
            let mut state = AppState::new();
            let mut seen = HashSet::new();
            let mut drops = 0.0;
            for op in ops {
                match op {
                    // Far apart so every drop lands on empty canvas
                    None => {
                        let x = 1000.0 * drops;
                        drops += 1.0;
                        run(&mut state, Message::Drop { screen: Position::new(x, 0.0), data: agent_drop() });
                        let id = state.nodes.last().unwrap().id.clone();
                        prop_assert!(seen.insert(id));
                    }
                    Some(pick) if !state.nodes.is_empty() => {
                        let id = state.nodes[pick as usize % state.nodes.len()].id.clone();
                        run(&mut state, Message::NodesChanged(vec![NodeChange::Remove { id }]));
                    }
                    Some(_) => {}
                }
            }
            let live: HashSet<_> = state.nodes.iter().map(|n| n.id.clone()).collect();
            prop_assert_eq!(live.len(), state.nodes.len());
        }
    }
}
