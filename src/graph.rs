//! Node/edge collection helpers: the edge-merge used for new connections and
//! the pass-through change application for moves, removals and selection.

use crate::models::{AgentNode, Connection, Edge, EdgeChange, NodeChange};

pub fn edge_id(connection: &Connection) -> String {
    format!(
        "xy-edge__{}{}-{}{}",
        connection.source,
        connection.source_handle.as_deref().unwrap_or_default(),
        connection.target,
        connection.target_handle.as_deref().unwrap_or_default(),
    )
}

fn same_endpoints(edge: &Edge, connection: &Connection) -> bool {
    edge.source == connection.source
        && edge.target == connection.target
        && edge.source_handle == connection.source_handle
        && edge.target_handle == connection.target_handle
}

/// Merge a connection into `edges`.  Returns the new edge id, or `None` when
/// the connection is incomplete, dangling, or already present.  Loops are
/// accepted here; the connect gesture never produces one.
pub fn add_edge(nodes: &[AgentNode], edges: &mut Vec<Edge>, connection: &Connection) -> Option<String> {
    if connection.source.is_empty() || connection.target.is_empty() {
        return None;
    }
    let exists = |id: &str| nodes.iter().any(|n| n.id == id);
    if !exists(&connection.source) || !exists(&connection.target) {
        return None;
    }
    if edges.iter().any(|e| same_endpoints(e, connection)) {
        return None;
    }

    let id = edge_id(connection);
    edges.push(Edge {
        id: id.clone(),
        source: connection.source.clone(),
        target: connection.target.clone(),
        source_handle: connection.source_handle.clone(),
        target_handle: connection.target_handle.clone(),
    });
    Some(id)
}

/// Apply node changes in order.  Removing a node also drops every edge
/// touching it and clears the selection if it pointed at that node.
/// Returns whether anything changed.
pub fn apply_node_changes(
    changes: &[NodeChange],
    nodes: &mut Vec<AgentNode>,
    edges: &mut Vec<Edge>,
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;
    for change in changes {
        match change {
            NodeChange::Position { id, position } => {
                if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                    if node.position != *position {
                        node.position = *position;
                        changed = true;
                    }
                }
            }
            NodeChange::Remove { id } => {
                let before = nodes.len();
                nodes.retain(|n| &n.id != id);
                if nodes.len() != before {
                    edges.retain(|e| &e.source != id && &e.target != id);
                    if selected.as_deref() == Some(id.as_str()) {
                        *selected = None;
                    }
                    changed = true;
                }
            }
            NodeChange::Select { id, selected: on } => {
                if !nodes.iter().any(|n| &n.id == id) {
                    continue;
                }
                let next = if *on {
                    Some(id.clone())
                } else if selected.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    selected.clone()
                };
                if *selected != next {
                    *selected = next;
                    changed = true;
                }
            }
        }
    }
    changed
}

/// Apply edge changes in order, keeping `selected` pointed at a live edge.
pub fn apply_edge_changes(changes: &[EdgeChange], edges: &mut Vec<Edge>, selected: &mut Option<String>) -> bool {
    let mut changed = false;
    for change in changes {
        match change {
            EdgeChange::Remove { id } => {
                let before = edges.len();
                edges.retain(|e| &e.id != id);
                if edges.len() != before {
                    if selected.as_deref() == Some(id.as_str()) {
                        *selected = None;
                    }
                    changed = true;
                }
            }
            EdgeChange::Select { id, selected: on } => {
                if !edges.iter().any(|e| &e.id == id) {
                    continue;
                }
                let next = if *on {
                    Some(id.clone())
                } else if selected.as_deref() == Some(id.as_str()) {
                    None
                } else {
                    selected.clone()
                };
                if *selected != next {
                    *selected = next;
                    changed = true;
                }
            }
        }
    }
    changed
}
