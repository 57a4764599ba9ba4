//! Agent node reducer: tool drops, tool removal and the drop hint.

use crate::messages::{Command, Message};
use crate::models::{AgentNode, Tool};
use crate::payload::{self, DropPayload};
use crate::state::AppState;

/// Copy of `node` with `tool` appended, or `None` if a tool with the same id
/// is already attached.
pub fn attach_tool(node: &AgentNode, tool: Tool) -> Option<AgentNode> {
    if node.data.has_tool(&tool.id) {
        return None;
    }
    let mut updated = node.clone();
    updated.data.tools.push(tool);
    Some(updated)
}

/// Copy of `node` without the tool `tool_id`, or `None` if it was not attached.
pub fn detach_tool(node: &AgentNode, tool_id: &str) -> Option<AgentNode> {
    if !node.data.has_tool(tool_id) {
        return None;
    }
    let mut updated = node.clone();
    updated.data.tools.retain(|t| t.id != tool_id);
    Some(updated)
}

pub fn drag_enter(state: &mut AppState, node_id: &str, has_payload: bool) -> bool {
    // Only the mime type gates the hint; the payload itself is unreadable
    // until drop anyway.
    if !has_payload || state.node(node_id).is_none() {
        return false;
    }
    if state.drag_over_node.as_deref() == Some(node_id) {
        return false;
    }
    state.drag_over_node = Some(node_id.to_string());
    state.touch();
    true
}

pub fn drag_leave(state: &mut AppState, node_id: &str) -> bool {
    if state.drag_over_node.as_deref() != Some(node_id) {
        return false;
    }
    state.drag_over_node = None;
    state.touch();
    true
}

/// Handle a drop on an agent node.  The node consumes the drop whatever it
/// carries; only tool payloads change anything.
pub fn drop_on_node(state: &mut AppState, node_id: &str, data: Option<&str>) -> bool {
    let mut changed = drag_leave(state, node_id);

    let tool = match payload::read_drop(data) {
        Some(DropPayload::Tool(tool)) => tool,
        Some(other) => {
            crate::console_log!("Node {} ignores {:?} drop", node_id, other.kind());
            return changed;
        }
        None => return changed,
    };

    let Some(node) = state.node(node_id) else {
        return changed;
    };
    match attach_tool(node, tool) {
        Some(updated) => {
            crate::console_log!(
                "Attached tool {} to {}",
                updated.data.tools.last().map(|t| t.id.as_str()).unwrap_or_default(),
                node_id
            );
            changed |= state.replace_node(updated);
        }
        None => crate::console_log!("Tool already attached to {}, ignoring drop", node_id),
    }
    changed
}

pub fn delete_tool(state: &mut AppState, node_id: &str, tool_id: &str) -> bool {
    let Some(updated) = state.node(node_id).and_then(|n| detach_tool(n, tool_id)) else {
        return false;
    };
    state.replace_node(updated)
}

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    let changed = match msg {
        Message::DeleteTool { node_id, tool_id } => delete_tool(state, node_id, tool_id),
        _ => return false,
    };
    if changed {
        cmds.push(Command::Redraw);
    }
    true
}
