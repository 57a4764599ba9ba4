use serde::{Deserialize, Serialize};

/// A tool asset from the catalog.  Tools are only ever referenced at
/// runtime, never created or destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Payload carried by the "Agent" card in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTemplate {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Data attached to an agent node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentNodeData {
    pub label: String,
    pub model_family: String,
    pub model_name: String,
    pub tools: Vec<Tool>,
}

impl AgentNodeData {
    pub fn has_tool(&self, tool_id: &str) -> bool {
        self.tools.iter().any(|t| t.id == tool_id)
    }
}

/// Node represents an agent box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentNode {
    pub id: String,
    pub position: Position,
    pub data: AgentNodeData,
}

/// Edge between two nodes, drawn from the source's bottom handle to the
/// target's top handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

/// A connection gesture as reported by the canvas, before it becomes an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }
}

/// Read-only view of the graph handed to the host page.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot<'a> {
    pub nodes: &'a [AgentNode],
    pub edges: &'a [Edge],
}

/// Changes to the node collection that the canvas applies as given.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Position },
    Remove { id: String },
    Select { id: String, selected: bool },
}

/// Changes to the edge collection that the canvas applies as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Remove { id: String },
    Select { id: String, selected: bool },
}
