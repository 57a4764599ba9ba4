//! The asset catalog shown in the sidebar: every tool that can be attached to
//! an agent plus the template used by the "Agent" card.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_AGENT_LABEL;
use crate::models::{AgentTemplate, Tool};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tool at position {0} has an empty id")]
    EmptyToolId(usize),
    #[error("duplicate tool id `{0}`")]
    DuplicateToolId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub tools: Vec<Tool>,
    #[serde(default = "default_agent_template")]
    pub agent: AgentTemplate,
}

fn default_agent_template() -> AgentTemplate {
    AgentTemplate {
        name: DEFAULT_AGENT_LABEL.to_string(),
    }
}

fn tool(id: &str, name: &str, description: &str) -> Tool {
    Tool {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The catalog the editor boots with until the host page supplies one.
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                tool("tool-1", "bulk-doc-check", "Helps in organizing data..."),
                tool("tool-2", "data-analytics-tool", "Clear actionable items..."),
                tool("tool-3", "web-search-tool", "For web-based searches..."),
                tool("tool-4", "ticket-classification", "Classifies support tickets..."),
            ],
            agent: default_agent_template(),
        }
    }

    /// Build a catalog, rejecting empty or repeated tool ids.
    pub fn new(tools: Vec<Tool>, agent: AgentTemplate) -> Result<Self, CatalogError> {
        let catalog = Self { tools, agent };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for (index, tool) in self.tools.iter().enumerate() {
            if tool.id.trim().is_empty() {
                return Err(CatalogError::EmptyToolId(index));
            }
            if !seen.insert(tool.id.as_str()) {
                return Err(CatalogError::DuplicateToolId(tool.id.clone()));
            }
        }
        Ok(())
    }

    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }
}
