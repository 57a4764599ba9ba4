//! Drag payload wire format.
//!
//! A drag gesture carries exactly one JSON document under the editor's custom
//! mime type:
//!
//! ```json
//! { "type": "tool", "payload": { "id": "tool-1", "name": "...", "description": "..." } }
//! { "type": "agent", "payload": { "name": "Single Agent" } }
//! ```
//!
//! Decoding is deliberately forgiving at the call sites: foreign drag sources
//! routinely lack the payload, so every failure here ends up as a no-op in
//! the reducers rather than a user-visible error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AgentTemplate, Tool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum DropPayload {
    Agent(AgentTemplate),
    Tool(Tool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Agent,
    Tool,
}

impl DropPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            DropPayload::Agent(_) => PayloadKind::Agent,
            DropPayload::Tool(_) => PayloadKind::Tool,
        }
    }
}

#[derive(Debug, Error)]
pub enum DropError {
    #[error("no drag payload present")]
    Missing,
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown drag payload type `{0}`")]
    UnknownType(String),
    #[error("failed to encode drag payload: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Envelope used while decoding so an unrecognised `type` can be told apart
/// from broken JSON.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

pub fn encode(payload: &DropPayload) -> Result<String, DropError> {
    serde_json::to_string(payload).map_err(DropError::Encode)
}

pub fn decode(data: &str) -> Result<DropPayload, DropError> {
    if data.trim().is_empty() {
        return Err(DropError::Missing);
    }

    let envelope: Envelope = serde_json::from_str(data)?;
    match envelope.kind.as_str() {
        "agent" => Ok(DropPayload::Agent(serde_json::from_value(envelope.payload)?)),
        "tool" => Ok(DropPayload::Tool(serde_json::from_value(envelope.payload)?)),
        other => Err(DropError::UnknownType(other.to_string())),
    }
}

/// Decode whatever the transfer channel handed us, logging and discarding
/// anything unusable.
pub fn read_drop(data: Option<&str>) -> Option<DropPayload> {
    match decode(data.unwrap_or_default()) {
        Ok(payload) => Some(payload),
        Err(DropError::Missing) => None,
        Err(e) => {
            crate::console_log!("Ignoring drop: {}", e);
            None
        }
    }
}
