//! The outcome of inspecting an MCP server.

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Placeholder used when the server omits its name or version.
pub const UNKNOWN: &str = "Unknown";

/// A tool advertised by an MCP server via `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_schema: serde_json::Value,
}

/// Structured result of one inspection (initialize + tools/list).
///
/// Created fresh for every request. `success` is true iff `initialize`
/// succeeded and `tools/list` did not fail at the transport level; a
/// protocol-level `tools/list` failure is recorded in `tools_error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
    pub tools: Vec<McpToolInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_error: Option<String>,
}

impl InspectionResult {
    /// A failed inspection carrying a category and a human-readable message.
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            error_kind: Some(kind),
            server_name: String::new(),
            server_version: String::new(),
            protocol_version: String::new(),
            tools: Vec::new(),
            tools_error: None,
        }
    }

    /// Whether a connected server with a usable name was found.
    pub fn has_server_name(&self) -> bool {
        self.success && !self.server_name.is_empty()
    }
}
