//! Configuration for the MCP inspection client.

use serde::{Deserialize, Serialize};

use crate::client::PROTOCOL_VERSION;

fn default_timeout() -> u64 {
    10_000
}

fn default_client_name() -> String {
    "creative404".to_string()
}

fn default_client_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_protocol_version() -> String {
    PROTOCOL_VERSION.to_string()
}

/// Settings for talking to MCP servers (the `[mcp]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpClientConfig {
    /// Budget for each JSON-RPC round trip in milliseconds (default: 10000).
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Name sent as `clientInfo.name` in `initialize`.
    #[serde(default = "default_client_name")]
    pub client_name: String,
    /// Version sent as `clientInfo.version` in `initialize`.
    #[serde(default = "default_client_version")]
    pub client_version: String,
    /// Protocol version requested in `initialize`.
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

impl Default for McpClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout(),
            client_name: default_client_name(),
            client_version: default_client_version(),
            protocol_version: default_protocol_version(),
        }
    }
}
