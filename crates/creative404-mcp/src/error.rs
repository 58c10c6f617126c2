//! Error types for MCP inspection.

use creative404_types::ErrorKind;
use thiserror::Error;

/// Errors from validating, reaching, or talking to an MCP server.
///
/// The `Display` text is what ends up in `InspectionResult::error_message`,
/// so each category reads differently: callers branch on the phrasing as
/// well as on [`McpError::kind`].
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid MCP server address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Connection failed: {message}")]
    Connect { message: String },

    #[error("Connection timeout: MCP server did not respond within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("MCP server returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("MCP server sent a {status} redirect without a usable Location header")]
    BadRedirect { status: u16 },

    #[error("MCP server redirected again after a replayed request (to '{location}')")]
    TooManyRedirects { location: String },

    #[error("Unsupported MCP response content type '{content_type}'")]
    UnsupportedContentType { content_type: String },

    #[error("{message} (JSON-RPC error {code})")]
    JsonRpc { code: i64, message: String },

    #[error("MCP protocol error: {0}")]
    Protocol(String),

    #[error("Invalid JSON from MCP server: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl McpError {
    /// Category of this error in the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            McpError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            McpError::Connect { .. } => ErrorKind::Transport,
            McpError::Timeout { .. } => ErrorKind::Timeout,
            McpError::HttpStatus { .. }
            | McpError::BadRedirect { .. }
            | McpError::TooManyRedirects { .. }
            | McpError::UnsupportedContentType { .. }
            | McpError::JsonRpc { .. }
            | McpError::Protocol(_)
            | McpError::Json(_) => ErrorKind::Protocol,
            McpError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Classify a reqwest failure. `timeout_ms` is the budget the client ran with.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            McpError::Timeout { timeout_ms }
        } else if err.is_connect() || err.is_request() {
            McpError::Connect {
                message: error_chain(&err),
            }
        } else if err.is_body() || err.is_decode() {
            McpError::Protocol(format!("failed to read response body: {}", error_chain(&err)))
        } else {
            McpError::Unexpected(error_chain(&err))
        }
    }
}

/// Render an error and its sources as one line.
///
/// reqwest's top-level message is just "error sending request"; the cause
/// (connection refused, DNS, TLS) lives further down the chain.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
