//! Error hierarchy for Creative404.

use serde::Serialize;
use thiserror::Error;

/// Failure categories shared by every component.
///
/// Library errors map onto one of these so the web layer can choose a status
/// code without knowing which component failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The server address failed validation before any network call.
    InvalidAddress,
    /// Connection refused, DNS failure, TLS failure.
    Transport,
    /// The operation exceeded its time budget.
    Timeout,
    /// Non-2xx status, unparseable body, JSON-RPC error, missing fields.
    Protocol,
    /// Required configuration (e.g. an API key) is missing or invalid.
    Configuration,
    /// Drawing or encoding the image failed.
    Render,
    /// Anything that does not fit the categories above.
    Unexpected,
}

impl ErrorKind {
    /// Returns `true` if the failure is the caller's fault (4xx-equivalent).
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorKind::InvalidAddress | ErrorKind::Configuration)
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}
