//! HTTP error responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use creative404_types::ErrorKind;

/// An error body of the form `{"error": ..., "details": ...}`.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl AppError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    /// An error whose status follows the failure category: 400 for caller
    /// mistakes, 500 otherwise.
    pub fn from_kind(kind: ErrorKind, error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: status_for(kind),
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    if kind.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Malformed, mistyped or out-of-range request bodies are the caller's fault.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, details = ?self.details, "{}", self.error);
        } else {
            tracing::debug!(status = %self.status, details = ?self.details, "{}", self.error);
        }

        let body = match self.details {
            Some(details) => serde_json::json!({ "error": self.error, "details": details }),
            None => serde_json::json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
