//! HTTP POST transport for MCP JSON-RPC calls.
//!
//! Automatic redirect following is disabled: replaying a POST with custom
//! headers across a redirect is transport-dependent, so a single 307/308 hop
//! is replayed here with the same body and headers. A second redirect is an
//! error.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, LOCATION};
use url::Url;

use crate::error::McpError;

/// `Accept` value for every MCP call; the server may answer with either type.
pub const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// Header carrying the server-issued session identifier.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// A successful (2xx) response, read in full.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub body: String,
    /// Raw `Content-Type` header value (empty if absent).
    pub content_type: String,
    /// `Mcp-Session-Id` from the final response, if the server sent one.
    pub session_id: Option<String>,
    /// The URL that produced this response (the redirect target after a hop).
    pub url: Url,
}

/// POSTs JSON-RPC bodies to an MCP endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    /// Create a transport whose every request is bounded by `timeout_ms`.
    pub fn new(timeout_ms: u64) -> Result<Self, McpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| McpError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            timeout_ms,
        })
    }

    /// Send one JSON-RPC body, replaying at most one 307/308 redirect.
    pub async fn send(
        &self,
        url: &Url,
        body: &str,
        session_id: Option<&str>,
    ) -> Result<TransportResponse, McpError> {
        let first = self.post(url, body, session_id).await?;

        let (response, final_url) = if is_replayable_redirect(first.status()) {
            let status = first.status().as_u16();
            let target = redirect_target(url, first.headers())
                .ok_or(McpError::BadRedirect { status })?;
            tracing::debug!(from = %url, to = %target, status, "Replaying MCP request after redirect");

            let replay = self.post(&target, body, session_id).await?;
            if is_replayable_redirect(replay.status()) {
                let location = replay
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("<missing>")
                    .to_string();
                return Err(McpError::TooManyRedirects { location });
            }
            (replay, target)
        } else {
            (first, url.clone())
        };

        let status = response.status();
        if !status.is_success() {
            return Err(McpError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let session_id = header_str(response.headers(), SESSION_HEADER)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let content_type = header_str(response.headers(), CONTENT_TYPE.as_str())
            .unwrap_or_default()
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| McpError::from_reqwest(e, self.timeout_ms))?;

        tracing::debug!(
            url = %final_url,
            %status,
            content_type = %content_type,
            session = session_id.is_some(),
            "MCP response received"
        );

        Ok(TransportResponse {
            body,
            content_type,
            session_id,
            url: final_url,
        })
    }

    async fn post(
        &self,
        url: &Url,
        body: &str,
        session_id: Option<&str>,
    ) -> Result<reqwest::Response, McpError> {
        let mut request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_VALUE)
            .body(body.to_string());

        if let Some(sid) = session_id {
            request = request.header(SESSION_HEADER, sid);
        }

        request
            .send()
            .await
            .map_err(|e| McpError::from_reqwest(e, self.timeout_ms))
    }
}

fn is_replayable_redirect(status: StatusCode) -> bool {
    status == StatusCode::TEMPORARY_REDIRECT || status == StatusCode::PERMANENT_REDIRECT
}

/// Resolve the `Location` header against the URL that was requested.
fn redirect_target(base: &Url, headers: &HeaderMap) -> Option<Url> {
    let location = header_str(headers, LOCATION.as_str())?;
    base.join(location).ok()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
