//! Extract the JSON-RPC payload from an MCP HTTP response body.
//!
//! Streamable-HTTP servers answer a POST either with a plain
//! `application/json` body or with a `text/event-stream` body whose `data:`
//! line carries the JSON-RPC message.

/// The response media types the inspector understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    EventStream,
    Other,
}

impl MediaType {
    /// Classify a `Content-Type` header value, ignoring parameters and case.
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case("application/json") {
            MediaType::Json
        } else if essence.eq_ignore_ascii_case("text/event-stream") {
            MediaType::EventStream
        } else {
            MediaType::Other
        }
    }
}

/// Return the JSON-RPC payload carried by `body`, if any.
///
/// JSON bodies are returned as-is. Event-stream bodies yield the first
/// `data:` line whose content is a JSON object; later lines are ignored.
/// Any other media type yields `None`.
pub fn extract_payload<'a>(body: &'a str, content_type: &str) -> Option<&'a str> {
    match MediaType::from_content_type(content_type) {
        MediaType::Json => Some(body),
        MediaType::EventStream => first_json_data_line(body),
        MediaType::Other => None,
    }
}

fn first_json_data_line(body: &str) -> Option<&str> {
    // Splitting on '\n' and trimming also strips the '\r' of CRLF endings.
    body.split('\n')
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .find(|data| data.starts_with('{'))
}
