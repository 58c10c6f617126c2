//! Server address validation, normalization and display names.
//!
//! An address is either an absolute `http`/`https` URL or an opaque command
//! string such as `npx mcp-server`.

use url::Url;

use crate::error::McpError;

/// Command-form addresses must be strictly shorter than this (in characters).
pub const MAX_COMMAND_LEN: usize = 500;

/// Display name used when nothing better can be derived from an address.
pub const UNKNOWN_SERVER: &str = "Unknown Server";

/// A validated MCP server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddress {
    /// An absolute `http` or `https` URL.
    Http(Url),
    /// A command invocation, kept verbatim (trimmed).
    Command(String),
}

impl ServerAddress {
    /// Validate and classify an address.
    pub fn parse(address: &str) -> Result<Self, McpError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(invalid(address, "address is empty"));
        }

        if has_http_scheme(trimmed) {
            let url = Url::parse(trimmed).map_err(|e| invalid(address, &e.to_string()))?;
            if url.host_str().is_none() {
                return Err(invalid(address, "URL has no host"));
            }
            return Ok(ServerAddress::Http(url));
        }

        if address.chars().count() >= MAX_COMMAND_LEN {
            return Err(invalid(
                address,
                &format!("command must be shorter than {MAX_COMMAND_LEN} characters"),
            ));
        }
        Ok(ServerAddress::Command(trimmed.to_string()))
    }

    /// Short human-readable name: the host for URLs, the last token for commands.
    pub fn display_name(&self) -> String {
        match self {
            ServerAddress::Http(url) => url
                .host_str()
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_SERVER.to_string()),
            ServerAddress::Command(command) => command
                .split([' ', '/'])
                .filter(|part| !part.is_empty())
                .last()
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_SERVER.to_string()),
        }
    }
}

/// Returns `true` if `address` is an absolute http(s) URL or a usable command string.
pub fn validate(address: &str) -> bool {
    ServerAddress::parse(address).is_ok()
}

/// Append a trailing `/` to the URL path if it lacks one.
///
/// Some MCP server frameworks answer the bare path with a 307 to the
/// slash-terminated one, and many HTTP clients drop custom headers such as
/// `Accept` when following it. Normalizing first avoids the hop in the common
/// case; the transport still replays one redirect when it happens anyway.
pub fn normalize(url: &Url) -> Url {
    let mut normalized = url.clone();
    if !normalized.path().ends_with('/') {
        let path = format!("{}/", normalized.path());
        normalized.set_path(&path);
    }
    normalized
}

/// Display name for any address string, falling back to [`UNKNOWN_SERVER`].
pub fn display_name(address: &str) -> String {
    ServerAddress::parse(address)
        .map(|parsed| parsed.display_name())
        .unwrap_or_else(|_| UNKNOWN_SERVER.to_string())
}

fn has_http_scheme(address: &str) -> bool {
    let bytes = address.as_bytes();
    let starts_with = |prefix: &[u8]| {
        bytes
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with(b"http://") || starts_with(b"https://")
}

fn invalid(address: &str, reason: &str) -> McpError {
    McpError::InvalidAddress {
        address: address.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_http_urls() {
        assert!(validate("http://localhost:3001"));
        assert!(validate("https://example.com/mcp"));
        assert!(validate("HTTPS://EXAMPLE.COM/MCP"));
        assert!(validate("  http://127.0.0.1:8080/mcp?x=1  "));
    }

    #[test]
    fn validate_long_url_is_still_a_url() {
        let url = format!("https://example.com/{}", "a".repeat(600));
        assert!(validate(&url));
    }

    #[test]
    fn validate_rejects_blank() {
        assert!(!validate(""));
        assert!(!validate("   "));
        assert!(!validate("\t\n"));
    }

    #[test]
    fn validate_rejects_malformed_http() {
        assert!(!validate("http://"));
        assert!(!validate("http://exa mple.com"));
    }

    #[test]
    fn validate_command_length_boundary() {
        assert!(validate("npx mcp-server"));
        assert!(validate("x"));
        assert!(validate(&"a".repeat(499)));
        assert!(!validate(&"a".repeat(500)));
        assert!(!validate(&"a".repeat(800)));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // 499 two-byte characters is 998 bytes but still a valid command.
        assert!(validate(&"é".repeat(499)));
    }

    #[test]
    fn parse_classifies() {
        assert!(matches!(
            ServerAddress::parse("http://localhost:3001").unwrap(),
            ServerAddress::Http(_)
        ));
        assert_eq!(
            ServerAddress::parse(" npx mcp-server ").unwrap(),
            ServerAddress::Command("npx mcp-server".into())
        );
    }

    #[test]
    fn normalize_appends_slash() {
        let url = Url::parse("http://host/path").unwrap();
        assert_eq!(normalize(&url).as_str(), "http://host/path/");
    }

    #[test]
    fn normalize_keeps_existing_slash() {
        let url = Url::parse("http://host/path/").unwrap();
        assert_eq!(normalize(&url).as_str(), "http://host/path/");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "http://host",
            "http://host/mcp",
            "https://host:8443/a/b/",
            "http://host/mcp?token=abc",
        ] {
            let url = Url::parse(raw).unwrap();
            let once = normalize(&url);
            assert_eq!(normalize(&once), once, "{raw}");
        }
    }

    #[test]
    fn normalize_preserves_query() {
        let url = Url::parse("http://host/mcp?token=abc").unwrap();
        assert_eq!(normalize(&url).as_str(), "http://host/mcp/?token=abc");
    }

    #[test]
    fn display_name_for_url_is_host() {
        assert_eq!(display_name("http://localhost:3001"), "localhost");
        assert_eq!(display_name("https://mcp.example.com/v1/"), "mcp.example.com");
    }

    #[test]
    fn display_name_for_command_is_last_token() {
        assert_eq!(display_name("npx mcp-server"), "mcp-server");
        assert_eq!(
            display_name("npx -y @modelcontextprotocol/server-filesystem"),
            "server-filesystem"
        );
        assert_eq!(display_name("python ./servers/weather/"), "weather");
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(display_name(""), UNKNOWN_SERVER);
        assert_eq!(display_name("/ / /"), UNKNOWN_SERVER);
        assert_eq!(display_name("http://"), UNKNOWN_SERVER);
    }
}
