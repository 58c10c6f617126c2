//! MCP inspector: negotiates a session and discovers a server's tools.
//!
//! One inspection is two dependent round trips: `initialize` (which may hand
//! back an `Mcp-Session-Id`) followed by `tools/list` carrying that id.
//! Every failure is folded into an [`InspectionResult`]; nothing escapes as a
//! panic or an unhandled error.

use creative404_types::{ErrorKind, InspectionResult, McpToolInfo, UNKNOWN};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::address::{ServerAddress, display_name, normalize};
use crate::config::McpClientConfig;
use crate::envelope::{MediaType, extract_payload};
use crate::error::McpError;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::transport::HttpTransport;

/// MCP protocol version we request.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INITIALIZE_ID: u64 = 1;
const TOOLS_LIST_ID: u64 = 2;

/// Progress of one inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    NotStarted,
    Initializing,
    Initialized,
    ListingTools,
    Done,
    Failed,
}

/// Deserialization helpers for MCP protocol messages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResult {
    #[serde(default)]
    protocol_version: Option<String>,
    #[serde(default)]
    server_info: Option<ServerInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolsListResult {
    #[serde(default)]
    tools: Vec<ToolEntry>,
}

#[derive(Debug, Deserialize)]
struct ToolEntry {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_schema", rename = "inputSchema")]
    input_schema: serde_json::Value,
}

fn default_schema() -> serde_json::Value {
    serde_json::json!({"type": "object", "properties": {}})
}

/// Name and version captured from a successful `initialize`.
struct Handshake {
    server_name: String,
    server_version: String,
    protocol_version: String,
}

/// State carried between the two calls of one inspection.
struct Session<'a> {
    transport: &'a HttpTransport,
    state: SessionState,
    endpoint: Url,
    session_id: Option<String>,
}

impl<'a> Session<'a> {
    fn new(transport: &'a HttpTransport, endpoint: Url) -> Self {
        Self {
            transport,
            state: SessionState::NotStarted,
            endpoint,
            session_id: None,
        }
    }

    fn advance(&mut self, next: SessionState) {
        tracing::debug!(from = ?self.state, to = ?next, "MCP session state");
        self.state = next;
    }

    fn fail(&mut self, err: McpError) -> McpError {
        self.advance(SessionState::Failed);
        err
    }

    /// Send one request and decode the JSON-RPC envelope.
    ///
    /// Follows the endpoint to a redirect target so later calls go straight
    /// there, and remembers any session id the server hands out.
    async fn call<T: DeserializeOwned>(
        &mut self,
        id: u64,
        method: &str,
        params: serde_json::Value,
    ) -> Result<JsonRpcResponse<T>, McpError> {
        let request = JsonRpcRequest::new(id, method, params);
        let body = serde_json::to_string(&request)?;

        let response = self
            .transport
            .send(&self.endpoint, &body, self.session_id.as_deref())
            .await?;

        if response.url != self.endpoint {
            self.endpoint = response.url.clone();
        }
        if let Some(sid) = response.session_id {
            self.session_id = Some(sid);
        }

        let payload = extract_payload(&response.body, &response.content_type).ok_or_else(|| {
            match MediaType::from_content_type(&response.content_type) {
                MediaType::Other => McpError::UnsupportedContentType {
                    content_type: response.content_type.clone(),
                },
                _ => McpError::Protocol(format!("no JSON-RPC payload in '{method}' response")),
            }
        })?;

        Ok(serde_json::from_str(payload)?)
    }

    async fn initialize(&mut self, config: &McpClientConfig) -> Result<Handshake, McpError> {
        self.advance(SessionState::Initializing);

        let params = serde_json::json!({
            "protocolVersion": config.protocol_version,
            "capabilities": {},
            "clientInfo": {
                "name": config.client_name,
                "version": config.client_version,
            }
        });

        let resp: JsonRpcResponse<InitializeResult> =
            self.call(INITIALIZE_ID, "initialize", params).await?;

        let init = match (resp.result, resp.error) {
            (_, Some(err)) => {
                return Err(McpError::JsonRpc {
                    code: err.code,
                    message: err.message,
                });
            }
            (Some(result), None) => result,
            (None, None) => {
                return Err(McpError::Protocol(
                    "failed to initialize: response has neither result nor error".to_string(),
                ));
            }
        };

        let info = init.server_info.unwrap_or_default();
        let handshake = Handshake {
            server_name: non_empty_or_unknown(info.name),
            server_version: non_empty_or_unknown(info.version),
            protocol_version: init.protocol_version.unwrap_or_default(),
        };

        self.advance(SessionState::Initialized);
        Ok(handshake)
    }

    async fn list_tools(&mut self) -> Result<Vec<McpToolInfo>, McpError> {
        self.advance(SessionState::ListingTools);

        let resp: JsonRpcResponse<ToolsListResult> = self
            .call(TOOLS_LIST_ID, "tools/list", serde_json::json!({}))
            .await?;

        if let Some(err) = resp.error {
            return Err(McpError::JsonRpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(resp
            .result
            .unwrap_or_default()
            .tools
            .into_iter()
            .map(|t| McpToolInfo {
                name: t.name,
                description: t.description.unwrap_or_default(),
                input_schema: t.input_schema,
            })
            .collect())
    }
}

fn non_empty_or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Inspects MCP servers over streamable HTTP.
///
/// Cheap to clone; holds no per-server state, so one instance can serve
/// concurrent requests.
#[derive(Clone)]
pub struct McpInspector {
    transport: HttpTransport,
    config: McpClientConfig,
}

impl McpInspector {
    pub fn new(config: McpClientConfig) -> Result<Self, McpError> {
        let transport = HttpTransport::new(config.timeout_ms)?;
        Ok(Self { transport, config })
    }

    /// Inspect the server at `address`, never failing.
    ///
    /// Errors are converted into `success = false` with a category and a
    /// message that distinguishes timeouts, connection failures, protocol
    /// errors and unexpected failures.
    pub async fn inspect(&self, address: &str) -> InspectionResult {
        let span = tracing::info_span!(
            "mcp.inspect",
            inspection = %uuid::Uuid::new_v4(),
            server = %display_name(address),
        );

        async {
            match self.negotiate(address).await {
                Ok(result) => {
                    tracing::info!(
                        server_name = %result.server_name,
                        server_version = %result.server_version,
                        tools = result.tools.len(),
                        "MCP server inspected"
                    );
                    result
                }
                Err(e) => {
                    tracing::warn!(kind = ?e.kind(), "MCP inspection failed: {e}");
                    InspectionResult::failure(e.kind(), e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run the initialize → tools/list handshake, surfacing the first fatal error.
    ///
    /// A `tools/list` failure at the protocol level is not fatal: the result
    /// keeps the name and version from `initialize` and records the failure
    /// in `tools_error`. Transport failures (timeout, connection) on either
    /// call fail the whole inspection.
    pub async fn negotiate(&self, address: &str) -> Result<InspectionResult, McpError> {
        let endpoint = match ServerAddress::parse(address)? {
            ServerAddress::Http(url) => normalize(&url),
            ServerAddress::Command(_) => {
                return Err(McpError::InvalidAddress {
                    address: address.to_string(),
                    reason: "command-based MCP servers cannot be inspected over HTTP".to_string(),
                });
            }
        };

        let mut session = Session::new(&self.transport, endpoint);

        let handshake = match session.initialize(&self.config).await {
            Ok(handshake) => handshake,
            Err(e) => return Err(session.fail(e)),
        };

        let (tools, tools_error) = match session.list_tools().await {
            Ok(tools) => (tools, None),
            Err(e) if e.kind() == ErrorKind::Protocol => {
                tracing::warn!("tools/list failed, keeping initialize result: {e}");
                (Vec::new(), Some(e.to_string()))
            }
            Err(e) => return Err(session.fail(e)),
        };

        session.advance(SessionState::Done);

        Ok(InspectionResult {
            success: true,
            error_message: None,
            error_kind: None,
            server_name: handshake.server_name,
            server_version: handshake.server_version,
            protocol_version: handshake.protocol_version,
            tools,
            tools_error,
        })
    }
}
