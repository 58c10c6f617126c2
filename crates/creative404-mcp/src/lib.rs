//! MCP (Model Context Protocol) inspection client for Creative404.
//!
//! Speaks JSON-RPC 2.0 over HTTP POST to discover a server's name, version
//! and tools. Responses may arrive as plain JSON or wrapped in a
//! Server-Sent-Events body; a single 307/308 redirect is replayed by hand so
//! the `Accept` and `Mcp-Session-Id` headers survive the hop.

pub mod address;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod jsonrpc;
mod transport;

pub use address::{ServerAddress, UNKNOWN_SERVER, display_name, normalize, validate};
pub use client::{McpInspector, PROTOCOL_VERSION};
pub use config::McpClientConfig;
pub use envelope::{MediaType, extract_payload};
pub use error::McpError;
pub use transport::{ACCEPT_VALUE, HttpTransport, SESSION_HEADER, TransportResponse};
