//! Creative404 web backend.
//!
//! Exposes the inbound HTTP API: inspect an MCP server, then render a themed
//! 404 image from what it reports (or ask an image API to draw one).

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::router;
pub use state::AppState;
