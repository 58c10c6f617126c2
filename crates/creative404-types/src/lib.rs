//! Shared types and error hierarchy for Creative404.

pub mod error;
pub mod inspection;

pub use error::{ConfigError, ErrorKind};
pub use inspection::{InspectionResult, McpToolInfo, UNKNOWN};
