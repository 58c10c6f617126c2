//! Error types for rendering.

use creative404_types::ErrorKind;
use thiserror::Error;

/// Errors from drawing or encoding a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height} (each side must be 1..={max})")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("Invalid theme color '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    #[error("Failed to build background gradient")]
    Gradient,

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Render worker failed: {0}")]
    Worker(String),
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Render
    }
}
