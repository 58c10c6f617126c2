//! Shared handler state.

use std::sync::Arc;

use creative404_config::Creative404Config;
use creative404_imagegen::{ImageGenClient, ImageGenConfig, ImageGenError};
use creative404_mcp::{McpError, McpInspector};

use crate::error::AppError;

/// Immutable state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub inspector: McpInspector,
    // Kept as the construction result so a missing key surfaces per request.
    image_gen: Arc<Result<ImageGenClient, ImageGenError>>,
}

impl AppState {
    pub fn new(inspector: McpInspector, image_config: ImageGenConfig) -> Self {
        let image_gen = ImageGenClient::new(image_config);
        if let Err(e) = &image_gen {
            tracing::info!("Image generation disabled: {e}");
        }
        Self {
            inspector,
            image_gen: Arc::new(image_gen),
        }
    }

    pub fn from_config(config: &Creative404Config) -> Result<Self, McpError> {
        let inspector = McpInspector::new(config.mcp.clone())?;
        Ok(Self::new(inspector, config.image_generation.clone()))
    }

    /// The image client, or the configuration error that prevented building it.
    pub fn image_client(&self) -> Result<&ImageGenClient, AppError> {
        self.image_gen.as_ref().as_ref().map_err(|e| {
            AppError::from_kind(e.kind(), "Image generation is not configured", e.to_string())
        })
    }
}
