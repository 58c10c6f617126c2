//! Error types for image generation.

use creative404_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error(
        "Image generation API key is not configured. Set CREATIVE404_IMAGE_API_KEY or [image_generation] api_key in ~/.creative404/config.toml."
    )]
    MissingApiKey,

    #[error("Invalid image generation configuration: {0}")]
    InvalidConfig(String),

    #[error("Image generation timed out.")]
    Timeout,

    #[error("Image generation failed: {0}")]
    Network(String),

    #[error("Image generation failed: API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No image was returned by the API.")]
    EmptyResponse,

    #[error("Image generation error: {0}")]
    Decode(String),
}

impl ImageGenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageGenError::MissingApiKey | ImageGenError::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
            ImageGenError::Timeout => ErrorKind::Timeout,
            ImageGenError::Network(_) => ErrorKind::Transport,
            ImageGenError::Api { .. } | ImageGenError::EmptyResponse | ImageGenError::Decode(_) => {
                ErrorKind::Protocol
            }
        }
    }
}
