//! Text-to-image generation for Creative404.
//!
//! Turns an MCP inspection into a natural-language prompt and sends it to an
//! OpenAI-compatible `images/generations` endpoint.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;

pub use client::{GeneratedImage, ImageGenClient};
pub use config::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SIZE, ImageGenConfig};
pub use error::ImageGenError;
pub use prompt::build_prompt;
