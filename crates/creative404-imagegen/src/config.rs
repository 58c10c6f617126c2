//! Image generation settings.

use serde::{Deserialize, Serialize};

/// The default OpenAI images endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/images/generations";

/// The default image model.
pub const DEFAULT_MODEL: &str = "dall-e-3";

/// The default output size.
pub const DEFAULT_SIZE: &str = "1024x1024";

const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Settings for [`ImageGenClient`](crate::ImageGenClient).
///
/// Every field is optional in TOML; `api_key` has no default and must be
/// supplied before a client can be built.
#[derive(Clone, Serialize, Deserialize)]
pub struct ImageGenConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            model: default_model(),
            size: default_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for ImageGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("size", &self.size)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_size() -> String {
    DEFAULT_SIZE.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
