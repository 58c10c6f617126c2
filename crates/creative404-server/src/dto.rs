//! Request bodies for the inbound API.

use serde::Deserialize;

fn default_theme() -> String {
    "default".to_string()
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    400
}

/// Body of `POST /api/gif/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub mcp_server_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Body of `POST /api/gif/preview` and `POST /api/image/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub mcp_server_url: String,
}
