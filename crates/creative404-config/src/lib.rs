//! Multi-tier TOML configuration for Creative404.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use creative404_imagegen::ImageGenConfig;
use creative404_mcp::McpClientConfig;
use creative404_types::ConfigError;
use serde::{Deserialize, Serialize};

/// The default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5080";

/// Resolved configuration for a Creative404 server.
#[derive(Debug, Clone)]
pub struct Creative404Config {
    pub bind: SocketAddr,
    pub verbose: bool,
    pub mcp: McpClientConfig,
    pub image_generation: ImageGenConfig,
    pub config_dir: PathBuf,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub mcp: McpSettings,
    #[serde(default)]
    pub image_generation: ImageGenSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpSettings {
    pub timeout_ms: Option<u64>,
    pub client_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageGenSettings {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub size: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub image_api_key: Option<String>,
    pub verbose: bool,
}

impl Creative404Config {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables
    /// 3. Config file (~/.creative404/config.toml)
    /// 4. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::load_from(config_dir(), |key| std::env::var(key).ok(), overrides)
    }

    /// [`load`](Self::load) with an explicit config directory and env lookup.
    pub fn load_from(
        config_dir: PathBuf,
        env: impl Fn(&str) -> Option<String>,
        overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let settings = load_settings_file(&config_dir.join("config.toml"));

        // Resolve bind address: CLI > env > config file > default
        let bind_raw = overrides
            .bind
            .or_else(|| env("CREATIVE404_BIND"))
            .or(settings.server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "bind".into(),
                message: format!("'{bind_raw}' is not a socket address: {e}"),
            })?;

        // MCP client
        let mut mcp = McpClientConfig::default();
        if let Some(timeout_ms) = parse_env_u64(&env, "CREATIVE404_MCP_TIMEOUT_MS")?
            .or(settings.mcp.timeout_ms)
        {
            mcp.timeout_ms = timeout_ms;
        }
        if let Some(name) = settings.mcp.client_name {
            mcp.client_name = name;
        }
        require_nonzero("mcp.timeout_ms", mcp.timeout_ms)?;

        // Image generation: API key is CLI > env > OPENAI_API_KEY > config file
        let mut image_generation = ImageGenConfig {
            api_key: overrides
                .image_api_key
                .or_else(|| env("CREATIVE404_IMAGE_API_KEY"))
                .or_else(|| env("OPENAI_API_KEY"))
                .or(settings.image_generation.api_key)
                .filter(|k| !k.trim().is_empty()),
            ..ImageGenConfig::default()
        };
        if let Some(endpoint) = env("CREATIVE404_IMAGE_ENDPOINT").or(settings.image_generation.endpoint) {
            image_generation.endpoint = endpoint;
        }
        if let Some(model) = env("CREATIVE404_IMAGE_MODEL").or(settings.image_generation.model) {
            image_generation.model = model;
        }
        if let Some(size) = env("CREATIVE404_IMAGE_SIZE").or(settings.image_generation.size) {
            image_generation.size = size;
        }
        if let Some(timeout_ms) = settings.image_generation.timeout_ms {
            image_generation.timeout_ms = timeout_ms;
        }
        require_nonzero("image_generation.timeout_ms", image_generation.timeout_ms)?;

        Ok(Creative404Config {
            bind,
            verbose: overrides.verbose,
            mcp,
            image_generation,
            config_dir,
        })
    }
}

/// Get the Creative404 config directory path (~/.creative404/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CREATIVE404_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".creative404")
}

/// Load and parse a TOML settings file, returning defaults on any error.
fn load_settings_file(path: &Path) -> SettingsFile {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            SettingsFile::default()
        }),
        Err(_) => SettingsFile::default(),
    }
}

fn parse_env_u64(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<u64>, ConfigError> {
    env(key)
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: key.into(),
                message: format!("'{raw}': {e}"),
            })
        })
        .transpose()
}

fn require_nonzero(key: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.into(),
            message: "must be greater than zero".into(),
        });
    }
    Ok(())
}
