//! Creative404: turn an MCP server's metadata into a themed 404 image.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use creative404_config::{CliOverrides, Creative404Config};
use creative404_server::{AppState, router};

#[derive(Parser)]
#[command(
    name = "creative404",
    version,
    about = "Inspect MCP servers and render themed 404 images"
)]
struct Cli {
    /// Address to listen on (overrides CREATIVE404_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Image generation API key (overrides CREATIVE404_IMAGE_API_KEY)
    #[arg(long)]
    image_api_key: Option<String>,

    /// Enable verbose/debug logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli)?;
    tracing::debug!(config_dir = %config.config_dir.display(), "Configuration loaded");

    let state = AppState::from_config(&config).context("Failed to create MCP client")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "Creative404 listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn load_config(cli: Cli) -> Result<Creative404Config> {
    Creative404Config::load(CliOverrides {
        bind: cli.bind,
        image_api_key: cli.image_api_key,
        verbose: cli.verbose,
    })
    .context("Failed to load configuration")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creative404_types::ConfigError;

    #[test]
    fn config_error_keeps_its_type() {
        let cli = Cli::try_parse_from(["creative404", "--bind", "not-an-address"]).unwrap();
        let err = load_config(cli).unwrap_err();

        assert_eq!(err.to_string(), "Failed to load configuration");
        let cause = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(cause, ConfigError::InvalidValue { key, .. } if key == "bind"));
    }
}
