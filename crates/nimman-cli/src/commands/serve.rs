//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use nimman_core::{AppConfig, DataSource, DataStore};
use nimman_server::{AppState, ServerConfig};

pub async fn cmd_serve(
    config: &AppConfig,
    source: DataSource,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Nimman web server...");
    println!("   Data: {}", source.describe());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let server_config = ServerConfig::from_env();

    if server_config.require_auth() {
        println!(
            "   🔑 API keys: {} configured (NIMMAN_API_KEYS)",
            server_config.api_keys.len()
        );
    } else {
        println!("   ⚠️  No API keys configured - set NIMMAN_API_KEYS before exposing to a network");
    }
    if !server_config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (NIMMAN_ALLOWED_ORIGINS)",
            server_config.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let store = DataStore::open(source).context("Failed to load shop data")?;

    let state = AppState {
        store,
        engine: config.engine(),
        default_range: config.range,
        config: server_config,
    };

    nimman_server::serve_with_config(state, host, port, static_dir).await?;

    Ok(())
}
