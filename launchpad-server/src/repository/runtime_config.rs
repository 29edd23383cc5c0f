//! Runtime Config Repository
//!
//! Reads and writes `server.config.json`, which holds the listening port.

use launchpad_core::domain::server::ServerRuntimeConfig;
use std::path::{Path, PathBuf};

use super::{RepositoryError, Result};

pub const CONFIG_FILENAME: &str = "server.config.json";

pub fn path(server_files: &Path) -> PathBuf {
    server_files.join(CONFIG_FILENAME)
}

/// Load the runtime config, creating it with the default port when absent
pub async fn load_or_create(server_files: &Path) -> Result<ServerRuntimeConfig> {
    match tokio::fs::read_to_string(path(server_files)).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = ServerRuntimeConfig::default();
            tracing::info!(
                "Config file not found. Creating with default port {}.",
                config.port
            );
            save(server_files, &config).await?;
            Ok(config)
        }
        Err(err) => Err(RepositoryError::Io(err)),
    }
}

/// Persist the runtime config, pretty-printed
pub async fn save(server_files: &Path, config: &ServerRuntimeConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    tokio::fs::write(path(server_files), content).await?;
    Ok(())
}
