//! Admin Service
//!
//! Manifest editing, runtime config and restart.

use launchpad_core::domain::catalog::CatalogEntry;
use launchpad_core::domain::server::ServerRuntimeConfig;

use crate::repository::{RepositoryError, config_repository, manifest_repository};
use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum AdminError {
    InvalidJson(serde_json::Error),
    InvalidPort(String),
    Repository(RepositoryError),
}

impl From<RepositoryError> for AdminError {
    fn from(err: RepositoryError) -> Self {
        AdminError::Repository(err)
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

/// The manifest document as stored
pub async fn read_manifest(state: &AppState) -> Result<String> {
    Ok(manifest_repository::read_raw(state.server_files()).await?)
}

/// Replace the manifest with `body`
///
/// The body must be a JSON array of entries. It is written to disk
/// pretty-printed before the in-memory catalog is swapped.
pub async fn update_manifest(state: &AppState, body: &str) -> Result<usize> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(body).map_err(AdminError::InvalidJson)?;

    manifest_repository::save(state.server_files(), &entries).await?;

    let count = entries.len();
    *state.catalog.write().await = entries;

    tracing::info!("Manifest file updated successfully ({} entries).", count);
    Ok(count)
}

/// The saved runtime config
///
/// After [`update_config`] this reports the new port even though the listener
/// stays on its old port until the next restart.
pub async fn read_config(state: &AppState) -> ServerRuntimeConfig {
    state.runtime_config.read().await.clone()
}

/// Persist a new runtime config
///
/// The port takes effect on the next restart; until then the listener keeps
/// its current port.
pub async fn update_config(state: &AppState, body: &str) -> Result<ServerRuntimeConfig> {
    let config: ServerRuntimeConfig = serde_json::from_str(body).map_err(AdminError::InvalidJson)?;

    if config.port_number().is_none() {
        return Err(AdminError::InvalidPort(config.port));
    }

    config_repository::save(state.server_files(), &config).await?;
    *state.runtime_config.write().await = config.clone();

    tracing::info!("Server config file updated successfully (port {}).", config.port);
    Ok(config)
}

/// Signal a restart once the restart delay has passed
///
/// The delay lets the restart response reach the caller before the listener
/// goes away.
pub fn schedule_restart(state: &AppState) {
    let restart = state.restart.clone();
    let delay = state.restart_delay;

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tracing::info!("Restarting listener");
        restart.notify_one();
    });
}
