//! Shared server state

use anyhow::{Context, Result};
use launchpad_core::domain::catalog::CatalogEntry;
use launchpad_core::domain::server::ServerRuntimeConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

use crate::config::Config;
use crate::repository::{config_repository, manifest_repository};

/// State handed to every request handler
///
/// The catalog and runtime config are loaded from disk at startup and on
/// every restart; admin updates write through to disk first.
#[derive(Clone)]
pub struct AppState {
    server_files: Arc<PathBuf>,
    pub catalog: Arc<RwLock<Vec<CatalogEntry>>>,
    pub runtime_config: Arc<RwLock<ServerRuntimeConfig>>,
    /// Signalled when the listener should shut down and rebind
    pub restart: Arc<Notify>,
    pub restart_delay: Duration,
}

impl AppState {
    /// Loads the manifest and runtime config from the server-files directory
    pub async fn load(config: &Config) -> Result<Self> {
        let server_files = config.server_files.clone();
        let (catalog, runtime_config) = load_files(&server_files).await?;

        Ok(Self {
            server_files: Arc::new(server_files),
            catalog: Arc::new(RwLock::new(catalog)),
            runtime_config: Arc::new(RwLock::new(runtime_config)),
            restart: Arc::new(Notify::new()),
            restart_delay: config.restart_delay,
        })
    }

    /// Re-reads both files, as a fresh process would
    pub async fn reload(&self) -> Result<()> {
        let (catalog, runtime_config) = load_files(&self.server_files).await?;
        *self.catalog.write().await = catalog;
        *self.runtime_config.write().await = runtime_config;
        Ok(())
    }

    pub fn server_files(&self) -> &Path {
        &self.server_files
    }
}

async fn load_files(server_files: &Path) -> Result<(Vec<CatalogEntry>, ServerRuntimeConfig)> {
    let runtime_config = config_repository::load_or_create(server_files)
        .await
        .context("Failed to load configuration")?;

    let catalog = manifest_repository::load(server_files)
        .await
        .with_context(|| {
            format!(
                "Failed to load manifest file at {}",
                manifest_repository::path(server_files).display()
            )
        })?;

    tracing::info!("Loaded {} applications from manifest.", catalog.len());
    Ok((catalog, runtime_config))
}
