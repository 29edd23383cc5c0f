//! Launcher settings
//!
//! The server address is the only persisted setting. It lives in a small JSON
//! file inside the launcher's config directory and is owned by a single
//! [`ServerAddressStore`]; everything else receives the address as a value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::error::{BridgeError, Result};

/// Address used when nothing has been saved yet
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8080";

const SETTINGS_FILENAME: &str = "config.json";

/// On-disk settings document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LauncherSettings {
    server_address: String,
}

/// Process-wide owner of the persisted server address
#[derive(Debug)]
pub struct ServerAddressStore {
    path: PathBuf,
    current: RwLock<String>,
}

impl ServerAddressStore {
    /// Settings file location inside `config_dir`
    pub fn settings_path(config_dir: &Path) -> PathBuf {
        config_dir.join(SETTINGS_FILENAME)
    }

    /// Loads the stored address from `path`
    ///
    /// A missing file is created with [`DEFAULT_SERVER_ADDRESS`]; if that write
    /// fails the default is still used for this session. An unreadable file
    /// also falls back to the default but is left untouched on disk.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let address = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<LauncherSettings>(&content) {
                Ok(settings) => {
                    debug!("Loaded server address from {}", path.display());
                    settings.server_address
                }
                Err(e) => {
                    warn!(
                        "Ignoring unreadable settings file {}: {}",
                        path.display(),
                        e
                    );
                    DEFAULT_SERVER_ADDRESS.to_string()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No settings at {}, using default server address",
                    path.display()
                );
                if let Err(e) = write_settings(&path, DEFAULT_SERVER_ADDRESS) {
                    warn!("Could not save default settings: {}", e);
                }
                DEFAULT_SERVER_ADDRESS.to_string()
            }
            Err(e) => {
                warn!("Could not read settings file {}: {}", path.display(), e);
                DEFAULT_SERVER_ADDRESS.to_string()
            }
        };

        Self {
            path,
            current: RwLock::new(address),
        }
    }

    /// Loads the store from the default file inside `config_dir`
    pub fn load_from_dir(config_dir: &Path) -> Self {
        Self::load(Self::settings_path(config_dir))
    }

    /// The address currently in effect
    pub fn get(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persists `address` and makes it current
    ///
    /// The in-memory value only changes once the file has been written.
    pub fn set(&self, address: &str) -> Result<()> {
        write_settings(&self.path, address)?;

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = address.to_string();

        info!("Server address set to {}", address);
        Ok(())
    }

    /// Makes `address` current for this process without saving it
    pub fn use_for_session(&self, address: &str) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = address.to_string();

        debug!("Using server address {} for this session", address);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_settings(path: &Path, address: &str) -> Result<()> {
    let settings = LauncherSettings {
        server_address: address.to_string(),
    };
    let data = serde_json::to_string_pretty(&settings)
        .map_err(|e| BridgeError::Settings(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BridgeError::Settings(e.to_string()))?;
    }
    std::fs::write(path, data).map_err(|e| BridgeError::Settings(e.to_string()))
}
