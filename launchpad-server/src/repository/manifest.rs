//! Manifest Repository
//!
//! Reads and writes `manifest.json`, the catalog as published.

use launchpad_core::domain::catalog::CatalogEntry;
use std::path::{Path, PathBuf};

use super::Result;

pub const MANIFEST_FILENAME: &str = "manifest.json";

pub fn path(server_files: &Path) -> PathBuf {
    server_files.join(MANIFEST_FILENAME)
}

/// Read the manifest document exactly as stored
pub async fn read_raw(server_files: &Path) -> Result<String> {
    Ok(tokio::fs::read_to_string(path(server_files)).await?)
}

/// Load and parse the catalog entries
pub async fn load(server_files: &Path) -> Result<Vec<CatalogEntry>> {
    let content = read_raw(server_files).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the catalog entries, pretty-printed
pub async fn save(server_files: &Path, entries: &[CatalogEntry]) -> Result<()> {
    let content = serde_json::to_string_pretty(entries)?;
    tokio::fs::write(path(server_files), content).await?;
    Ok(())
}
