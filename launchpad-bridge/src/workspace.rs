//! Temporary workspaces
//!
//! Each run materializes its artifact into a fresh temporary directory that is
//! removed once the run is over.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{BridgeError, Result};

const WORKSPACE_PREFIX: &str = "launchpad-";

/// A fresh working directory for a single run
pub(crate) struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| BridgeError::Save(format!("failed to create temp dir: {}", e)))?;

        debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Extracts a zip payload into the workspace
    ///
    /// Entries whose paths would land outside the workspace are rejected.
    /// Returns the number of archive entries.
    pub async fn unpack(&self, payload: Vec<u8>) -> Result<usize> {
        let target = self.dir.path().to_path_buf();

        tokio::task::spawn_blocking(move || {
            let mut archive = zip::ZipArchive::new(Cursor::new(payload))
                .map_err(|e| BridgeError::Unpack(format!("failed to read zip data: {}", e)))?;
            let entries = archive.len();
            archive
                .extract(&target)
                .map_err(|e| BridgeError::Unpack(e.to_string()))?;
            Ok(entries)
        })
        .await
        .map_err(|e| BridgeError::Unpack(format!("unpack task failed: {}", e)))?
    }

    /// Writes `payload` as an executable file named `file_name`
    ///
    /// `file_name` must be a plain file name; anything with directory
    /// components is refused.
    pub async fn write_executable(&self, file_name: &str, payload: &[u8]) -> Result<PathBuf> {
        let is_plain_name = Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name);
        if !is_plain_name {
            return Err(BridgeError::Save(format!(
                "'{}' is not a plain file name",
                file_name
            )));
        }

        let path = self.dir.path().join(file_name);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| BridgeError::Save(format!("failed to write {}: {}", file_name, e)))?;
        make_executable(&path).await?;

        debug!("Wrote {} bytes to {}", payload.len(), path.display());
        Ok(path)
    }

    /// Removes the workspace, logging instead of failing when that is not possible
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove workspace {}: {}", path.display(), e);
        }
    }
}

#[cfg(unix)]
pub(crate) async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| BridgeError::Save(format!("failed to make {} executable: {}", path.display(), e)))
}

#[cfg(not(unix))]
pub(crate) async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    /// Builds an in-memory zip from `(path, contents)` pairs
    pub fn zip_of(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}
