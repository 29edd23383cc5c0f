//! Catalog Service
//!
//! Lists the published catalog and produces artifacts, building them first
//! when the entry declares a build command.

use launchpad_core::domain::catalog::CatalogEntry;
use std::path::Path;
use tokio::process::Command;

use crate::state::AppState;

/// Service error type
#[derive(Debug)]
pub enum CatalogError {
    NotFound(String),
    BuildFailed(String),
    ArtifactMissing(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// A built artifact ready to be sent
#[derive(Debug)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// List all entries, in manifest order
pub async fn list_applications(state: &AppState) -> Vec<CatalogEntry> {
    state.catalog.read().await.clone()
}

/// Build (if needed) and read the artifact of the first entry named `name`
pub async fn build_artifact(state: &AppState, name: &str) -> Result<Artifact> {
    let entry = state
        .catalog
        .read()
        .await
        .iter()
        .find(|entry| entry.name == name)
        .cloned()
        .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

    if let Some(build_command) = entry.build_command() {
        run_build(state.server_files(), &entry.name, build_command).await?;
    }

    let artifact_path = state.server_files().join(&entry.artifact_path);
    let bytes = match tokio::fs::read(&artifact_path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::ArtifactMissing(entry.artifact_path.clone()));
        }
        Err(err) => return Err(CatalogError::Io(err)),
    };

    let file_name = artifact_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.name.clone());

    Ok(Artifact { file_name, bytes })
}

async fn run_build(server_files: &Path, name: &str, build_command: &str) -> Result<()> {
    tracing::info!("Building '{}' with: {}", name, build_command);

    let output = Command::new("bash")
        .arg("-c")
        .arg(build_command)
        .current_dir(server_files)
        .output()
        .await?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        tracing::error!(
            "Build failed for '{}': {}\n{}",
            name,
            output.status,
            combined
        );
        return Err(CatalogError::BuildFailed(combined));
    }

    tracing::info!("Build successful for '{}'", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repository::manifest_repository;

    async fn state_with(entries: Vec<CatalogEntry>) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        manifest_repository::save(dir.path(), &entries).await.unwrap();
        let config = Config {
            server_files: dir.path().to_path_buf(),
            ..Config::default()
        };
        (AppState::load(&config).await.unwrap(), dir)
    }

    fn entry(name: &str, artifact_path: &str, build_command: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            artifact_path: artifact_path.to_string(),
            build_command: build_command.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unknown_entry() {
        let (state, _dir) = state_with(vec![]).await;

        let err = build_artifact(&state, "ghost").await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_prebuilt_artifact() {
        let (state, dir) = state_with(vec![entry("demo", "demo.py", None)]).await;
        std::fs::write(dir.path().join("demo.py"), "print(1)").unwrap();

        let artifact = build_artifact(&state, "demo").await.unwrap();

        assert_eq!(artifact.file_name, "demo.py");
        assert_eq!(artifact.bytes, b"print(1)");
    }

    #[tokio::test]
    async fn test_missing_artifact_file() {
        let (state, _dir) = state_with(vec![entry("demo", "gone.bin", None)]).await;

        let err = build_artifact(&state, "demo").await.unwrap_err();

        assert!(matches!(err, CatalogError::ArtifactMissing(path) if path == "gone.bin"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_runs_in_server_files() {
        let (state, _dir) = state_with(vec![entry(
            "built",
            "out/built.txt",
            Some("mkdir -p out && printf fresh > out/built.txt"),
        )])
        .await;

        let artifact = build_artifact(&state, "built").await.unwrap();

        assert_eq!(artifact.file_name, "built.txt");
        assert_eq!(artifact.bytes, b"fresh");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_failure_carries_output() {
        let (state, _dir) = state_with(vec![entry(
            "broken",
            "x",
            Some("echo compiler exploded >&2; exit 1"),
        )])
        .await;

        let err = build_artifact(&state, "broken").await.unwrap_err();

        assert!(matches!(err, CatalogError::BuildFailed(output) if output.contains("compiler exploded")));
    }
}
