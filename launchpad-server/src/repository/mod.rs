//! Repository Module
//!
//! File access layer for the catalog service.
//! Each submodule owns one file inside the server-files directory.

pub mod manifest;
pub mod runtime_config;

// Re-export for convenience
pub use manifest as manifest_repository;
pub use runtime_config as config_repository;

/// Repository error type
#[derive(Debug)]
pub enum RepositoryError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::Io(err) => write!(f, "I/O error: {}", err),
            RepositoryError::Parse(err) => write!(f, "parse error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err)
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Parse(err)
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
