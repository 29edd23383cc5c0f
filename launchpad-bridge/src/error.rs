//! Bridge error types
//!
//! Every variant renders a message meant for direct display to the user.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The payload could not be written to disk
    #[error("failed to save artifact: {0}")]
    Save(String),

    /// The payload is not a readable archive, or holds unsafe paths
    #[error("failed to unpack archive: {0}")]
    Unpack(String),

    /// The run command is blank
    #[error("run command is empty")]
    EmptyCommand,

    /// The program could not be started at all
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("command execution failed: {status}\nOutput: {output}")]
    CommandFailed { status: String, output: String },

    /// A tool the run depends on is missing
    #[error("{0}")]
    MissingTool(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("failed to download script: {0}")]
    Download(#[from] launchpad_client::ClientError),

    #[error("downloaded file is empty")]
    EmptyDownload,

    /// The settings file could not be written
    #[error("failed to save settings: {0}")]
    Settings(String),
}
