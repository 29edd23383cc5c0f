//! Workflow error types

use launchpad_bridge::BridgeError;
use launchpad_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Why a workflow invocation ended in failure
///
/// Messages are shown to the user verbatim as the status text.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Checked before any network call
    #[error("Server address is not set.")]
    AddressNotSet,

    #[error("{0}")]
    Catalog(#[source] ClientError),

    #[error("{0}")]
    Artifact(#[source] ClientError),

    #[error("{0}")]
    Execution(#[source] BridgeError),

    #[error("{0}")]
    Settings(#[source] BridgeError),

    #[error("No application named '{0}' in the catalog")]
    NotFound(String),

    #[error("{count} applications are named '{name}'; choose one with --index 1..{count}")]
    Ambiguous { name: String, count: usize },

    #[error("Index {index} is out of range: {count} application(s) named '{name}'")]
    IndexOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages_pass_through() {
        let err = WorkflowError::Artifact(ClientError::ArtifactFetch {
            status: 404,
            body: "not found".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to fetch artifact (status 404): not found"
        );
    }

    #[test]
    fn test_ambiguous_message() {
        let err = WorkflowError::Ambiguous {
            name: "demo".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "2 applications are named 'demo'; choose one with --index 1..2"
        );
    }
}
