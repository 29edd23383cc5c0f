//! Error types for the Launchpad client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to a catalog service
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was obtained (DNS, connection refused, timeout, broken body)
    #[error("Network request failed: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status
    #[error("Server responded with {status}")]
    Server {
        /// HTTP status code
        status: u16,
    },

    /// The artifact endpoint answered with a non-success status
    #[error("Failed to fetch artifact (status {status}): {body}")]
    ArtifactFetch {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// An admin endpoint answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        message: String,
    },

    /// The server sent a body that could not be decoded
    #[error("{0}")]
    Decode(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Renders an error followed by each of its sources
///
/// reqwest's own message rarely names the root cause ("connection refused"),
/// which only shows up further down the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_embeds_status() {
        let err = ClientError::Server { status: 503 };
        assert_eq!(err.to_string(), "Server responded with 503");
    }

    #[test]
    fn test_artifact_error_keeps_body() {
        let err = ClientError::ArtifactFetch {
            status: 404,
            body: "Application not found\n".to_string(),
        };
        assert!(err.to_string().contains("Application not found"));
        assert!(matches!(err, ClientError::ArtifactFetch { status: 404, .. }));
    }

    #[test]
    fn test_api_error_helper() {
        let err = ClientError::api_error(400, "Invalid JSON format");
        assert_eq!(err.to_string(), "API error (status 400): Invalid JSON format");
    }

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_appends_sources() {
        let err = Wrapped(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }
}
