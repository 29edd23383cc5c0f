//! Launchpad HTTP Client
//!
//! A small, type-safe HTTP client for talking to a Launchpad catalog service.
//!
//! The server address is not baked into the client: every call takes it as an
//! argument, so a launcher can switch servers without rebuilding its client.
//!
//! # Example
//!
//! ```no_run
//! use launchpad_client::LaunchpadClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), launchpad_client::ClientError> {
//!     let client = LaunchpadClient::new();
//!
//!     let catalog = client.fetch_catalog("http://localhost:8080").await?;
//!     for entry in &catalog {
//!         println!("{}: {}", entry.name, entry.description);
//!     }
//!     Ok(())
//! }
//! ```

mod admin;
mod artifacts;
mod catalog;
pub mod error;

// Re-export commonly used types
pub use admin::CONFIG_DECODE_MESSAGE;
pub use catalog::CATALOG_DECODE_MESSAGE;
pub use error::{ClientError, Result};
pub use launchpad_core::domain::catalog::CatalogEntry;

use reqwest::Client;

/// HTTP client for the Launchpad catalog service
///
/// Methods are grouped by concern:
/// - Catalog listing (manifest client)
/// - Artifact and staged-script downloads (artifact client)
/// - Admin manifest, port and restart endpoints
#[derive(Debug, Clone, Default)]
pub struct LaunchpadClient {
    /// HTTP client instance
    client: Client,
}

impl LaunchpadClient {
    /// Create a new client with reqwest's default settings
    ///
    /// No timeout is configured beyond the transport defaults.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new client around a configured reqwest Client
    ///
    /// Useful when artifact downloads need a proxy or a connect timeout.
    ///
    /// ```
    /// let http = reqwest::Client::builder()
    ///     .connect_timeout(std::time::Duration::from_secs(5))
    ///     .user_agent("launchpad")
    ///     .build()?;
    ///
    /// let client = launchpad_client::LaunchpadClient::with_client(http);
    /// # Ok::<(), reqwest::Error>(())
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read a response body as text, tolerating a body that cannot be read
    async fn body_text(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }

    /// Handle an admin response whose body is plain text
    ///
    /// Non-success statuses become [`ClientError::Api`] carrying the body verbatim.
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = Self::body_text(response).await;
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = LaunchpadClient::with_client(http_client);
        assert!(format!("{:?}", client).contains("LaunchpadClient"));
    }
}
