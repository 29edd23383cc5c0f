//! Admin endpoints: manifest document, runtime port and restart

use launchpad_core::domain::server::ServerRuntimeConfig;
use launchpad_core::endpoint;
use tracing::debug;

use crate::LaunchpadClient;
use crate::error::{ClientError, Result};

/// Shown instead of a raw decoder message when the config body is not valid JSON
pub const CONFIG_DECODE_MESSAGE: &str = "Could not load the server configuration";

impl LaunchpadClient {
    // =============================================================================
    // Manifest Document
    // =============================================================================

    /// Get the raw manifest document
    ///
    /// The text is returned untouched so it can be edited in place.
    pub async fn get_manifest(&self, server_address: &str) -> Result<String> {
        let url = endpoint::admin_manifest_url(server_address);
        let response = self.client.get(&url).send().await?;

        self.handle_text_response(response).await
    }

    /// Replace the manifest document
    ///
    /// `manifest` is sent as the raw request body. Returns the service's reply text.
    pub async fn put_manifest(&self, server_address: &str, manifest: &str) -> Result<String> {
        let url = endpoint::admin_manifest_url(server_address);
        debug!("Submitting manifest ({} bytes) to {}", manifest.len(), url);

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(manifest.to_string())
            .send()
            .await?;

        self.handle_text_response(response).await
    }

    // =============================================================================
    // Runtime Config
    // =============================================================================

    /// Get the configuration the service is running with
    pub async fn get_server_config(&self, server_address: &str) -> Result<ServerRuntimeConfig> {
        let url = endpoint::admin_config_url(server_address);
        let response = self.client.get(&url).send().await?;

        let body = self.handle_text_response(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            debug!("Server config failed to decode: {}", e);
            ClientError::Decode(CONFIG_DECODE_MESSAGE.to_string())
        })
    }

    /// Save a new runtime configuration
    ///
    /// Takes effect only after a restart. Returns the service's reply text.
    pub async fn put_server_config(
        &self,
        server_address: &str,
        config: &ServerRuntimeConfig,
    ) -> Result<String> {
        let url = endpoint::admin_config_url(server_address);
        let response = self.client.put(&url).json(config).send().await?;

        self.handle_text_response(response).await
    }

    // =============================================================================
    // Restart
    // =============================================================================

    /// Ask the service to restart on its saved configuration
    pub async fn restart_server(&self, server_address: &str) -> Result<String> {
        let url = endpoint::admin_restart_url(server_address);
        let response = self.client.post(&url).send().await?;

        self.handle_text_response(response).await
    }
}
