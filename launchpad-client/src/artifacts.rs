//! Artifact downloads

use launchpad_core::endpoint;
use tracing::debug;

use crate::LaunchpadClient;
use crate::error::{ClientError, Result};

impl LaunchpadClient {
    /// Download the artifact of the catalog entry called `entry_name`
    ///
    /// The whole body is buffered in memory; there is no streaming or resumption.
    ///
    /// # Errors
    /// * [`ClientError::Transport`] when no response is obtained
    /// * [`ClientError::ArtifactFetch`] when the status is not 2xx, carrying the
    ///   body text verbatim since the service explains failures there
    pub async fn fetch_artifact(&self, server_address: &str, entry_name: &str) -> Result<Vec<u8>> {
        let url = endpoint::artifact_url(server_address, entry_name);
        self.download(&url).await
    }

    /// Download a script staged directly under the server root
    ///
    /// Used by the legacy named-script flow, where the service publishes files
    /// rather than catalog artifacts.
    pub async fn fetch_staged_file(&self, server_address: &str, filename: &str) -> Result<Vec<u8>> {
        let url = endpoint::staged_file_url(server_address, filename);
        self.download(&url).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::body_text(response).await;
            return Err(ClientError::ArtifactFetch {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
