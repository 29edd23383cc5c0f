//! Catalog listing (manifest client)

use launchpad_core::domain::catalog::CatalogEntry;
use launchpad_core::endpoint;
use tracing::debug;

use crate::LaunchpadClient;
use crate::error::{ClientError, Result};

/// Shown instead of a raw decoder message when the catalog body is not valid JSON
pub const CATALOG_DECODE_MESSAGE: &str = "Could not load the application catalog";

impl LaunchpadClient {
    /// Fetch the catalog published at `server_address`
    ///
    /// Entries are decoded as-is; missing fields take their defaults and no
    /// further validation happens here.
    ///
    /// # Errors
    /// * [`ClientError::Transport`] when no response is obtained
    /// * [`ClientError::Server`] when the status is not 2xx
    /// * [`ClientError::Decode`] when the body is not a JSON array of entries
    pub async fn fetch_catalog(&self, server_address: &str) -> Result<Vec<CatalogEntry>> {
        let url = endpoint::catalog_url(server_address);
        debug!("Fetching catalog from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&body).map_err(|e| {
            debug!("Catalog body failed to decode: {}", e);
            ClientError::Decode(CATALOG_DECODE_MESSAGE.to_string())
        })?;

        debug!("Fetched {} catalog entries", entries.len());
        Ok(entries)
    }

    /// Ask the service whether it is up
    ///
    /// Returns the service's status line.
    pub async fn server_status(&self, server_address: &str) -> Result<String> {
        let url = endpoint::status_url(server_address);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
