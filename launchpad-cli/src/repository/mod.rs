//! Repository Module
//!
//! Seams between the workflows and the remote catalog service.
//! The HTTP implementation delegates to `LaunchpadClient`; tests swap in fakes.

mod http;

pub use http::HttpRepository;

use async_trait::async_trait;
use launchpad_client::Result;
use launchpad_core::domain::catalog::CatalogEntry;
use launchpad_core::domain::server::ServerRuntimeConfig;

/// Source of the published catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn fetch_catalog(&self, server_address: &str) -> Result<Vec<CatalogEntry>>;
}

/// Source of artifact payloads
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn fetch_artifact(&self, server_address: &str, entry_name: &str) -> Result<Vec<u8>>;
}

/// Admin surface of the catalog service
///
/// Every write returns the service's reply text.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn get_manifest(&self, admin_url: &str) -> Result<String>;

    async fn put_manifest(&self, admin_url: &str, manifest: &str) -> Result<String>;

    async fn get_server_config(&self, admin_url: &str) -> Result<ServerRuntimeConfig>;

    async fn put_server_config(&self, admin_url: &str, config: &ServerRuntimeConfig)
    -> Result<String>;

    async fn restart_server(&self, admin_url: &str) -> Result<String>;
}
