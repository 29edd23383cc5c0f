//! HTTP-backed repositories

use async_trait::async_trait;
use launchpad_client::{LaunchpadClient, Result};
use launchpad_core::domain::catalog::CatalogEntry;
use launchpad_core::domain::server::ServerRuntimeConfig;

use super::{AdminRepository, ArtifactRepository, CatalogRepository};

/// All repositories, served by one HTTP client
#[derive(Debug, Clone, Default)]
pub struct HttpRepository {
    client: LaunchpadClient,
}

impl HttpRepository {
    pub fn new(client: LaunchpadClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogRepository for HttpRepository {
    async fn fetch_catalog(&self, server_address: &str) -> Result<Vec<CatalogEntry>> {
        self.client.fetch_catalog(server_address).await
    }
}

#[async_trait]
impl ArtifactRepository for HttpRepository {
    async fn fetch_artifact(&self, server_address: &str, entry_name: &str) -> Result<Vec<u8>> {
        self.client.fetch_artifact(server_address, entry_name).await
    }
}

#[async_trait]
impl AdminRepository for HttpRepository {
    async fn get_manifest(&self, admin_url: &str) -> Result<String> {
        self.client.get_manifest(admin_url).await
    }

    async fn put_manifest(&self, admin_url: &str, manifest: &str) -> Result<String> {
        self.client.put_manifest(admin_url, manifest).await
    }

    async fn get_server_config(&self, admin_url: &str) -> Result<ServerRuntimeConfig> {
        self.client.get_server_config(admin_url).await
    }

    async fn put_server_config(
        &self,
        admin_url: &str,
        config: &ServerRuntimeConfig,
    ) -> Result<String> {
        self.client.put_server_config(admin_url, config).await
    }

    async fn restart_server(&self, admin_url: &str) -> Result<String> {
        self.client.restart_server(admin_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};

    #[tokio::test]
    async fn test_catalog_through_http() {
        let router = Router::new().route(
            "/api/v1/applications",
            get(|| async { r#"[{"name":"demo","run_command":"python demo.py"}]"# }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let repository = HttpRepository::default();
        let entries = repository.fetch_catalog(&address).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].run_command, "python demo.py");
    }
}
