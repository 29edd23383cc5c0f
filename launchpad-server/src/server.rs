//! Listener lifecycle
//!
//! The server binds on the port from `server.config.json`, serves until a
//! restart is signalled, re-reads its files and binds again.

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::api;
use crate::config::Config;
use crate::state::AppState;

/// Serve forever, rebinding after every restart
pub async fn run(config: &Config, state: AppState) -> Result<()> {
    loop {
        let port = {
            let runtime_config = state.runtime_config.read().await;
            runtime_config
                .port_number()
                .with_context(|| format!("Invalid port in configuration: {}", runtime_config.port))?
        };

        let addr = format!("{}:{}", config.bind_host, port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        tracing::info!("Listening on {}", addr);

        serve(listener, state.clone()).await?;

        tracing::info!("Listener on {} stopped, reloading server files", addr);

        if let Err(e) = state.reload().await {
            // keep serving what was loaded before
            tracing::error!("Reload failed: {:#}", e);
        }
    }
}

/// Serve on `listener` until a restart is signalled
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let restart = state.restart.clone();
    let app = api::create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { restart.notified().await })
        .await
        .context("Server error")
}
