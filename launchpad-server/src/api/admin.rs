//! Admin API Handlers
//!
//! Manifest editing, runtime config and restart.
//! Request bodies are taken as raw text so malformed JSON gets the same
//! plain-text rejection from every endpoint.

use axum::{Json, extract::State, http::header, response::IntoResponse};
use launchpad_core::domain::server::ServerRuntimeConfig;

use crate::api::error::ApiResult;
use crate::service::admin_service;
use crate::state::AppState;

/// GET /api/admin/manifest
/// The manifest document as stored
pub async fn get_manifest(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let manifest = admin_service::read_manifest(&state).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], manifest))
}

/// PUT /api/admin/manifest
/// Replace the manifest
pub async fn update_manifest(State(state): State<AppState>, body: String) -> ApiResult<&'static str> {
    admin_service::update_manifest(&state, &body).await?;

    Ok("Manifest updated successfully")
}

/// GET /api/admin/server/config
/// The runtime config in effect
pub async fn get_config(State(state): State<AppState>) -> Json<ServerRuntimeConfig> {
    Json(admin_service::read_config(&state).await)
}

/// PUT /api/admin/server/config
/// Save a new runtime config
pub async fn update_config(State(state): State<AppState>, body: String) -> ApiResult<&'static str> {
    admin_service::update_config(&state, &body).await?;

    Ok("Config updated successfully. Please restart the server to apply changes.")
}

/// POST /api/admin/server/restart
/// Rebind on the saved config after a short delay
pub async fn restart_server(State(state): State<AppState>) -> &'static str {
    tracing::info!("Restart requested");

    admin_service::schedule_restart(&state);

    "Server is restarting..."
}
