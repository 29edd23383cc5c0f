//! API Module
//!
//! HTTP API layer for the catalog server.
//! Each submodule handles endpoints for a specific area.

pub mod admin;
pub mod catalog;
pub mod error;
pub mod health;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use launchpad_core::endpoint;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main API router with all endpoints
///
/// Anything that is not an API route is served straight from the
/// server-files directory, which is where staged scripts live.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let staged_files = ServeDir::new(state.server_files());

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route(endpoint::STATUS_PATH, get(health::status))
        // Catalog endpoints
        .route(endpoint::APPLICATIONS_PATH, get(catalog::list_applications))
        .route(
            &format!("{}/{{name}}/artifact", endpoint::APPLICATIONS_PATH),
            get(catalog::get_artifact),
        )
        // Admin endpoints
        .route(
            endpoint::ADMIN_MANIFEST_PATH,
            get(admin::get_manifest).put(admin::update_manifest),
        )
        .route(
            endpoint::ADMIN_CONFIG_PATH,
            get(admin::get_config).put(admin::update_config),
        )
        .route(endpoint::ADMIN_RESTART_PATH, post(admin::restart_server))
        .fallback_service(staged_files)
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
