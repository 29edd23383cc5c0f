//! Health Check API Handlers
//!
//! Simple liveness endpoints for monitoring and for launchers probing a server.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /api/v1/status
pub async fn status() -> &'static str {
    "Server is running"
}
