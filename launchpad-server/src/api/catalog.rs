//! Catalog API Handlers
//!
//! Public endpoints the launcher reads from.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use launchpad_core::domain::catalog::CatalogEntry;

use crate::api::error::ApiResult;
use crate::service::catalog_service;
use crate::state::AppState;

/// GET /api/v1/applications
/// List the catalog
pub async fn list_applications(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    tracing::debug!("Listing applications");

    Json(catalog_service::list_applications(&state).await)
}

/// GET /api/v1/applications/{name}/artifact
/// Build (when needed) and download an artifact
///
/// `name` arrives percent-decoded.
pub async fn get_artifact(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    tracing::info!("Artifact requested for '{}'", name);

    let artifact = catalog_service::build_artifact(&state, &name).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    ))
}
