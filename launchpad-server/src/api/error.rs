//! API Error Handling
//!
//! Unified error type and conversion for API responses.
//! Error bodies are plain text: the launcher shows them to the user verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::repository::RepositoryError;
use crate::service::admin_service::AdminError;
use crate::service::catalog_service::CatalogError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, message).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::NotFound("Application not found".to_string()),
            CatalogError::ArtifactMissing(path) => {
                ApiError::NotFound(format!("Artifact file not found: {}", path))
            }
            CatalogError::BuildFailed(output) => {
                ApiError::InternalError(format!("Build failed: {}", output))
            }
            CatalogError::Io(err) => {
                tracing::error!("Artifact I/O error: {:?}", err);
                ApiError::InternalError("Failed to read artifact".to_string())
            }
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::InvalidJson(err) => {
                tracing::debug!("Rejected admin payload: {}", err);
                ApiError::BadRequest("Invalid JSON format".to_string())
            }
            AdminError::InvalidPort(port) => ApiError::BadRequest(format!("Invalid port: {}", port)),
            AdminError::Repository(err) => err.into(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        tracing::error!("Repository error: {}", err);
        ApiError::InternalError("Failed to access server files".to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
