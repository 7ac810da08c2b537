use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use matstock_core::error::CoreError;
use matstock_db::repositories::RepoError;
use matstock_db::StoreError;
use serde_json::json;

use crate::response::ApiResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the standard envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `matstock_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The JSON document could not be read or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The request could not be parsed into a typed payload (bad JSON,
    /// wrong field type, unknown field, non-numeric id).
    #[error("Bad request {field}: {message}")]
    BadRequest { field: &'static str, message: String },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Core(e) => AppError::Core(e),
            RepoError::Store(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    Some(json!({ "id": id })),
                ),
                CoreError::Validation(errors) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Request validation failed".to_string(),
                    Some(json!({ "errors": errors })),
                ),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
                Some(json!({ "errors": [{ "field": field, "message": message }] })),
            ),

            // --- Storage failures: log everything, return nothing ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, axum::Json(ApiResponse::error(code, message, details))).into_response()
    }
}
