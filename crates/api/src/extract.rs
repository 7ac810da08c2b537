//! Request extractors whose rejections use the standard error envelope.
//!
//! Axum's stock `Json` and `Path` rejections answer in plain text. These
//! wrappers turn them into [`AppError::BadRequest`] so every failure a
//! client sees is a `VALIDATION_ERROR` envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use matstock_core::types::MaterialId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor. Parse failures become a violation on field `body`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(AppError::BadRequest {
                field: "body",
                message: rejection.body_text(),
            }),
        }
    }
}

/// `{id}` path segment. A non-numeric id is a violation on field `id`.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub MaterialId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<MaterialId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdPath(id)),
            Err(rejection) => Err(AppError::BadRequest {
                field: "id",
                message: rejection.body_text(),
            }),
        }
    }
}
