//! Handlers for material CRUD.
//!
//! Each handler parses its input through [`ApiJson`] / [`IdPath`], delegates
//! to [`MaterialRepo`], and wraps the result in [`ApiResponse`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matstock_core::material::{MaterialInput, MaterialPatch};
use matstock_db::repositories::MaterialRepo;

use crate::error::AppResult;
use crate::extract::{ApiJson, IdPath};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/materials
pub async fn create_material(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<MaterialInput>,
) -> AppResult<impl IntoResponse> {
    let material = MaterialRepo::create(&state.store, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Material created", material)),
    ))
}

/// GET /api/v1/materials
///
/// Returns every material in stored order, plus a `total` count.
pub async fn list_materials(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let materials = MaterialRepo::list_all(&state.store).await?;
    let total = materials.len();

    Ok(Json(
        ApiResponse::ok(format!("Found {total} materials"), materials).with_total(total),
    ))
}

/// GET /api/v1/materials/{id}
pub async fn get_material(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    let material = MaterialRepo::get(&state.store, id).await?;

    Ok(Json(ApiResponse::ok("Material found", material)))
}

/// PUT /api/v1/materials/{id}
///
/// Partial update: only the supplied fields change.
pub async fn update_material(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(patch): ApiJson<MaterialPatch>,
) -> AppResult<impl IntoResponse> {
    let material = MaterialRepo::update(&state.store, id, patch).await?;

    Ok(Json(ApiResponse::ok(
        format!("Material with id {id} updated"),
        material,
    )))
}

/// DELETE /api/v1/materials/{id}
pub async fn delete_material(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    MaterialRepo::delete(&state.store, id).await?;

    Ok(Json(ApiResponse::message(format!(
        "Material with id {id} deleted"
    ))))
}
