use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Configured application name.
    pub name: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET / -- welcome banner.
async fn root(State(state): State<AppState>) -> Json<ApiResponse> {
    Json(ApiResponse::message(format!(
        "Welcome to the {}",
        state.config.app_name
    )))
}

/// GET /health -- liveness and version.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: state.config.app_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount root-level routes (NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
