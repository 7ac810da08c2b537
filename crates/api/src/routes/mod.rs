pub mod health;
pub mod materials;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /materials            list, create
/// /materials/{id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/materials", materials::router())
}
