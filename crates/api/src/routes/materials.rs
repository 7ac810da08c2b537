//! Route definitions for materials, mounted at `/materials`.

use axum::routing::get;
use axum::Router;

use crate::handlers::materials;
use crate::state::AppState;

/// ```text
/// GET    /        -> list_materials
/// POST   /        -> create_material
/// GET    /{id}    -> get_material
/// PUT    /{id}    -> update_material
/// DELETE /{id}    -> delete_material
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(materials::list_materials).post(materials::create_material),
        )
        .route(
            "/{id}",
            get(materials::get_material)
                .put(materials::update_material)
                .delete(materials::delete_material),
        )
}
