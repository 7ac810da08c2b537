use crate::types::MaterialId;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: MaterialId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}
