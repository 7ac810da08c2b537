//! Repository for material records.
//!
//! Every operation is one load, mutate, save unit against the [`JsonStore`].
//! Mutations hold the store lock for the whole cycle.

use matstock_core::error::CoreError;
use matstock_core::material::{Material, MaterialInput, MaterialPatch};
use matstock_core::types::{today, MaterialId};
use matstock_core::validation::{validate_for_create, validate_for_update, ValidationErrors};

use crate::store::{JsonStore, StoreError};

/// Entity name used in not-found errors.
const ENTITY: &str = "Material";

/// Errors from repository operations: expected domain outcomes or storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for RepoError {
    fn from(errors: ValidationErrors) -> Self {
        RepoError::Core(CoreError::Validation(errors))
    }
}

fn not_found(id: MaterialId) -> RepoError {
    RepoError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Provides CRUD operations for materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Validate a create payload, assign the next id, and persist.
    pub async fn create(store: &JsonStore, input: MaterialInput) -> Result<Material, RepoError> {
        let record = validate_for_create(input, today())?;

        let _guard = store.lock().await;
        let mut materials = store.load_all().await?;
        ensure_unique_sku(&materials, record.sku.as_deref(), None)?;

        let material = record.with_id(JsonStore::next_id(&materials)?);
        materials.push(material.clone());
        store.save_all(&materials).await?;

        tracing::info!(material_id = material.id, name = %material.name, "Material created");
        Ok(material)
    }

    /// All materials in stored order.
    pub async fn list_all(store: &JsonStore) -> Result<Vec<Material>, RepoError> {
        Ok(store.load_all().await?)
    }

    /// Find a material by its id.
    pub async fn find_by_id(
        store: &JsonStore,
        id: MaterialId,
    ) -> Result<Option<Material>, RepoError> {
        let materials = store.load_all().await?;
        Ok(materials.into_iter().find(|m| m.id == id))
    }

    /// Like [`MaterialRepo::find_by_id`] but a miss is a `NotFound` error.
    pub async fn get(store: &JsonStore, id: MaterialId) -> Result<Material, RepoError> {
        Self::find_by_id(store, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Apply a partial update and persist the merged record in place.
    pub async fn update(
        store: &JsonStore,
        id: MaterialId,
        patch: MaterialPatch,
    ) -> Result<Material, RepoError> {
        let _guard = store.lock().await;
        let mut materials = store.load_all().await?;
        let index = materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;

        let updated = validate_for_update(&materials[index], patch, today())?;
        ensure_unique_sku(&materials, updated.sku.as_deref(), Some(id))?;

        materials[index] = updated.clone();
        store.save_all(&materials).await?;

        tracing::info!(material_id = id, "Material updated");
        Ok(updated)
    }

    /// Remove a material permanently.
    pub async fn delete(store: &JsonStore, id: MaterialId) -> Result<(), RepoError> {
        let _guard = store.lock().await;
        let mut materials = store.load_all().await?;
        let index = materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;

        materials.remove(index);
        store.save_all(&materials).await?;

        tracing::info!(material_id = id, "Material deleted");
        Ok(())
    }
}

/// Reject a SKU already used by another material. `exclude` is the record being updated.
fn ensure_unique_sku(
    materials: &[Material],
    sku: Option<&str>,
    exclude: Option<MaterialId>,
) -> Result<(), ValidationErrors> {
    let Some(sku) = sku else {
        return Ok(());
    };

    match materials
        .iter()
        .find(|m| Some(m.id) != exclude && m.sku.as_deref() == Some(sku))
    {
        Some(owner) => Err(ValidationErrors::single(
            "sku",
            format!("'{sku}' is already used by material {}", owner.id),
        )),
        None => Ok(()),
    }
}
