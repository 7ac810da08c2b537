//! Persistence layer: the JSON document store and the material repository.

pub mod repositories;
pub mod store;

pub use store::{JsonStore, StoreError};

/// Open the store at `path`, creating an empty document on first run.
pub async fn open_store(path: impl Into<std::path::PathBuf>) -> Result<JsonStore, StoreError> {
    let store = JsonStore::new(path);
    store.ensure_exists().await?;
    Ok(store)
}
