//! Flat-file store holding the whole material collection as one JSON array.
//!
//! Every write rewrites the full document through a sibling temporary file
//! that is synced and then renamed over the target, so readers only ever see
//! a complete old or a complete new document.

use std::path::{Path, PathBuf};

use matstock_core::material::Material;
use matstock_core::types::MaterialId;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};

/// Fallback document name when the configured path has no file component.
const DEFAULT_FILE_NAME: &str = "inventory.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize materials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Material id space exhausted after id {last}")]
    IdExhausted { last: MaterialId },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The single JSON document that backs the service.
///
/// The store owns its file path and a process-wide write lock. Callers that
/// mutate the collection hold [`JsonStore::lock`] across load, mutate and
/// save so concurrent requests cannot interleave their writes.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the write lock for one load-mutate-save cycle.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Write an empty collection if the document does not exist yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;
        if !exists {
            let _guard = self.lock().await;
            self.save_all(&[]).await?;
            tracing::info!(path = %self.path.display(), "Created empty inventory document");
        }
        Ok(())
    }

    /// Read the full collection in stored order.
    ///
    /// A missing or whitespace-only document is an empty collection.
    pub async fn load_all(&self) -> Result<Vec<Material>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Inventory document absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let materials: Vec<Material> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = materials.len(), "Loaded materials");
        Ok(materials)
    }

    /// Replace the document with `materials`.
    pub async fn save_all(&self, materials: &[Material]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(materials).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.temp_path();
        if let Err(e) = write_synced(&tmp, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(&self.path, e));
        }
        self.sync_parent().await?;

        tracing::debug!(path = %self.path.display(), count = materials.len(), "Saved materials");
        Ok(())
    }

    /// Next id for a new record: highest existing id plus one, or 1.
    pub fn next_id(materials: &[Material]) -> Result<MaterialId, StoreError> {
        match materials.iter().map(|m| m.id).max() {
            None => Ok(1),
            Some(last) => last.checked_add(1).ok_or(StoreError::IdExhausted { last }),
        }
    }

    /// Flush the directory entry so the rename survives a crash.
    #[cfg(unix)]
    async fn sync_parent(&self) -> Result<(), StoreError> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent,
            None => Path::new("."),
        };
        let dir = fs::File::open(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
        dir.sync_all().await.map_err(|e| StoreError::io(parent, e))
    }

    // Directory handles cannot be synced on this platform.
    #[cfg(not(unix))]
    async fn sync_parent(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_FILE_NAME);
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
