//! Model loading backends.
//!
//! A [`ModelLoader`] turns a resolved asset path into a [`Prefab`]. Loaders
//! run on the asset runtime, never on the frame thread, and must not touch
//! the scene or the asset server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::prefab::{Prefab, SharedPrefab};
use crate::errors::{Result, ViewerError};

pub trait ModelLoader: Send + Sync + 'static {
    /// Asynchronously loads the model stored at `path`.
    fn load(&self, path: PathBuf) -> BoxFuture<'static, Result<SharedPrefab>>;
}

/// Reads JSON-encoded prefabs from the local file system.
#[derive(Debug, Default, Clone)]
pub struct JsonModelLoader;

impl JsonModelLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decodes and validates a prefab from raw bytes.
    pub fn decode(path: &Path, bytes: &[u8]) -> Result<Prefab> {
        let prefab: Prefab = serde_json::from_slice(bytes)?;
        prefab.validate(path)?;
        Ok(prefab)
    }
}

impl ModelLoader for JsonModelLoader {
    fn load(&self, path: PathBuf) -> BoxFuture<'static, Result<SharedPrefab>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ViewerError::AssetNotFound(path.display().to_string())
                } else {
                    ViewerError::IoError(e)
                }
            })?;
            Ok(Arc::new(Self::decode(&path, &bytes)?))
        })
    }
}

/// Serves prefabs registered in memory, keyed by path.
#[derive(Default, Clone)]
pub struct MemoryModelLoader {
    models: Arc<RwLock<FxHashMap<PathBuf, SharedPrefab>>>,
}

impl MemoryModelLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, prefab: Prefab) {
        self.models.write().insert(path.into(), Arc::new(prefab));
    }

    #[must_use]
    pub fn with(self, path: impl Into<PathBuf>, prefab: Prefab) -> Self {
        self.insert(path, prefab);
        self
    }
}

impl ModelLoader for MemoryModelLoader {
    fn load(&self, path: PathBuf) -> BoxFuture<'static, Result<SharedPrefab>> {
        let found = self.models.read().get(&path).cloned();
        Box::pin(async move {
            found.ok_or_else(|| ViewerError::AssetNotFound(path.display().to_string()))
        })
    }
}
