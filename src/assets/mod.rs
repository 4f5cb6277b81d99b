//! Asset catalog, loading and storage.
//!
//! - [`AssetCatalog`]: the selectable models and their file locations
//! - [`ModelLoader`]: async backends producing [`Prefab`]s
//! - [`AssetServer`]: shared storages for geometries, materials and textures

pub mod catalog;
pub mod loader;
pub mod prefab;
pub mod server;
pub mod storage;

pub use catalog::{AssetCatalog, DEFAULT_ASSETS};
pub use loader::{JsonModelLoader, MemoryModelLoader, ModelLoader};
pub use prefab::{Prefab, PrefabMaterial, PrefabMesh, PrefabNode, SharedPrefab};
pub use server::{AssetServer, GeometryHandle, MaterialHandle, ReleaseReport, TextureHandle};
pub use storage::AssetStorage;

use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Shared runtime that drives model loads off the frame thread.
pub(crate) fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}
