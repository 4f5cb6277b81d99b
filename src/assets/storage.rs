use parking_lot::{RwLock, RwLockReadGuard};
use slotmap::{Key, SlotMap};
use std::sync::Arc;

/// Slot map behind the storage lock. Exposed for batched reads through
/// [`AssetStorage::read_lock`].
pub struct StorageInner<H: Key, T> {
    pub map: SlotMap<H, Arc<T>>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
        }
    }
}

/// Lock-protected slot map of shared resources, keyed by typed handles.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// [Write] Adds a resource and returns its handle.
    pub fn add(&self, asset: impl Into<T>) -> H {
        let mut guard = self.inner.write();
        guard.map.insert(Arc::new(asset.into()))
    }

    /// [Write] Releases a resource. Returns it if the handle was still live.
    ///
    /// Outstanding `Arc`s keep the data alive, but the handle is dead from
    /// here on and will never resolve again.
    pub fn remove(&self, handle: H) -> Option<Arc<T>> {
        let mut guard = self.inner.write();
        guard.map.remove(handle)
    }

    /// [Read] Gets a single resource.
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        let guard = self.inner.read();
        guard.map.get(handle).cloned()
    }

    pub fn contains(&self, handle: H) -> bool {
        self.inner.read().map.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// [Read] Holds the lock for a batch of lookups, e.g. one per frame.
    pub fn read_lock(&self) -> RwLockReadGuard<'_, StorageInner<H, T>> {
        self.inner.read()
    }
}
