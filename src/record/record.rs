use super::LockRegistry;
use crate::core::{Result, StoreError};
use crate::storage::DurableBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// A single durable JSON-serializable value addressed by a string key.
///
/// The handle is cheap to construct and clone; the value itself lives in
/// the backend. All read-modify-write operations run under the key's mutex
/// from the [`LockRegistry`], so no two operations on the same key ever
/// interleave, while operations on different keys proceed concurrently.
///
/// Presence is physical: a record exists iff the backend holds bytes for
/// its key. Reading an absent record materializes the type's default value
/// without persisting anything, so a record that was never written still
/// reports `exists() == false`. Even if someone later saves a value that
/// happens to equal the default, that save marks it existing.
pub struct DurableRecord<T> {
    backend: Arc<dyn DurableBackend>,
    locks: Arc<LockRegistry>,
    kind: &'static str,
    key: String,
    /// Backend address: `<kind>:<key>`. Kinds namespace the flat backend
    /// keyspace so equal logical keys of different kinds never collide.
    storage_key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DurableRecord<T> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            locks: self.locks.clone(),
            kind: self.kind,
            key: self.key.clone(),
            storage_key: self.storage_key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> DurableRecord<T>
where
    T: Serialize + DeserializeOwned + Default + Send,
{
    pub(crate) fn new(
        backend: Arc<dyn DurableBackend>,
        locks: Arc<LockRegistry>,
        kind: &'static str,
        key: String,
    ) -> Self {
        let storage_key = format!("{}:{}", kind, key);
        Self {
            backend,
            locks,
            kind,
            key,
            storage_key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Current value, or the type's default if nothing was ever stored.
    pub async fn get(&self) -> Result<T> {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        Ok(self.load().await?.unwrap_or_default())
    }

    /// Whether the record holds a stored value. A saved default still
    /// counts; only never-written (or removed) records report false.
    pub async fn exists(&self) -> Result<bool> {
        self.backend.contains(&self.storage_key).await
    }

    /// Unconditional overwrite. Marks the record as existing.
    pub async fn save(&self, value: T) -> Result<T> {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        self.persist(&value).await?;
        Ok(value)
    }

    /// Fail-closed insert: stores the value only if the key is currently
    /// unoccupied, otherwise returns [`StoreError::Conflict`]. The check
    /// and the write happen under the key lock as one unit.
    pub async fn create(&self, value: T) -> Result<T> {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        if self.backend.contains(&self.storage_key).await? {
            return Err(StoreError::conflict(self.kind, &self.key));
        }
        self.persist(&value).await?;
        Ok(value)
    }

    /// Read-transform-persist as one serialized unit. Absent records start
    /// from the default value.
    pub async fn mutate<F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) + Send,
    {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        let mut value = self.load().await?.unwrap_or_default();
        f(&mut value);
        self.persist(&value).await?;
        Ok(value)
    }

    /// Like [`mutate`](Self::mutate), but the transform may fail. On error
    /// nothing is persisted and the stored value is left exactly as it was.
    pub async fn try_mutate<F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()> + Send,
    {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        let mut value = self.load().await?.unwrap_or_default();
        f(&mut value)?;
        self.persist(&value).await?;
        Ok(value)
    }

    /// Hard delete: the key is fully forgotten. A later `create` on the
    /// same key starts clean. Returns whether a value was present.
    pub async fn remove(&self) -> Result<bool> {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        self.backend.remove(&self.storage_key).await
    }

    /// Stored value if present, without materializing a default.
    pub(crate) async fn read_existing(&self) -> Result<Option<T>> {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        self.load().await
    }

    /// Mutate only if the record exists; `None` means it does not.
    pub(crate) async fn mutate_existing<F>(&self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut T) + Send,
    {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        match self.load().await? {
            None => Ok(None),
            Some(mut value) => {
                f(&mut value);
                self.persist(&value).await?;
                Ok(Some(value))
            }
        }
    }

    /// Fallible variant of [`mutate_existing`](Self::mutate_existing).
    pub(crate) async fn try_mutate_existing<F>(&self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut T) -> Result<()> + Send,
    {
        let lock = self.locks.acquire(&self.storage_key).await;
        let _guard = lock.lock().await;
        match self.load().await? {
            None => Ok(None),
            Some(mut value) => {
                f(&mut value)?;
                self.persist(&value).await?;
                Ok(Some(value))
            }
        }
    }

    async fn load(&self) -> Result<Option<T>> {
        match self.backend.load(&self.storage_key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.store(&self.storage_key, bytes).await
    }
}
