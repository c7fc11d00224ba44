use super::config::StoreConfig;
use crate::core::Result;
use crate::entity::store::PageLimits;
use crate::entity::{Entity, EntityCollection};
use crate::record::{DurableRecord, LockRegistry};
use crate::storage::{DurableBackend, FileBackend, MemoryBackend};
use lazy_static::lazy_static;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

// Global singleton instance of the store. Every route handler in the
// consuming application talks to the same records through it.
lazy_static! {
    static ref GLOBAL_STORE: Store = Store::in_memory();
}

/// Entry point to the storage layer.
///
/// A `Store` owns the byte backend and the per-key lock registry; typed
/// access goes through [`collection`](Self::collection) for indexed entity
/// kinds or [`record`](Self::record) for standalone records. Cloning is
/// cheap and clones share all state.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DurableBackend>,
    locks: Arc<LockRegistry>,
    config: StoreConfig,
}

impl Store {
    /// Get the global store instance shared across the process.
    pub fn global() -> &'static Store {
        &GLOBAL_STORE
    }

    /// In-memory store with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitydb::Store;
    ///
    /// let store = Store::in_memory();
    /// ```
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()), StoreConfig::new())
    }

    /// Open a store from configuration: file-backed when a data directory
    /// is configured, in-memory otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use entitydb::{Store, StoreConfig};
    ///
    /// # fn main() -> entitydb::Result<()> {
    /// let store = Store::open(StoreConfig::new().data_dir("/var/lib/site/data"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(config: StoreConfig) -> Result<Self> {
        let backend: Arc<dyn DurableBackend> = match &config.data_dir {
            Some(dir) => Arc::new(FileBackend::new(dir)?),
            None => Arc::new(MemoryBackend::new()),
        };
        Ok(Self::with_backend(backend, config))
    }

    /// Wrap an externally constructed backend.
    pub fn with_backend(backend: Arc<dyn DurableBackend>, config: StoreConfig) -> Self {
        Self {
            backend,
            locks: Arc::new(LockRegistry::new()),
            config,
        }
    }

    /// Typed handle over an entity kind: records plus listing index.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitydb::{Store, model::BlogPost};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> entitydb::Result<()> {
    /// let store = Store::in_memory();
    /// let posts = store.collection::<BlogPost>();
    ///
    /// posts.create(BlogPost::draft("hello-world", "Hello")).await?;
    /// assert_eq!(posts.get("hello-world").await?.title, "Hello");
    /// # Ok(())
    /// # }
    /// ```
    pub fn collection<E: Entity>(&self) -> EntityCollection<E> {
        EntityCollection::new(
            self.backend.clone(),
            self.locks.clone(),
            PageLimits {
                default_limit: self.config.default_page_limit,
                max_limit: self.config.max_page_limit,
            },
        )
    }

    /// Raw durable record, outside any kind's index. Useful for one-off
    /// singleton state that needs serialized access but no listing.
    pub fn record<T>(&self, kind: &'static str, key: &str) -> DurableRecord<T>
    where
        T: Serialize + DeserializeOwned + Default + Send,
    {
        DurableRecord::new(
            self.backend.clone(),
            self.locks.clone(),
            kind,
            key.to_string(),
        )
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
