use super::binding::Entity;
use super::index::{EntityIndex, INDEX_KIND, IndexState};
use crate::core::{Result, StoreError};
use crate::record::{DurableRecord, LockRegistry};
use crate::storage::DurableBackend;
use futures::future::join_all;
use std::marker::PhantomData;
use std::sync::Arc;

/// One page of listed entities plus the continuation token for the next
/// page. `next_cursor` is `None` iff the end of the listing was reached.
#[derive(Debug, Clone)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub next_cursor: Option<String>,
}

/// Page-size limits inherited from the store configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Typed handle over one entity kind: its records plus its listing index.
///
/// Obtained from [`Store::collection`](crate::Store::collection). Handles
/// are cheap to construct and hold no per-kind state of their own; all
/// state lives in the backend, so any number of handles for the same kind
/// observe the same records.
///
/// Creates and deletes keep the index consistent: the record write always
/// happens first, so the index never points at a key that was never
/// written. The two writes are not one atomic unit: a crash in between
/// leaves an unindexed record, which is invisible to listing but never a
/// lost value.
pub struct EntityCollection<E: Entity> {
    backend: Arc<dyn DurableBackend>,
    locks: Arc<LockRegistry>,
    limits: PageLimits,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityCollection<E> {
    pub(crate) fn new(
        backend: Arc<dyn DurableBackend>,
        locks: Arc<LockRegistry>,
        limits: PageLimits,
    ) -> Self {
        Self {
            backend,
            locks,
            limits,
            _marker: PhantomData,
        }
    }

    /// Insert a new entity, fail-closed: if the derived key is already
    /// occupied this returns [`StoreError::Conflict`] and the stored value
    /// is left untouched. The index is updated only after the record write
    /// succeeded.
    pub async fn create(&self, value: E) -> Result<E> {
        let key = value.storage_key();
        let stored = self.record(&key).create(value).await?;
        self.index().add_key(&key).await?;
        log::debug!("created {} '{}'", E::KIND, key);
        Ok(stored)
    }

    /// Fetch an entity by key.
    pub async fn get(&self, key: &str) -> Result<E> {
        self.record(key)
            .read_existing()
            .await?
            .ok_or_else(|| StoreError::not_found(E::KIND, key))
    }

    /// Whether an entity currently exists at the key.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.record(key).exists().await
    }

    /// Apply a transform to an existing entity under the key's lock. The
    /// index is untouched; existence does not change. Returns
    /// [`StoreError::NotFound`] if nothing exists at the key.
    pub async fn mutate<F>(&self, key: &str, f: F) -> Result<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        self.record(key)
            .mutate_existing(f)
            .await?
            .ok_or_else(|| StoreError::not_found(E::KIND, key))
    }

    /// Fallible variant of [`mutate`](Self::mutate): if the transform
    /// errors, nothing is persisted.
    pub async fn try_mutate<F>(&self, key: &str, f: F) -> Result<E>
    where
        F: FnOnce(&mut E) -> Result<()> + Send,
    {
        self.record(key)
            .try_mutate_existing(f)
            .await?
            .ok_or_else(|| StoreError::not_found(E::KIND, key))
    }

    /// Hard-delete an entity and drop its key from the index. Returns
    /// whether a record was actually deleted.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let removed = self.record(key).remove().await?;
        self.index().remove_key(key).await?;
        if removed {
            log::debug!("deleted {} '{}'", E::KIND, key);
        }
        Ok(removed)
    }

    /// Best-effort batch delete. Each key is attempted independently; a
    /// failure on one does not block the others. Index entries of deleted
    /// keys (and of keys that turned out to hold no record) are pruned in
    /// one batch. Returns the number of records actually deleted.
    pub async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        let records: Vec<_> = keys.iter().map(|k| self.record(k)).collect();
        let outcomes = join_all(records.iter().map(|r| r.remove())).await;

        let mut deleted = 0usize;
        let mut settled = Vec::with_capacity(keys.len());
        for (key, outcome) in keys.iter().zip(outcomes) {
            match outcome {
                Ok(was_present) => {
                    if was_present {
                        deleted += 1;
                    }
                    settled.push(key.clone());
                }
                Err(err) => {
                    // Leave the index entry in place so the record stays
                    // listable; the caller reconciles partial failure.
                    log::warn!("delete_many: failed to delete {} '{}': {}", E::KIND, key, err);
                }
            }
        }

        self.index().remove_keys(&settled).await?;
        Ok(deleted)
    }

    /// One page of entities in index order. Keys whose record has vanished
    /// (crash remnants, concurrent deletes racing the listing) are dropped
    /// from the page and pruned from the index rather than surfaced.
    pub async fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> Result<Page<E>> {
        let limit = self.clamp_limit(limit);
        let (keys, next_cursor) = self.index().page(cursor, limit).await?;

        let records: Vec<_> = keys.iter().map(|k| self.record(k)).collect();
        let loaded = join_all(records.iter().map(|r| r.read_existing())).await;

        let mut items = Vec::with_capacity(keys.len());
        let mut dangling = Vec::new();
        for (key, outcome) in keys.iter().zip(loaded) {
            match outcome? {
                Some(value) => items.push(value),
                None => dangling.push(key.clone()),
            }
        }

        if !dangling.is_empty() {
            log::warn!(
                "list: pruning {} dangling index {} from '{}'",
                dangling.len(),
                if dangling.len() == 1 { "key" } else { "keys" },
                E::KIND
            );
            self.index().remove_keys(&dangling).await?;
        }

        Ok(Page { items, next_cursor })
    }

    /// Apply the kind's fixture data if the index is currently empty.
    ///
    /// The emptiness check and the inserts are not one atomic unit; two
    /// cold-start callers can both observe an empty index. That is safe:
    /// the second caller's `create`s fail closed on the already-present
    /// keys and are ignored here, so the seed set is applied exactly once.
    pub async fn ensure_seed(&self) -> Result<()> {
        let (first, _) = self.index().page(None, 1).await?;
        if !first.is_empty() {
            return Ok(());
        }

        let seeds = E::seed_data();
        if seeds.is_empty() {
            return Ok(());
        }

        let total = seeds.len();
        let mut applied = 0usize;
        for value in seeds {
            match self.create(value).await {
                Ok(_) => applied += 1,
                Err(StoreError::Conflict { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        log::debug!("seeded {} with {}/{} fixture records", E::KIND, applied, total);
        Ok(())
    }

    /// Number of keys currently indexed for the kind.
    pub async fn count(&self) -> Result<usize> {
        self.index().len().await
    }

    fn record(&self, key: &str) -> DurableRecord<E> {
        DurableRecord::new(
            self.backend.clone(),
            self.locks.clone(),
            E::KIND,
            key.to_string(),
        )
    }

    fn index(&self) -> EntityIndex {
        let record: DurableRecord<IndexState> = DurableRecord::new(
            self.backend.clone(),
            self.locks.clone(),
            INDEX_KIND,
            E::KIND.to_string(),
        );
        EntityIndex::new(record)
    }

    fn clamp_limit(&self, limit: Option<usize>) -> usize {
        match limit {
            Some(0) | None => self.limits.default_limit,
            Some(n) => n.min(self.limits.max_limit),
        }
    }
}
