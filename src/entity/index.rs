use super::cursor::Cursor;
use crate::core::Result;
use crate::record::DurableRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Persisted state of one kind's listing index: the insertion-ordered keys
/// currently considered to exist for that kind.
#[derive(Serialize, Deserialize, Default, Clone)]
pub(crate) struct IndexState {
    pub keys: Vec<String>,
}

/// Reserved kind namespace for index records. Each entity kind's index is
/// the record at `__index:<kind>`, which cannot collide with any entity
/// record since entity kinds never start with underscores.
pub(crate) const INDEX_KIND: &str = "__index";

/// Listing index for one entity kind.
///
/// The index is itself a durable record, stored under a well-known key
/// derived from the kind name. Every mutation goes through that record's
/// `mutate`, which serializes all index updates for the kind through one
/// lock. This is the one place where per-record isolation is not enough,
/// since concurrent creates of *different* entities still contend on the
/// *same* index.
pub(crate) struct EntityIndex {
    record: DurableRecord<IndexState>,
}

impl EntityIndex {
    pub fn new(record: DurableRecord<IndexState>) -> Self {
        Self { record }
    }

    /// Append a key if absent. Adding a present key is a no-op.
    pub async fn add_key(&self, key: &str) -> Result<()> {
        self.record
            .mutate(|state| {
                if !state.keys.iter().any(|k| k == key) {
                    state.keys.push(key.to_string());
                }
            })
            .await?;
        Ok(())
    }

    /// Remove a key if present. Removing an absent key is a no-op.
    pub async fn remove_key(&self, key: &str) -> Result<()> {
        self.record
            .mutate(|state| state.keys.retain(|k| k != key))
            .await?;
        Ok(())
    }

    /// Remove a batch of keys in one read-modify-write. Returns how many of
    /// the requested keys were actually present.
    pub async fn remove_keys(&self, keys: &[String]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }

        let requested: HashSet<&str> = keys.iter().map(String::as_str).collect();
        let mut removed = 0usize;
        self.record
            .mutate(|state| {
                let before = state.keys.len();
                state.keys.retain(|k| !requested.contains(k.as_str()));
                removed = before - state.keys.len();
            })
            .await?;
        Ok(removed)
    }

    /// One page of keys starting at the cursor position. The returned
    /// cursor is `None` iff the end of the index was reached. A cursor
    /// pointing past a since-shrunken index yields an empty final page
    /// rather than an error.
    pub async fn page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<(Vec<String>, Option<String>)> {
        let offset = match cursor {
            Some(token) => Cursor::decode(token)?.offset,
            None => 0,
        };

        let state = self.record.get().await?;
        if offset >= state.keys.len() {
            return Ok((Vec::new(), None));
        }

        let end = (offset + limit.max(1)).min(state.keys.len());
        let items = state.keys[offset..end].to_vec();
        let next_cursor = if end < state.keys.len() {
            Some(Cursor { offset: end }.encode()?)
        } else {
            None
        };

        Ok((items, next_cursor))
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.record.get().await?.keys.len())
    }
}
