use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Per-key lock registry
///
/// Every record key owns one mutex, created on demand and shared by all
/// handles addressing that key. Holding the mutex for the whole
/// read-modify-write of a record operation is what gives the store its
/// serialized-access-per-key guarantee; operations on different keys never
/// contend with each other here.
pub struct LockRegistry {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Get the mutex for a key, registering it first if this is the key's
    /// first access. The returned `Arc` must be locked by the caller for
    /// the duration of the record operation.
    pub async fn acquire(&self, key: &str) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(key) {
                return lock.clone();
            }
        }

        let mut locks = self.locks.write().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
