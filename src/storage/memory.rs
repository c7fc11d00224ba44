use super::DurableBackend;
use crate::core::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory backend. Used by tests and by deployments that accept losing
/// state on restart (preview environments, local development).
pub struct MemoryBackend {
    cells: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableBackend for MemoryBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cells = self.cells.read().await;
        Ok(cells.get(key).cloned())
    }

    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut cells = self.cells.write().await;
        cells.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut cells = self.cells.write().await;
        Ok(cells.remove(key).is_some())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let cells = self.cells.read().await;
        Ok(cells.contains_key(key))
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let cells = self.cells.read().await;
        Ok(cells.keys().cloned().collect())
    }
}
