use crate::core::Result;
use async_trait::async_trait;

/// Storage backend trait - allows pluggable durable substrates
///
/// A backend is a flat byte-level key/value store. It knows nothing about
/// entities, indexes, or serialization formats; those live above it. The
/// per-key serialization guarantee is also enforced above this trait, so
/// implementations only need individual operations to be internally
/// consistent.
#[async_trait]
pub trait DurableBackend: Send + Sync {
    /// Load the stored bytes for a key, or `None` if the key was never
    /// written (or has been removed).
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store bytes under a key, overwriting any previous value.
    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Remove a key entirely. Returns whether the key was present.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Check whether a key currently holds a stored value.
    async fn contains(&self, key: &str) -> Result<bool>;

    /// List all stored keys. Intended for diagnostics and recovery, not for
    /// serving queries; listing goes through the entity index instead.
    async fn keys(&self) -> Result<Vec<String>>;
}
