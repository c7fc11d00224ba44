// ============================================================================
// EntityDB Library
// ============================================================================

//! Durable entity storage with per-key serialized access.
//!
//! Every logical entity is one independently addressable durable record; a
//! per-kind listing index makes `list`/pagination, idempotent seeding, and
//! batch deletion possible without scanning keys. Records of the same key
//! never see interleaved operations; records of different keys run
//! concurrently and only share the index as a serialization point.
//!
//! ```no_run
//! use entitydb::{Store, model::BlogPost};
//!
//! #[tokio::main]
//! async fn main() -> entitydb::Result<()> {
//!     let store = Store::in_memory();
//!     let posts = store.collection::<BlogPost>();
//!
//!     posts.create(BlogPost::draft("hello-world", "Hello")).await?;
//!
//!     let page = posts.list(None, Some(10)).await?;
//!     assert_eq!(page.items.len(), 1);
//!     assert!(page.next_cursor.is_none());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod entity;
pub mod facade;
pub mod mail;
pub mod model;
pub mod record;
pub mod storage;

// Re-export main types for convenience
pub use self::core::{Result, StoreError};
pub use self::entity::{Entity, EntityCollection, Page};
pub use self::facade::{Store, StoreConfig};
pub use self::record::DurableRecord;
pub use self::storage::{DurableBackend, FileBackend, MemoryBackend};
