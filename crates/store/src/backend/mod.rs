//! Swappable storage backends.
//!
//! The backend trait speaks raw JSON documents keyed by object store name
//! and document id - the same shape the original's browser-local store had.
//! Typed adapters in [`crate::adapters`] sit on top and own uniqueness
//! checks, filtering, and (de)serialization.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;

use crate::StoreError;

/// A raw stored document.
pub type Document = serde_json::Value;

/// Key-value document storage, one namespace per object store.
///
/// Implementations guarantee last-write-wins per document and nothing
/// stronger; there are no cross-store transactions.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Load every document in an object store, in stable id order.
    async fn load(&self, store: &str) -> Result<Vec<Document>, StoreError>;

    /// Fetch a single document by id. Absence is `Ok(None)`, never an error.
    async fn get(&self, store: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert or replace a document.
    async fn put(&self, store: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Delete a document. Returns whether anything was deleted.
    async fn remove(&self, store: &str, id: &str) -> Result<bool, StoreError>;
}
