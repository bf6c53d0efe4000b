//! In-memory backend.
//!
//! The parallel implementation demonstrating that the adapter interface is
//! backing-store agnostic. Also what the tests and the mock API mode run on:
//! process-lifetime only, reset on restart.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, StoreBackend};
use crate::StoreError;

/// Process-memory document storage.
#[derive(Default)]
pub struct MemoryBackend {
    stores: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn load(&self, store: &str) -> Result<Vec<Document>, StoreError> {
        let stores = self.stores.read().await;
        Ok(stores
            .get(store)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, store: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let stores = self.stores.read().await;
        Ok(stores.get(store).and_then(|docs| docs.get(id)).cloned())
    }

    async fn put(&self, store: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut stores = self.stores.write().await;
        stores
            .entry(store.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    async fn remove(&self, store: &str, id: &str) -> Result<bool, StoreError> {
        let mut stores = self.stores.write().await;
        Ok(stores
            .get_mut(store)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }
}
