//! JSON-file backend.
//!
//! One JSON file per object store under a data directory, the whole
//! directory standing in for the original's browser-local database. Each
//! store is kept in memory and flushed on mutation; writes go through a
//! temp file and an atomic rename so a crash never leaves a half-written
//! store on disk. Last write wins.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Document, StoreBackend};
use crate::StoreError;

/// Document storage persisted as one JSON file per object store.
pub struct FileBackend {
    dir: PathBuf,
    stores: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl FileBackend {
    /// Open (or create) a data directory and load every existing store file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created or read,
    /// or `StoreError::Serialization` if a store file holds invalid JSON.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let mut stores = HashMap::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = tokio::fs::read(&path).await?;
            let docs: BTreeMap<String, Document> = serde_json::from_slice(&bytes)?;
            debug!(store = name, count = docs.len(), "loaded store file");
            stores.insert(name.to_string(), docs);
        }

        Ok(Self {
            dir,
            stores: RwLock::new(stores),
        })
    }

    fn store_path(&self, store: &str) -> PathBuf {
        self.dir.join(format!("{store}.json"))
    }

    /// Write a store's documents to disk via temp file + rename.
    async fn flush(&self, store: &str, docs: &BTreeMap<String, Document>) -> Result<(), StoreError> {
        let path = self.store_path(store);
        let tmp = self.dir.join(format!(".{store}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(docs)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// The data directory this backend persists into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl StoreBackend for FileBackend {
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
        let docs = stores.entry(store.to_string()).or_default();
        docs.insert(id.to_string(), doc);
        self.flush(store, docs).await
    }

    async fn remove(&self, store: &str, id: &str) -> Result<bool, StoreError> {
        let mut stores = self.stores.write().await;
        let Some(docs) = stores.get_mut(store) else {
            return Ok(false);
        };
        if docs.remove(id).is_none() {
            return Ok(false);
        }
        self.flush(store, docs).await?;
        Ok(true)
    }
}
