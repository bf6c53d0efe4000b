//! Settings store adapter.
//!
//! Settings are a singleton document under a fixed key. Reading when
//! nothing has been written yet yields the defaults.

use std::sync::Arc;

use super::{decode, encode};
use crate::backend::StoreBackend;
use crate::entities::StoreSettings;
use crate::{stores, StoreError};

const SETTINGS_KEY: &str = "store";

/// Adapter for the `settings` object store.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn StoreBackend>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Current settings, or the defaults when never written.
    ///
    /// # Errors
    ///
    /// Backend or corruption errors only.
    pub async fn get(&self) -> Result<StoreSettings, StoreError> {
        match self.backend.get(stores::SETTINGS, SETTINGS_KEY).await? {
            Some(doc) => decode(doc),
            None => Ok(StoreSettings::default()),
        }
    }

    /// Replace the settings document.
    ///
    /// # Errors
    ///
    /// Backend or serialization errors only.
    pub async fn put(&self, settings: &StoreSettings) -> Result<(), StoreError> {
        self.backend
            .put(stores::SETTINGS, SETTINGS_KEY, encode(settings)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn unwritten_settings_are_defaults() {
        let store = SettingsStore::new(Arc::new(MemoryBackend::new()));
        let settings = store.get().await.expect("get");
        assert_eq!(settings.store_name, "RideGear");
        assert_eq!(settings.currency_code, "USD");
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = SettingsStore::new(Arc::new(MemoryBackend::new()));
        let mut settings = store.get().await.expect("get");
        settings.store_name = "RideGear Outlet".into();
        store.put(&settings).await.expect("put");

        let read_back = store.get().await.expect("get");
        assert_eq!(read_back.store_name, "RideGear Outlet");
    }
}
