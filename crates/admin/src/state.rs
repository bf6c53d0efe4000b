//! Application state shared across admin handlers.

use std::sync::Arc;

use ridegear_store::backend::StoreBackend;
use ridegear_store::{
    CategoryStore, ContentStore, CouponStore, OrderStore, ProductStore, SettingsStore, UserStore,
};

use crate::config::AdminConfig;
use crate::services::events::EventFeed;

/// Application state shared across all admin handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    products: ProductStore,
    categories: CategoryStore,
    orders: OrderStore,
    coupons: CouponStore,
    users: UserStore,
    content: ContentStore,
    settings: SettingsStore,
    events: EventFeed,
}

impl AppState {
    /// Create application state over a backend.
    #[must_use]
    pub fn new(config: AdminConfig, backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductStore::new(Arc::clone(&backend)),
                categories: CategoryStore::new(Arc::clone(&backend)),
                orders: OrderStore::new(Arc::clone(&backend)),
                coupons: CouponStore::new(Arc::clone(&backend)),
                users: UserStore::new(Arc::clone(&backend)),
                content: ContentStore::new(Arc::clone(&backend)),
                settings: SettingsStore::new(backend),
                events: EventFeed::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryStore {
        &self.inner.categories
    }

    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    #[must_use]
    pub fn coupons(&self) -> &CouponStore {
        &self.inner.coupons
    }

    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// The dashboard's simulated event feed.
    #[must_use]
    pub fn events(&self) -> &EventFeed {
        &self.inner.events
    }
}
