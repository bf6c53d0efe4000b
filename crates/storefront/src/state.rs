//! Application state shared across handlers.

use std::sync::Arc;

use ridegear_store::backend::StoreBackend;
use ridegear_store::{
    CategoryStore, ContentStore, CouponStore, OrderStore, ProductStore, ReviewStore,
    SettingsStore, UserStore,
};

use crate::config::StorefrontConfig;
use crate::services::cart_cache::CartCache;
use crate::services::catalog_cache::CatalogCache;
use crate::services::payment::{PaymentGateway, SimulatedGateway};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration, the
/// entity adapters, the live-cart cache, and the payment gateway.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: ProductStore,
    categories: CategoryStore,
    orders: OrderStore,
    coupons: CouponStore,
    users: UserStore,
    reviews: ReviewStore,
    content: ContentStore,
    settings: SettingsStore,
    carts: CartCache,
    catalog_cache: CatalogCache,
    payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    /// Create application state over a backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, backend: Arc<dyn StoreBackend>) -> Self {
        Self::with_gateway(config, backend, Arc::new(SimulatedGateway::default()))
    }

    /// Create application state with an explicit payment gateway.
    ///
    /// Tests use this to pin the decline simulation.
    #[must_use]
    pub fn with_gateway(
        config: StorefrontConfig,
        backend: Arc<dyn StoreBackend>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductStore::new(Arc::clone(&backend)),
                categories: CategoryStore::new(Arc::clone(&backend)),
                orders: OrderStore::new(Arc::clone(&backend)),
                coupons: CouponStore::new(Arc::clone(&backend)),
                users: UserStore::new(Arc::clone(&backend)),
                reviews: ReviewStore::new(Arc::clone(&backend)),
                content: ContentStore::new(Arc::clone(&backend)),
                settings: SettingsStore::new(backend),
                carts: CartCache::new(),
                catalog_cache: CatalogCache::new(),
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
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
    pub fn reviews(&self) -> &ReviewStore {
        &self.inner.reviews
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// Live carts, keyed by cart id.
    #[must_use]
    pub fn carts(&self) -> &CartCache {
        &self.inner.carts
    }

    /// Short-TTL cache for catalog list responses.
    #[must_use]
    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.inner.catalog_cache
    }

    #[must_use]
    pub fn payments(&self) -> &dyn PaymentGateway {
        self.inner.payments.as_ref()
    }
}
