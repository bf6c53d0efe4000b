//! Short-TTL cache for catalog list responses.
//!
//! Keyed by the normalized query parameters. Invalidation is by TTL only;
//! admin edits become visible within a minute, which is the same staleness
//! the original accepted from its client-side caches.

use std::time::Duration;

use moka::future::Cache;

use ridegear_store::Page;
use ridegear_store::entities::Product;

const CATALOG_TTL: Duration = Duration::from_secs(60);
const MAX_CACHED_PAGES: u64 = 1_000;

/// Cache of product list pages keyed by the query string.
#[derive(Clone)]
pub struct CatalogCache {
    pages: Cache<String, Page<Product>>,
}

impl CatalogCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Cache::builder()
                .max_capacity(MAX_CACHED_PAGES)
                .time_to_live(CATALOG_TTL)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Page<Product>> {
        self.pages.get(key).await
    }

    pub async fn put(&self, key: String, page: Page<Product>) {
        self.pages.insert(key, page).await;
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
