//! Live cart storage.
//!
//! Carts belong to the client session: the session cookie carries the cart
//! id and the cart itself lives here, in a TTL cache. Mutations write the
//! whole cart back (last write wins). An evicted or unknown id simply
//! yields a fresh cart upstream, matching how the original behaved after
//! local storage was cleared.

use std::time::Duration;

use moka::future::Cache;

use ridegear_core::CartId;
use ridegear_core::cart::Cart;

/// Idle carts are dropped after a day.
const CART_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on concurrently live carts.
const MAX_CARTS: u64 = 100_000;

/// TTL cache of live carts keyed by cart id.
#[derive(Clone)]
pub struct CartCache {
    carts: Cache<CartId, Cart>,
}

impl CartCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            carts: Cache::builder()
                .max_capacity(MAX_CARTS)
                .time_to_idle(CART_TTL)
                .build(),
        }
    }

    /// Fetch a cart by id.
    pub async fn get(&self, id: CartId) -> Option<Cart> {
        self.carts.get(&id).await
    }

    /// Store (or replace) a cart under its id.
    pub async fn put(&self, cart: Cart) {
        self.carts.insert(cart.id, cart).await;
    }

    /// Drop a cart, e.g. after checkout clears it.
    pub async fn remove(&self, id: CartId) {
        self.carts.invalidate(&id).await;
    }
}

impl Default for CartCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_remove_round_trip() {
        let cache = CartCache::new();
        let cart = Cart::new(CartId::generate());
        let id = cart.id;

        cache.put(cart).await;
        assert!(cache.get(id).await.is_some());

        cache.remove(id).await;
        assert!(cache.get(id).await.is_none());
    }
}
