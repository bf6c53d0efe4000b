//! Storefront route handlers.

pub mod account;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod content;
pub mod orders;
pub mod products;
pub mod reviews;

use axum::Router;
use axum::routing::{get, patch, post};

use crate::state::AppState;

/// All storefront API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::list))
        .route("/api/products/{slug}", get(products::show))
        .route(
            "/api/products/{slug}/reviews",
            get(reviews::list).post(reviews::create),
        )
        .route("/api/categories", get(categories::list))
        .route("/api/categories/{slug}", get(categories::show))
        .route("/api/cart", get(cart::show).delete(cart::clear))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{item_id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route(
            "/api/cart/coupon",
            post(cart::apply_coupon).delete(cart::remove_coupon),
        )
        .route("/api/checkout", post(checkout::submit))
        .route("/api/orders/{id}", get(orders::show))
        .route("/api/account/orders", get(account::orders))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/content/{slug}", get(content::show))
}
