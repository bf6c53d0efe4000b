//! Admin route handlers.

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod content;
pub mod coupons;
pub mod events;
pub mod orders;
pub mod products;
pub mod settings;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// All admin API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/api/admin/products",
            get(products::list).post(products::create),
        )
        .route("/api/admin/products/import", post(products::import))
        .route(
            "/api/admin/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/api/admin/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/admin/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route(
            "/api/admin/coupons",
            get(coupons::list).post(coupons::create),
        )
        .route(
            "/api/admin/coupons/{id}",
            get(coupons::show)
                .put(coupons::update)
                .delete(coupons::remove),
        )
        .route("/api/admin/orders", get(orders::list))
        .route("/api/admin/orders/{id}", get(orders::show))
        .route("/api/admin/orders/{id}/status", post(orders::update_status))
        .route(
            "/api/admin/content",
            get(content::list).post(content::create),
        )
        .route(
            "/api/admin/content/{id}",
            get(content::show)
                .put(content::update)
                .delete(content::remove),
        )
        .route(
            "/api/admin/settings",
            get(settings::show).put(settings::update),
        )
        .route("/api/admin/analytics", get(analytics::show))
        .route("/api/admin/events", get(events::recent))
        .route("/api/admin/events/stream", get(events::stream))
}
