//! RideGear Admin - internal administration API.
//!
//! The dashboard's backend: product, category, and coupon management,
//! bulk CSV product import, order status handling, storewide settings,
//! analytics, and the simulated real-time event feed. Runs on its own port
//! next to the storefront binary, sharing the same data directory.
//!
//! Every `/api/admin/*` route requires an admin session; admins are minted
//! with `rg-cli admin create`, never through this surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AdminConfig;
pub use state::AppState;

/// Build the admin application router.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::session::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.settings().get().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
