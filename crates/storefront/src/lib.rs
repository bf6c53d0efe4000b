//! RideGear Storefront - public e-commerce API.
//!
//! Everything the customer-facing pages consume: catalog browsing, product
//! detail, the session cart, checkout, order confirmation, account order
//! history, reviews, and CMS content blocks. Responses use the
//! `{success, data|error}` envelope across the board.
//!
//! The binary in `main.rs` wires configuration, tracing, and the backend;
//! the library exposes [`app`] so the integration tests can drive the exact
//! production router in-process.

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

pub use config::StorefrontConfig;
pub use state::AppState;

/// Build the storefront application router.
///
/// The session layer is applied here so tests get identical cookie
/// behavior; sentry layers are added by the binary only.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::session::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the backing store responds before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.settings().get().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
