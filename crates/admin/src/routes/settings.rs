//! Admin settings route handlers.

use axum::extract::State;
use axum::{Json, response::IntoResponse};
use tracing::instrument;

use ridegear_store::entities::StoreSettings;

use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::state::AppState;

/// Current storewide settings (defaults if never written).
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(success(state.settings().get().await?))
}

/// Replace the settings document.
#[instrument(skip(_admin, state, settings))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(settings): Json<StoreSettings>,
) -> Result<impl IntoResponse> {
    state.settings().put(&settings).await?;
    Ok(success(settings))
}
