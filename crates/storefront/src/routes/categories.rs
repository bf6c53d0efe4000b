//! Category route handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::response::success;
use crate::state::AppState;

/// List all categories.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.categories().list().await?;
    Ok(success(categories))
}

/// Category detail by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let category = state
        .categories()
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category: {slug}")))?;
    Ok(success(category))
}
