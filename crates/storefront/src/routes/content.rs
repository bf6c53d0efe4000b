//! Content block route handler.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::response::success;
use crate::state::AppState;

/// Fetch a published content block with the markdown body rendered to HTML.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let block = state
        .content()
        .get_by_slug(&slug)
        .await?
        .filter(|b| b.published)
        .ok_or_else(|| AppError::NotFound(format!("content: {slug}")))?;

    let html = comrak::markdown_to_html(&block.body, &comrak::Options::default());
    Ok(success(json!({
        "slug": block.slug,
        "title": block.title,
        "html": html,
        "updated_at": block.updated_at,
    })))
}
