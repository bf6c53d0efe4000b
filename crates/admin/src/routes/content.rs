//! Admin content block route handlers.

use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use ridegear_core::ContentBlockId;
use ridegear_store::{ContentPatch, NewContentBlock};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::state::AppState;

/// Content block creation body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial content block update body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
}

/// List all content blocks (drafts included).
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(success(state.content().list().await?))
}

/// Content block detail by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ContentBlockId>,
) -> Result<impl IntoResponse> {
    let block = state
        .content()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("content: {id}")))?;
    Ok(success(block))
}

/// Create a content block.
#[instrument(skip(_admin, state, req))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateContentRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let block = state
        .content()
        .create(NewContentBlock {
            title: req.title,
            body: req.body,
            published: req.published,
        })
        .await?;
    Ok(success(block))
}

/// Merge a partial update onto a content block.
#[instrument(skip(_admin, state, req))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ContentBlockId>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse> {
    let block = state
        .content()
        .update(
            id,
            ContentPatch {
                title: req.title,
                body: req.body,
                published: req.published,
            },
        )
        .await?;
    Ok(success(block))
}

/// Delete a content block.
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ContentBlockId>,
) -> Result<impl IntoResponse> {
    if !state.content().remove(id).await? {
        return Err(AppError::NotFound(format!("content: {id}")));
    }
    Ok(success(serde_json::json!({ "deleted": true })))
}
