//! Admin category route handlers.

use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use ridegear_core::CategoryId;
use ridegear_store::{CategoryPatch, NewCategory};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::state::AppState;

/// Category creation body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent: Option<CategoryId>,
}

/// Partial category update body.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent: Option<CategoryId>,
}

/// List all categories.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    Ok(success(state.categories().list().await?))
}

/// Category detail by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let category = state
        .categories()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category: {id}")))?;
    Ok(success(category))
}

/// Create a category.
#[instrument(skip(_admin, state, req))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let category = state
        .categories()
        .create(NewCategory {
            name: req.name,
            description: req.description,
            image: req.image,
            parent: req.parent,
        })
        .await?;
    Ok(success(category))
}

/// Merge a partial update onto a category.
#[instrument(skip(_admin, state, req))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let category = state
        .categories()
        .update(
            id,
            CategoryPatch {
                name: req.name,
                description: req.description.map(Some),
                image: req.image.map(Some),
                parent: req.parent.map(Some),
            },
        )
        .await?;
    Ok(success(category))
}

/// Delete a category. Products keep their embedded copy (no cascade).
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    if !state.categories().remove(id).await? {
        return Err(AppError::NotFound(format!("category: {id}")));
    }
    Ok(success(serde_json::json!({ "deleted": true })))
}
