//! Product review route handlers.

use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use ridegear_store::entities::Product;
use ridegear_store::{NewReview, ProductPatch};

use crate::error::{AppError, Result};
use crate::response::success;
use crate::state::AppState;

/// Review submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1))]
    pub body: String,
}

async fn product_by_slug(state: &AppState, slug: &str) -> Result<Product> {
    state
        .products()
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {slug}")))
}

/// Reviews for a product, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let product = product_by_slug(&state, &slug).await?;
    let reviews = state.reviews().list_for_product(product.id).await?;
    Ok(success(reviews))
}

/// Submit a review and refresh the product's rating aggregates.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let product = product_by_slug(&state, &slug).await?;
    let review = state
        .reviews()
        .create(NewReview {
            product_id: product.id,
            author: req.author,
            rating: req.rating,
            body: req.body,
        })
        .await?;

    // Recompute the product's aggregates from the full review list.
    let reviews = state.reviews().list_for_product(product.id).await?;
    let count = reviews.len() as u32;
    let average = if reviews.is_empty() {
        0.0
    } else {
        f64::from(reviews.iter().map(|r| u32::from(r.rating)).sum::<u32>()) / f64::from(count)
    };
    state
        .products()
        .update(
            product.id,
            ProductPatch {
                rating: Some(average),
                review_count: Some(count),
                ..ProductPatch::default()
            },
        )
        .await?;

    Ok(success(review))
}
