//! Catalog route handlers.

use axum::extract::{Path, Query, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use ridegear_core::Money;
use ridegear_store::{ProductListParams, ProductSort};

use crate::error::{AppError, Result};
use crate::response::success;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Substring search over title, brand, and tags.
    pub q: Option<String>,
    pub featured: Option<bool>,
    /// Price window, in cents.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: Option<ProductSort>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Hard cap on page size.
const MAX_LIMIT: usize = 100;

impl ProductsQuery {
    fn into_params(self) -> ProductListParams {
        ProductListParams {
            category: self.category,
            brand: self.brand,
            search: self.q,
            featured: self.featured,
            min_price: self.min_price.map(Money::from_cents),
            max_price: self.max_price.map(Money::from_cents),
            sort: self.sort.unwrap_or_default(),
            offset: self.offset.unwrap_or(0),
            limit: self.limit.unwrap_or(0).min(MAX_LIMIT),
        }
    }

    /// Stable cache key over the normalized parameters.
    fn cache_key(&self) -> String {
        format!(
            "c={:?}|b={:?}|q={:?}|f={:?}|min={:?}|max={:?}|s={:?}|o={:?}|l={:?}",
            self.category,
            self.brand,
            self.q,
            self.featured,
            self.min_price,
            self.max_price,
            self.sort,
            self.offset,
            self.limit
        )
    }
}

/// List products with filters, sorting, and pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Value>> {
    let key = query.cache_key();
    if let Some(page) = state.catalog_cache().get(&key).await {
        return Ok(success(page));
    }

    let page = state.products().list(&query.into_params()).await?;
    state.catalog_cache().put(key, page.clone()).await;
    Ok(success(page))
}

/// Product detail by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state
        .products()
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {slug}")))?;
    Ok(success(product))
}
