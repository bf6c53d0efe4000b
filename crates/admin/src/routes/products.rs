//! Admin product route handlers: CRUD plus bulk CSV import.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use ridegear_core::{Money, ProductId};
use ridegear_store::entities::{Category, Variant};
use ridegear_store::{NewProduct, ProductListParams, ProductPatch};

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::response::success;
use crate::services::events::EventKind;
use crate::state::AppState;

/// Search and pagination query for the product list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Variant input for create/update bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantInput {
    pub name: String,
    pub options: Vec<String>,
}

impl From<VariantInput> for Variant {
    fn from(input: VariantInput) -> Self {
        Self {
            name: input.name,
            options: input.options,
        }
    }
}

/// Product creation body. `category` is the category's slug.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(length(min = 1))]
    pub category: String,
    /// Cents.
    #[validate(range(min = 0))]
    pub price: i64,
    pub compare_at_price: Option<i64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VariantInput>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Partial product update body. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub brand: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    pub price: Option<i64>,
    pub compare_at_price: Option<i64>,
    pub stock: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub variants: Option<Vec<VariantInput>>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub specs: Option<BTreeMap<String, String>>,
    pub features: Option<Vec<String>>,
    pub featured: Option<bool>,
}

async fn resolve_category(state: &AppState, slug: &str) -> Result<Category> {
    state
        .categories()
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("unknown category: {slug}")))
}

/// List products with search and pagination.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .products()
        .list(&ProductListParams {
            search: query.q,
            offset: query.offset.unwrap_or(0),
            limit: query.limit.unwrap_or(0).min(100),
            ..ProductListParams::default()
        })
        .await?;
    Ok(success(page))
}

/// Product detail by id.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state
        .products()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {id}")))?;
    Ok(success(product))
}

/// Create a product.
#[instrument(skip(_admin, state, req))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let category = resolve_category(&state, &req.category).await?;
    let product = state
        .products()
        .create(NewProduct {
            title: req.title,
            brand: req.brand,
            category,
            price: Money::from_cents(req.price),
            compare_at_price: req.compare_at_price.map(Money::from_cents),
            stock: req.stock,
            tags: req.tags,
            variants: req.variants.into_iter().map(Variant::from).collect(),
            images: req.images,
            description: req.description,
            specs: req.specs,
            features: req.features,
            featured: req.featured,
        })
        .await?;

    tracing::info!(slug = %product.slug, "product created");
    Ok(success(product))
}

/// Merge a partial update onto a product.
#[instrument(skip(_admin, state, req))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse> {
    let category = match &req.category {
        Some(slug) => Some(resolve_category(&state, slug).await?),
        None => None,
    };

    let product = state
        .products()
        .update(
            id,
            ProductPatch {
                title: req.title,
                brand: req.brand,
                category,
                price: req.price.map(Money::from_cents),
                compare_at_price: req.compare_at_price.map(|v| Some(Money::from_cents(v))),
                stock: req.stock,
                rating: None,
                review_count: None,
                tags: req.tags,
                variants: req
                    .variants
                    .map(|vs| vs.into_iter().map(Variant::from).collect()),
                images: req.images,
                description: req.description,
                specs: req.specs,
                features: req.features,
                featured: req.featured,
            },
        )
        .await?;

    // Surface restocks that cross back above the low-stock line.
    if let Some(stock) = req.stock
        && stock <= 5
    {
        state
            .events()
            .publish(
                EventKind::LowStock,
                format!("{} is down to {stock} units", product.title),
            )
            .await;
    }

    Ok(success(product))
}

/// Delete a product.
#[instrument(skip(_admin, state))]
pub async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    if !state.products().remove(id).await? {
        return Err(AppError::NotFound(format!("product: {id}")));
    }
    Ok(success(serde_json::json!({ "deleted": true })))
}

// =============================================================================
// Bulk CSV import
// =============================================================================

/// Expected CSV header for the bulk import.
const IMPORT_HEADER: &str = "title,brand,category,price,stock";

/// Outcome of a bulk import: counts plus per-row errors.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
}

/// One failed row.
#[derive(Debug, Serialize)]
pub struct ImportError {
    /// 1-based line number in the uploaded file.
    pub line: usize,
    pub message: String,
}

/// Parsed CSV row.
struct ImportRow {
    title: String,
    brand: String,
    category: String,
    price: i64,
    stock: u32,
    description: String,
}

/// Parse one data row. Plain comma-split; quoted commas are not supported,
/// same as the original's uploader.
fn parse_row(line: &str) -> std::result::Result<ImportRow, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(format!("expected at least 5 columns, got {}", fields.len()));
    }

    let title = (*fields.first().unwrap_or(&"")).to_string();
    let brand = (*fields.get(1).unwrap_or(&"")).to_string();
    let category = (*fields.get(2).unwrap_or(&"")).to_string();
    if title.is_empty() || brand.is_empty() || category.is_empty() {
        return Err("title, brand, and category are required".to_string());
    }

    let price: i64 = fields
        .get(3)
        .unwrap_or(&"")
        .parse()
        .map_err(|_| "price must be an integer number of cents".to_string())?;
    if price < 0 {
        return Err("price must not be negative".to_string());
    }
    let stock: u32 = fields
        .get(4)
        .unwrap_or(&"")
        .parse()
        .map_err(|_| "stock must be a non-negative integer".to_string())?;
    let description = fields.get(5).map(|s| (*s).to_string()).unwrap_or_default();

    Ok(ImportRow {
        title,
        brand,
        category,
        price,
        stock,
        description,
    })
}

/// Bulk product import from an uploaded CSV file.
///
/// Multipart form with a `file` field holding
/// `title,brand,category,price,stock[,description]` rows. Rows fail
/// individually; the report carries per-line errors alongside the counts.
#[instrument(skip(_admin, state, multipart))]
pub async fn import(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut csv = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            csv = Some(field.text().await.map_err(|e| {
                AppError::BadRequest(format!("could not read uploaded file: {e}"))
            })?);
        }
    }
    let csv = csv.ok_or_else(|| AppError::BadRequest("missing file field".to_string()))?;

    let mut lines = csv.lines().enumerate();

    // The header row is required so column mixups fail loudly.
    match lines.next() {
        Some((_, header)) if header.trim().to_lowercase().starts_with(IMPORT_HEADER) => {}
        _ => {
            return Err(AppError::BadRequest(format!(
                "first line must be the header: {IMPORT_HEADER}[,description]"
            )));
        }
    }

    let mut report = ImportReport::default();
    for (index, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;

        let row = match parse_row(line) {
            Ok(row) => row,
            Err(message) => {
                report.failed += 1;
                report.errors.push(ImportError {
                    line: line_number,
                    message,
                });
                continue;
            }
        };

        let category = match state.categories().get_by_slug(&row.category).await? {
            Some(category) => category,
            None => {
                report.failed += 1;
                report.errors.push(ImportError {
                    line: line_number,
                    message: format!("unknown category: {}", row.category),
                });
                continue;
            }
        };

        let result = state
            .products()
            .create(NewProduct {
                title: row.title,
                brand: row.brand,
                category,
                price: Money::from_cents(row.price),
                compare_at_price: None,
                stock: row.stock,
                tags: Vec::new(),
                variants: Vec::new(),
                images: Vec::new(),
                description: row.description,
                specs: BTreeMap::new(),
                features: Vec::new(),
                featured: false,
            })
            .await;

        match result {
            Ok(_) => report.created += 1,
            Err(e) => {
                report.failed += 1;
                report.errors.push(ImportError {
                    line: line_number,
                    message: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        created = report.created,
        failed = report.failed,
        "bulk import completed"
    );
    Ok(success(report))
}
