//! Cart route handlers.
//!
//! The session holds the cart id; the cart itself lives in the cart cache.
//! Every mutation loads the cart, applies the change (which recomputes the
//! totals), and writes the whole cart back.

use axum::extract::{Path, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use ridegear_core::CartId;
use ridegear_core::cart::{Cart, ItemSnapshot};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::response::success;
use crate::state::AppState;

/// Load the session's cart, creating a fresh one when the session has no
/// cart id or the cached cart has expired.
pub(crate) async fn load_cart(state: &AppState, session: &Session) -> Result<Cart> {
    if let Ok(Some(id)) = session.get::<CartId>(session_keys::CART_ID).await
        && let Some(cart) = state.carts().get(id).await
    {
        return Ok(cart);
    }

    let cart = Cart::new(CartId::generate());
    session
        .insert(session_keys::CART_ID, cart.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    state.carts().put(cart.clone()).await;
    Ok(cart)
}

async fn save_cart(state: &AppState, cart: &Cart) {
    state.carts().put(cart.clone()).await;
}

/// Add to cart request body.
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1))]
    pub slug: String,
    pub variant: Option<String>,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

/// Apply coupon request body.
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCouponRequest {
    #[validate(length(min = 1))]
    pub code: String,
}

/// Current cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&state, &session).await?;
    Ok(success(cart))
}

/// Add a product (optionally a specific variant) to the cart.
///
/// The unit price is snapshotted from the product at add time.
#[instrument(skip(state, session))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AddItemRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let product = state
        .products()
        .get_by_slug(&req.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {}", req.slug)))?;

    let mut cart = load_cart(&state, &session).await?;
    cart.add_item(
        ItemSnapshot {
            product_id: product.id,
            slug: product.slug,
            title: product.title,
            brand: product.brand,
            variant: req.variant,
            image: product.images.first().cloned(),
            unit_price: product.price,
        },
        req.quantity.unwrap_or(1),
    );
    save_cart(&state, &cart).await;
    Ok(success(cart))
}

/// Set a line's quantity; zero removes the line.
#[instrument(skip(state, session))]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&state, &session).await?;
    if !cart.update_quantity(&item_id, req.quantity) {
        return Err(AppError::NotFound(format!("cart item: {item_id}")));
    }
    save_cart(&state, &cart).await;
    Ok(success(cart))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&state, &session).await?;
    if !cart.remove_item(&item_id) {
        return Err(AppError::NotFound(format!("cart item: {item_id}")));
    }
    save_cart(&state, &cart).await;
    Ok(success(cart))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&state, &session).await?;
    cart.clear();
    save_cart(&state, &cart).await;
    Ok(success(cart))
}

/// Apply a coupon code to the cart.
///
/// Unknown, inactive, and out-of-scope codes are rejected here; the cart
/// itself never validates codes.
#[instrument(skip(state, session))]
pub async fn apply_coupon(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<ApplyCouponRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let coupon = state
        .coupons()
        .get_by_code(&req.code)
        .await?
        .filter(|c| c.active)
        .ok_or_else(|| AppError::BadRequest("Invalid coupon code".to_string()))?;

    let mut cart = load_cart(&state, &session).await?;

    // Scoped coupons require at least one line from the scoped category.
    if let Some(scope) = &coupon.scope {
        let mut in_scope = false;
        for item in &cart.items {
            if let Some(product) = state.products().get(item.product_id).await?
                && product.category.slug == *scope
            {
                in_scope = true;
                break;
            }
        }
        if !in_scope {
            return Err(AppError::BadRequest(
                "Coupon does not apply to anything in the cart".to_string(),
            ));
        }
    }

    cart.apply_coupon(coupon.code.clone(), coupon.discount());
    save_cart(&state, &cart).await;
    Ok(success(cart))
}

/// Remove the applied coupon.
#[instrument(skip(state, session))]
pub async fn remove_coupon(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&state, &session).await?;
    cart.remove_coupon();
    save_cart(&state, &cart).await;
    Ok(success(cart))
}
