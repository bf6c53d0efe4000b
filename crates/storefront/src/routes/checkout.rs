//! Checkout route handler.
//!
//! Submission constructs an `Order` from the current cart snapshot, runs
//! the simulated payment authorization, and clears the cart on success.
//! There is no idempotency key: a client that retries a submission creates
//! a second order, exactly like the original.

use axum::extract::State;
use axum::{Json, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use ridegear_core::{CartId, Email, PaymentMethod};
use ridegear_store::NewOrder;
use ridegear_store::entities::{Address, OrderItem};

use crate::error::{AppError, Result};
use crate::middleware::auth::OptionalUser;
use crate::models::session_keys;
use crate::response::success;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Shipping address fields, presence-checked like the wizard's gates.
#[derive(Debug, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub line1: String,
    pub line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub country: String,
}

impl From<AddressInput> for Address {
    fn from(input: AddressInput) -> Self {
        Self {
            name: input.name,
            line1: input.line1,
            line2: input.line2,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
        }
    }
}

/// Checkout submission body.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(email)]
    pub email: String,
    #[validate]
    pub address: AddressInput,
    pub payment_method: PaymentMethod,
}

/// Submit the checkout.
///
/// Fails with 400 on an empty cart, 402 when the simulated payment
/// authorization declines. On success the cart is cleared and the created
/// order is returned for the confirmation page.
#[instrument(skip(state, session, req))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    OptionalUser(user): OptionalUser,
    Json(req): Json<CheckoutRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;

    let cart = load_cart(&state, &session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let email =
        Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !state.payments().authorize(req.payment_method, cart.total) {
        return Err(AppError::PaymentDeclined);
    }

    let order = state
        .orders()
        .create(NewOrder {
            user_id: user.map(|u| u.id),
            email,
            items: cart.items.iter().map(OrderItem::from).collect(),
            address: req.address.into(),
            payment_method: req.payment_method,
            subtotal: cart.subtotal,
            tax: cart.tax,
            shipping: cart.shipping,
            discount: cart.discount,
            total: cart.total,
            coupon_code: cart.coupon.as_ref().map(|c| c.code.clone()),
        })
        .await?;

    // Success clears the cart; the session gets a fresh id on next use.
    state.carts().remove(cart.id).await;
    session
        .remove::<CartId>(session_keys::CART_ID)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(order = %order.number, total = %order.total, "order placed");
    Ok(success(order))
}
