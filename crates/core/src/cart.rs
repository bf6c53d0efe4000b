//! The shopping cart and its derived totals.
//!
//! A cart belongs to the client session, not the shared object store: the
//! storefront keeps live carts in a TTL cache keyed by [`CartId`] and the
//! session cookie carries the id. Every mutation recomputes the totals
//! synchronously, so a cart's stored totals are never stale.
//!
//! All operations here are total functions over in-memory state. Coupon
//! codes are validated by the caller against the coupons store before
//! [`Cart::apply_coupon`] is reached; the cart itself only does arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartId, Money, ProductId};

/// Sales tax rate applied to the subtotal, in whole percent.
pub const TAX_RATE_PERCENT: i64 = 8;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(10_000);

/// Flat shipping rate below the free-shipping threshold.
pub const FLAT_SHIPPING_RATE: Money = Money::from_cents(1_500);

/// Product data captured at add-to-cart time.
///
/// The unit price is a snapshot: later catalog price changes do not move
/// items already in a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub product_id: ProductId,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub variant: Option<String>,
    pub image: Option<String>,
    pub unit_price: Money,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Line key derived from product + variant; adding the same combination
    /// twice merges into one line.
    pub id: String,
    pub product_id: ProductId,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub variant: Option<String>,
    pub image: Option<String>,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// The discount rule of an applied coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the current subtotal, rounded half away from zero.
    Percent(Decimal),
    /// Fixed amount in cents.
    Fixed(Money),
}

/// A coupon applied to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    pub code: String,
    pub discount: Discount,
}

/// A client-session shopping cart with derived monetary totals.
///
/// Invariant: `total = max(0, subtotal + tax + shipping - discount)`,
/// recomputed after every item or coupon mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartItem>,
    pub coupon: Option<AppliedCoupon>,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
    pub updated_at: DateTime<Utc>,
}

/// Build the line key for a product + optional variant.
fn line_key(product_id: ProductId, variant: Option<&str>) -> String {
    match variant {
        Some(v) => format!("{product_id}:{v}"),
        None => product_id.to_string(),
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
            coupon: None,
            subtotal: Money::ZERO,
            tax: Money::ZERO,
            shipping: Money::ZERO,
            discount: Money::ZERO,
            total: Money::ZERO,
            updated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Add a product to the cart.
    ///
    /// If a line with the same product + variant key exists, its quantity is
    /// incremented; otherwise a new line is appended at the snapshot price.
    /// Quantities below 1 are treated as 1.
    pub fn add_item(&mut self, snapshot: ItemSnapshot, quantity: u32) {
        let quantity = quantity.max(1);
        let key = line_key(snapshot.product_id, snapshot.variant.as_deref());

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == key) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                id: key,
                product_id: snapshot.product_id,
                slug: snapshot.slug,
                title: snapshot.title,
                brand: snapshot.brand,
                variant: snapshot.variant,
                image: snapshot.image,
                unit_price: snapshot.unit_price,
                quantity,
            });
        }

        self.recalculate();
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// Returns false if no line matches `item_id`. No upper bound is
    /// enforced against stock.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        let found = if quantity == 0 {
            let before = self.items.len();
            self.items.retain(|i| i.id != item_id);
            self.items.len() != before
        } else if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
            true
        } else {
            false
        };

        if found {
            self.recalculate();
        }
        found
    }

    /// Remove a line. Returns false if no line matches.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        let removed = self.items.len() != before;
        if removed {
            self.recalculate();
        }
        removed
    }

    /// Remove all lines and any applied coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
        self.recalculate();
    }

    /// Apply a coupon. Replaces any previously applied one.
    pub fn apply_coupon(&mut self, code: impl Into<String>, discount: Discount) {
        self.coupon = Some(AppliedCoupon {
            code: code.into(),
            discount,
        });
        self.recalculate();
    }

    /// Remove the applied coupon, if any.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
        self.recalculate();
    }

    /// Recompute all derived totals from the current lines and coupon.
    ///
    /// An empty cart short-circuits everything to zero; in particular no
    /// flat shipping rate is charged on nothing.
    fn recalculate(&mut self) {
        self.updated_at = Utc::now();

        if self.items.is_empty() {
            self.subtotal = Money::ZERO;
            self.tax = Money::ZERO;
            self.shipping = Money::ZERO;
            self.discount = Money::ZERO;
            self.total = Money::ZERO;
            return;
        }

        self.subtotal = self.items.iter().map(CartItem::line_total).sum();
        self.tax = self.subtotal.percent_truncated(TAX_RATE_PERCENT);
        self.shipping = if self.subtotal > FREE_SHIPPING_THRESHOLD {
            Money::ZERO
        } else {
            FLAT_SHIPPING_RATE
        };
        self.discount = match &self.coupon {
            Some(c) => match &c.discount {
                Discount::Percent(pct) => self.subtotal.percent_rounded(*pct),
                Discount::Fixed(amount) => *amount,
            },
            None => Money::ZERO,
        };
        self.total = self
            .subtotal
            .saturating_add(self.tax)
            .saturating_add(self.shipping)
            .saturating_sub(self.discount);
    }
}
