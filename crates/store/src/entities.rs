//! Entity records persisted in the object store.
//!
//! Records are plain serde structs. The category a product belongs to is
//! embedded into the product document at write time; there are no joins at
//! read time.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use ridegear_core::cart::{CartItem, Discount};
use ridegear_core::{
    CategoryId, ContentBlockId, CouponId, CouponKind, Email, Money, OrderId, OrderStatus,
    PaymentMethod, ProductId, ReviewId, UserId, UserRole,
};

/// A product category. `slug` is unique across the categories store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub parent: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named product option axis (e.g., Size, Color) with its option list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub options: Vec<String>,
}

/// A catalog product. `slug` is unique; `stock` never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    pub brand: String,
    /// Embedded at write time; not refreshed when the category changes.
    pub category: Category,
    pub price: Money,
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    pub stock: u32,
    /// Average review rating, 0.0 when unreviewed.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipping address captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// An immutable order line, snapshotted from the cart at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub slug: String,
    pub title: String,
    pub brand: String,
    #[serde(default)]
    pub variant: Option<String>,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            slug: item.slug.clone(),
            title: item.title.clone(),
            brand: item.brand.clone(),
            variant: item.variant.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

/// A placed order. Created once at checkout submission; the item snapshot
/// is immutable thereafter and only the status field changes (admin only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number, generated at creation.
    pub number: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub email: Email,
    pub items: Vec<OrderItem>,
    pub address: Address,
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub discount: Money,
    pub total: Money,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named discount rule. `code` is unique and stored uppercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub kind: CouponKind,
    /// Percentage points for percent coupons, cents for fixed ones.
    pub value: Decimal,
    pub active: bool,
    /// Optional category-slug scope; `None` applies storewide.
    #[serde(default)]
    pub scope: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    /// The cart-level discount rule this coupon encodes.
    #[must_use]
    pub fn discount(&self) -> Discount {
        match self.kind {
            CouponKind::Percent => Discount::Percent(self.value),
            CouponKind::Fixed => Discount::Fixed(Money::from_cents(
                self.value.trunc().to_i64().unwrap_or(0),
            )),
        }
    }
}

/// A registered shopper or admin. `email` is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A customer product review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    /// 1 through 5.
    pub rating: u8,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A CMS-style content block. `slug` is unique; `body` is markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: ContentBlockId,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storewide settings, stored as a singleton document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_name: String,
    pub currency_code: String,
    pub support_email: String,
    /// Surfaced for display; the pricing rules in core are the authority.
    pub free_shipping_threshold: Money,
    pub flat_shipping_rate: Money,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "RideGear".to_string(),
            currency_code: "USD".to_string(),
            support_email: "support@ridegear.shop".to_string(),
            free_shipping_threshold: ridegear_core::cart::FREE_SHIPPING_THRESHOLD,
            flat_shipping_rate: ridegear_core::cart::FLAT_SHIPPING_RATE,
        }
    }
}
