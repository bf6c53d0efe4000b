//! RideGear Store - the local persistence adapter.
//!
//! Every entity in the system (products, categories, users, orders, coupons,
//! reviews, content blocks, settings) is owned by this crate. Storage sits
//! behind the [`backend::StoreBackend`] trait so the backing store is
//! swappable: [`backend::MemoryBackend`] keeps everything in process memory
//! (tests, the mock API mode), [`backend::FileBackend`] persists one JSON
//! file per object store under a data directory.
//!
//! # Contract
//!
//! - `list`/`get` never fail for absence: they return empty pages / `None`.
//! - `create` assigns a generated id and slug, stamps timestamps, and maps
//!   unique-index violations (slug, email, coupon code) to
//!   [`StoreError::Conflict`].
//! - `update` merges a partial patch onto the existing record and fails with
//!   [`StoreError::NotFound`] when the id is absent.
//! - `remove` deletes by id with no cascade handling: deleting a category
//!   does not touch referencing products.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod adapters;
pub mod backend;
pub mod entities;

use thiserror::Error;

pub use adapters::{
    CategoryPatch, CategoryStore, ContentPatch, ContentStore, CouponPatch, CouponStore,
    NewCategory, NewContentBlock, NewCoupon, NewOrder, NewProduct, NewReview, NewUser,
    OrderListParams, OrderStore, Page, ProductListParams, ProductPatch, ProductSort,
    ProductStore, ReviewStore, SettingsStore, UserStore,
};
pub use backend::{Document, FileBackend, MemoryBackend, StoreBackend};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store I/O failed.
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A document failed to serialize or deserialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique-index violation (e.g., slug, email, coupon code).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Object store names, mirroring the persisted state layout.
pub mod stores {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const USERS: &str = "users";
    pub const ORDERS: &str = "orders";
    pub const COUPONS: &str = "coupons";
    pub const REVIEWS: &str = "reviews";
    pub const CONTENT_BLOCKS: &str = "content_blocks";
    pub const SETTINGS: &str = "settings";

    /// All store names, in seed/report order.
    pub const ALL: &[&str] = &[
        PRODUCTS,
        CATEGORIES,
        USERS,
        ORDERS,
        COUPONS,
        REVIEWS,
        CONTENT_BLOCKS,
        SETTINGS,
    ];
}
