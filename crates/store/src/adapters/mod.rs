//! Typed adapters over the raw backend, one per entity.
//!
//! Each adapter owns its entity's uniqueness checks, list filtering, and
//! (de)serialization, and exposes the stable CRUD surface the route
//! handlers consume. Stores are cheap to construct: they hold only the
//! shared backend handle.

mod categories;
mod content;
mod coupons;
mod orders;
mod products;
mod reviews;
mod settings;
mod users;

pub use categories::{CategoryPatch, CategoryStore, NewCategory};
pub use content::{ContentPatch, ContentStore, NewContentBlock};
pub use coupons::{CouponPatch, CouponStore, NewCoupon};
pub use orders::{NewOrder, OrderListParams, OrderStore};
pub use products::{
    NewProduct, ProductListParams, ProductPatch, ProductSort, ProductStore,
};
pub use reviews::{NewReview, ReviewStore};
pub use settings::SettingsStore;
pub use users::{NewUser, UserStore};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::backend::Document;
use crate::StoreError;

/// One page of a filtered listing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches before offset/limit slicing.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Decode a stored document into a record.
///
/// A document that no longer matches the record shape is data corruption,
/// not a serialization bug in the caller.
pub(crate) fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    serde_json::from_value(doc).map_err(|e| StoreError::DataCorruption(e.to_string()))
}

pub(crate) fn encode<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    serde_json::to_value(record).map_err(StoreError::Serialization)
}

/// Slice a fully filtered/sorted result set into a page.
pub(crate) fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Page<T> {
    let total = items.len();
    let items: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    Page {
        items,
        total,
        offset,
        limit,
    }
}

/// Case-insensitive substring match used by the search filters.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
