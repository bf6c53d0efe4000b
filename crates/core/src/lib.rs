//! RideGear Core - Shared types library.
//!
//! This crate provides common types used across all RideGear components:
//! - `store` - Local persistence adapter and entity records
//! - `storefront` - Public-facing storefront API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere. The shopping cart lives here rather than in the
//! store crate because carts belong to the client session, not the shared
//! object store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`cart`] - The shopping cart and its derived totals
//! - [`slug`] - URL slug derivation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod slug;
pub mod types;

pub use types::*;
