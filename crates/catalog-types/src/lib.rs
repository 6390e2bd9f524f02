//! Foundation types for the product catalog.
//!
//! This crate provides the data model shared by the storage engine and the
//! HTTP adapter. Every other catalog crate depends on `catalog-types`.
//!
//! # Key Types
//!
//! - [`ProductId`] — Caller-assigned product identifier (UUID v7 text)
//! - [`Product`] — The catalog record, including its change history
//! - [`HistoryEntry`] — One field-level change with old and new values
//! - [`HistoryValue`] — Closed set of value kinds a history entry can carry
//! - [`TrackedField`] — Fields whose changes are recorded in history
//! - [`ProductStats`] — Aggregate snapshot over the whole catalog
//! - [`ProductInput`] — Validated create/replace payload

pub mod error;
pub mod history;
pub mod id;
pub mod input;
pub mod product;
pub mod stats;

pub use error::ValidationError;
pub use history::{HistoryEntry, HistoryValue, TrackedField};
pub use id::ProductId;
pub use input::{validate_discount, ProductInput};
pub use product::Product;
pub use stats::{ProductStats, LOW_STOCK_LIMIT};
