//! Storage engine for the product catalog.
//!
//! This crate owns the authoritative map of products and every mutation and
//! query over it: point lookup, predicate filtering, batch mutation,
//! aggregate statistics and field-level change history.
//!
//! # Storage Backends
//!
//! All backends implement the [`ProductStore`] trait:
//!
//! - [`InMemoryProductStore`] -- `HashMap` behind one `RwLock`
//!
//! # Design Rules
//!
//! 1. One reader/writer lock covers the whole map, not individual records.
//! 2. Queries hold the read lock for their duration; mutations hold the
//!    write lock.
//! 3. A batch is a single critical section: other callers never observe it
//!    half-applied.
//! 4. A failing batch is not rolled back: entries applied before the first
//!    error stay applied.
//! 5. Identifiers are assigned by the caller; the store only checks them.
//! 6. No I/O beyond reading the system clock for timestamps.

pub mod error;
pub mod memory;
pub mod traits;
pub mod views;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryProductStore;
pub use traits::ProductStore;
