use std::collections::HashMap;

use catalog_types::{Product, ProductId, ProductStats};

use crate::error::StoreResult;

/// Product storage engine.
///
/// All implementations must satisfy these invariants:
/// - Identifiers are unique across live products and never reassigned.
/// - History is append-only; entries keep insertion order.
/// - Every call observes and leaves a consistent map: readers never see a
///   half-applied mutation, including a half-applied batch.
/// - Batch operations stop at the first failing entry and do **not** roll
///   back the entries applied before it.
pub trait ProductStore: Send + Sync {
    /// All products, in no particular order.
    fn list_all(&self) -> Vec<Product>;

    fn get_by_id(&self, id: &ProductId) -> StoreResult<Product>;

    /// Insert a product whose identifier the caller has already assigned.
    fn create(&self, product: Product) -> StoreResult<()>;

    /// Replace a product, recording history for changed tracked fields.
    ///
    /// Name, description, price, category and stock are compared in that
    /// order; each differing field appends one entry to the stored history.
    /// The history carried by `product` itself is ignored. Returns the record
    /// as stored.
    fn update(&self, id: &ProductId, product: Product) -> StoreResult<Product>;

    /// Remove a product, returning it.
    fn delete(&self, id: &ProductId) -> StoreResult<Product>;

    /// Products whose category matches exactly (case-sensitive).
    fn get_by_category(&self, category: &str) -> Vec<Product>;

    /// Products with `min <= price <= max`. Bounds are not validated.
    fn get_by_price_range(&self, min: f64, max: f64) -> Vec<Product>;

    fn get_in_stock(&self) -> Vec<Product>;

    /// Set the stock level. Always appends a `stock` history entry, even
    /// when the value is unchanged.
    fn update_stock(&self, id: &ProductId, stock: u32) -> StoreResult<Product>;

    /// Distinct categories, in no particular order.
    fn get_all_categories(&self) -> Vec<String>;

    fn get_stats(&self) -> ProductStats;

    /// Insert products in order. Fails with `AlreadyExists` at the first
    /// collision; earlier inserts of the same call remain.
    fn create_batch(&self, products: Vec<Product>) -> StoreResult<()>;

    /// Replace product fields without recording history. Stored history is
    /// kept and `updated_at` is refreshed. Fails
    /// with `NotFound` at the first missing identifier; replacements applied
    /// before it remain. Which entries those are depends on map iteration
    /// order.
    fn update_batch(&self, updates: HashMap<ProductId, Product>) -> StoreResult<()>;

    /// Delete products in order. Fails with `NotFound` at the first missing
    /// identifier; earlier deletions of the same call remain.
    fn delete_batch(&self, ids: &[ProductId]) -> StoreResult<()>;

    /// Products by descending popularity, at most `limit` of them.
    /// A non-positive `limit` yields nothing.
    fn get_popular(&self, limit: i64) -> Vec<Product>;

    /// Products by descending creation time, at most `limit` of them.
    /// A non-positive `limit` yields nothing.
    fn get_new(&self, limit: i64) -> Vec<Product>;

    fn get_discounted(&self) -> Vec<Product>;

    /// Set the discount. Always appends a `discount` history entry. The
    /// value is stored as given; range checks belong to the caller.
    fn update_discount(&self, id: &ProductId, discount: f64) -> StoreResult<Product>;

    fn get_featured(&self) -> Vec<Product>;

    /// Set the featured flag. Always appends a `featured` history entry.
    fn update_feature(&self, id: &ProductId, featured: bool) -> StoreResult<Product>;

    fn get_out_of_stock(&self) -> Vec<Product>;

    /// Products with `0 < stock <= threshold`.
    fn get_low_stock(&self, threshold: i64) -> Vec<Product>;
}
