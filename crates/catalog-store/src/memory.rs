//! In-memory product store.
//!
//! [`InMemoryProductStore`] keeps every product in a `HashMap` behind a
//! single `RwLock`. Queries share the read lock for their whole duration and
//! mutations, batches included, hold the write lock exclusively.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};

use catalog_types::{
    HistoryEntry, HistoryValue, Product, ProductId, ProductStats, TrackedField, LOW_STOCK_LIMIT,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::ProductStore;

type ProductMap = HashMap<ProductId, Product>;

/// An in-memory implementation of [`ProductStore`].
///
/// Products are cloned on the way in and out. Data is lost when the store is
/// dropped.
pub struct InMemoryProductStore {
    products: RwLock<ProductMap>,
}

impl InMemoryProductStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }

    /// Number of products currently stored.
    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    // Every critical section leaves the map consistent after each step, so a
    // poisoned lock still guards valid data.
    fn read_map(&self) -> RwLockReadGuard<'_, ProductMap> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, ProductMap> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.read_map()
            .values()
            .filter(|p| keep(*p))
            .cloned()
            .collect()
    }

    fn ranked(&self, limit: i64, order: impl Fn(&Product, &Product) -> Ordering) -> Vec<Product> {
        let keep = usize::try_from(limit).unwrap_or(0);
        let mut products: Vec<Product> = self.read_map().values().cloned().collect();
        products.sort_by(|a, b| order(a, b));
        products.truncate(keep);
        products
    }

    /// Apply a single-field change and record it unconditionally.
    fn set_field(
        &self,
        id: &ProductId,
        field: TrackedField,
        value: HistoryValue,
        apply: impl FnOnce(&mut Product),
    ) -> StoreResult<Product> {
        let mut map = self.write_map();
        let product = map.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        let now = Utc::now();
        let old = product.tracked_value(field);
        apply(product);
        product.updated_at = now;
        product
            .history
            .push(HistoryEntry::new(field, old, value, now));
        debug!(id = %id, field = %field, history_len = product.history.len(), "field updated");
        Ok(product.clone())
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore for InMemoryProductStore {
    fn list_all(&self) -> Vec<Product> {
        self.read_map().values().cloned().collect()
    }

    fn get_by_id(&self, id: &ProductId) -> StoreResult<Product> {
        self.read_map()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn create(&self, product: Product) -> StoreResult<()> {
        let mut map = self.write_map();
        if map.contains_key(&product.id) {
            return Err(StoreError::already_exists(&product.id));
        }
        debug!(id = %product.id, "product created");
        map.insert(product.id.clone(), product);
        Ok(())
    }

    fn update(&self, id: &ProductId, mut product: Product) -> StoreResult<Product> {
        let mut map = self.write_map();
        let current = map.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        let now = Utc::now();
        let changes = current.replacement_changes(&product, now);
        let recorded = changes.len();

        let mut history = std::mem::take(&mut current.history);
        history.extend(changes);
        product.history = history;
        product.id = id.clone();
        product.updated_at = now;
        *current = product;

        debug!(id = %id, recorded, "product replaced");
        Ok(current.clone())
    }

    fn delete(&self, id: &ProductId) -> StoreResult<Product> {
        let removed = self
            .write_map()
            .remove(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        debug!(id = %id, "product deleted");
        Ok(removed)
    }

    fn get_by_category(&self, category: &str) -> Vec<Product> {
        self.filtered(|p| p.category == category)
    }

    fn get_by_price_range(&self, min: f64, max: f64) -> Vec<Product> {
        self.filtered(|p| p.price >= min && p.price <= max)
    }

    fn get_in_stock(&self) -> Vec<Product> {
        self.filtered(Product::is_in_stock)
    }

    fn update_stock(&self, id: &ProductId, stock: u32) -> StoreResult<Product> {
        self.set_field(id, TrackedField::Stock, stock.into(), |p| p.stock = stock)
    }

    fn get_all_categories(&self) -> Vec<String> {
        let map = self.read_map();
        let categories: HashSet<&str> = map.values().map(|p| p.category.as_str()).collect();
        categories.into_iter().map(str::to_owned).collect()
    }

    fn get_stats(&self) -> ProductStats {
        let map = self.read_map();
        let mut categories = HashSet::new();
        let mut total_price = 0.0;
        let mut stats = ProductStats {
            total_products: map.len(),
            ..ProductStats::default()
        };

        for product in map.values() {
            categories.insert(product.category.as_str());
            total_price += product.price;
            stats.total_stock += u64::from(product.stock);
            if product.stock == 0 {
                stats.out_of_stock_count += 1;
            }
            if product.stock < LOW_STOCK_LIMIT {
                stats.low_stock_count += 1;
            }
        }

        stats.total_categories = categories.len();
        if !map.is_empty() {
            stats.average_price = total_price / map.len() as f64;
        }
        stats
    }

    fn create_batch(&self, products: Vec<Product>) -> StoreResult<()> {
        let mut map = self.write_map();
        let requested = products.len();
        for (applied, product) in products.into_iter().enumerate() {
            if map.contains_key(&product.id) {
                warn!(id = %product.id, applied, requested, "batch create stopped on existing id");
                return Err(StoreError::already_exists(&product.id));
            }
            map.insert(product.id.clone(), product);
        }
        debug!(count = requested, "batch created");
        Ok(())
    }

    fn update_batch(&self, updates: HashMap<ProductId, Product>) -> StoreResult<()> {
        let mut map = self.write_map();
        let requested = updates.len();
        let now = Utc::now();
        for (applied, (id, mut product)) in updates.into_iter().enumerate() {
            let Some(slot) = map.get_mut(&id) else {
                warn!(id = %id, applied, requested, "batch update stopped on missing id");
                return Err(StoreError::not_found(&id));
            };
            // Stored history is kept; batch replaces append nothing to it.
            product.history = std::mem::take(&mut slot.history);
            product.id = id;
            product.updated_at = now;
            *slot = product;
        }
        debug!(count = requested, "batch updated");
        Ok(())
    }

    fn delete_batch(&self, ids: &[ProductId]) -> StoreResult<()> {
        let mut map = self.write_map();
        for (applied, id) in ids.iter().enumerate() {
            if map.remove(id).is_none() {
                warn!(
                    id = %id,
                    applied,
                    requested = ids.len(),
                    "batch delete stopped on missing id"
                );
                return Err(StoreError::not_found(id));
            }
        }
        debug!(count = ids.len(), "batch deleted");
        Ok(())
    }

    fn get_popular(&self, limit: i64) -> Vec<Product> {
        self.ranked(limit, |a, b| b.popularity.cmp(&a.popularity))
    }

    fn get_new(&self, limit: i64) -> Vec<Product> {
        self.ranked(limit, |a, b| b.created_at.cmp(&a.created_at))
    }

    fn get_discounted(&self) -> Vec<Product> {
        self.filtered(Product::is_discounted)
    }

    fn update_discount(&self, id: &ProductId, discount: f64) -> StoreResult<Product> {
        self.set_field(id, TrackedField::Discount, discount.into(), |p| {
            p.discount = discount
        })
    }

    fn get_featured(&self) -> Vec<Product> {
        self.filtered(|p| p.featured)
    }

    fn update_feature(&self, id: &ProductId, featured: bool) -> StoreResult<Product> {
        self.set_field(id, TrackedField::Featured, featured.into(), |p| {
            p.featured = featured
        })
    }

    fn get_out_of_stock(&self) -> Vec<Product> {
        self.filtered(|p| p.stock == 0)
    }

    fn get_low_stock(&self, threshold: i64) -> Vec<Product> {
        self.filtered(|p| p.stock > 0 && i64::from(p.stock) <= threshold)
    }
}

impl std::fmt::Debug for InMemoryProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProductStore")
            .field("product_count", &self.len())
            .finish()
    }
}
