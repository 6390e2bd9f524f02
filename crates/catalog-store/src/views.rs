//! Read-only views derived from a snapshot of products.
//!
//! These functions never touch the store directly: callers take a snapshot
//! (usually [`ProductStore::list_all`](crate::ProductStore::list_all)) and
//! derive from it, so a view reflects one consistent moment.

use std::collections::{BTreeMap, HashMap};

use catalog_types::Product;

/// Products whose name or description starts with `query` (case-sensitive).
///
/// An empty query matches every product.
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.name.starts_with(query) || p.description.starts_with(query))
        .cloned()
        .collect()
}

/// Other products in the same category as `target`.
pub fn similar(products: &[Product], target: &Product) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != target.id && p.category == target.category)
        .cloned()
        .collect()
}

/// Other products sharing at least one tag with `target`.
pub fn related(products: &[Product], target: &Product) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != target.id && shares_tag(&p.tags, &target.tags))
        .cloned()
        .collect()
}

fn shares_tag(a: &[String], b: &[String]) -> bool {
    a.iter().any(|tag| b.contains(tag))
}

/// Products grouped by name, keeping only names used more than once.
///
/// Each product appears once in its group, ordered by identifier.
pub fn duplicates(products: &[Product]) -> BTreeMap<String, Vec<Product>> {
    let mut by_name: HashMap<&str, Vec<&Product>> = HashMap::new();
    for product in products {
        by_name.entry(product.name.as_str()).or_default().push(product);
    }

    by_name
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(name, mut group)| {
            group.sort_by(|a, b| a.id.cmp(&b.id));
            (name.to_string(), group.into_iter().cloned().collect())
        })
        .collect()
}

/// Per-field completeness checks for a single product.
pub fn validation_report(product: &Product) -> BTreeMap<&'static str, bool> {
    BTreeMap::from([
        ("name", !product.name.is_empty()),
        ("price", product.price > 0.0),
        ("category", !product.category.is_empty()),
        // Always true: stock is unsigned.
        ("stock", true),
        ("sku", !product.sku.is_empty()),
        ("barcode", !product.barcode.is_empty()),
    ])
}
