use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ProductId;
use crate::product::Product;

/// Caller-supplied attributes for creating or replacing a product.
///
/// Server-owned attributes (identifier, timestamps, counters, history) are
/// not part of the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub status: String,
}

/// Check that a discount percentage lies within `0..=100`.
pub fn validate_discount(discount: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&discount) {
        Ok(())
    } else {
        Err(ValidationError::DiscountOutOfRange(discount))
    }
}

impl ProductInput {
    /// Validate the input, returning the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ValidationError::NonPositivePrice(self.price));
        }
        if self.category.is_empty() {
            return Err(ValidationError::EmptyField("category"));
        }
        validate_discount(self.discount)
    }

    /// Build a new product with the given identifier, stamped at `now`.
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        let mut product = Product::new(id, now);
        self.apply_to(&mut product, now);
        product
    }

    /// Overwrite the caller-owned attributes of `product` and set
    /// `updated_at`. Identifier, `created_at`, counters and history are left
    /// untouched.
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
        product.category = self.category;
        product.stock = self.stock;
        product.discount = self.discount;
        product.featured = self.featured;
        product.tags = self.tags;
        product.sku = self.sku;
        product.barcode = self.barcode;
        product.weight = self.weight;
        product.dimensions = self.dimensions;
        product.status = self.status;
        product.updated_at = now;
    }
}
