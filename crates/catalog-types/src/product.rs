use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::{HistoryEntry, HistoryValue, TrackedField};
use crate::id::ProductId;

/// A catalog record.
///
/// `popularity` and `views` are informational counters: no store operation
/// mutates them. `history` is append-only and kept in chronological order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub discount: f64,
    pub featured: bool,
    pub popularity: i64,
    pub views: i64,
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

impl Product {
    /// Create a blank product stamped with `now` for both timestamps.
    pub fn new(id: ProductId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            price: 0.0,
            category: String::new(),
            stock: 0,
            created_at: now,
            updated_at: now,
            discount: 0.0,
            featured: false,
            popularity: 0,
            views: 0,
            tags: Vec::new(),
            sku: String::new(),
            barcode: String::new(),
            weight: 0.0,
            dimensions: String::new(),
            status: String::new(),
            history: Vec::new(),
        }
    }

    /// Current value of a tracked field.
    pub fn tracked_value(&self, field: TrackedField) -> HistoryValue {
        match field {
            TrackedField::Name => self.name.as_str().into(),
            TrackedField::Description => self.description.as_str().into(),
            TrackedField::Price => self.price.into(),
            TrackedField::Category => self.category.as_str().into(),
            TrackedField::Stock => self.stock.into(),
            TrackedField::Discount => self.discount.into(),
            TrackedField::Featured => self.featured.into(),
        }
    }

    /// History entries describing a full replacement of `self` by `next`.
    ///
    /// Only [`TrackedField::REPLACE_ORDER`] is compared, and entries come out
    /// in that order. Every other attribute is replaced without a record.
    pub fn replacement_changes(&self, next: &Product, at: DateTime<Utc>) -> Vec<HistoryEntry> {
        TrackedField::REPLACE_ORDER
            .iter()
            .filter_map(|&field| {
                let old = self.tracked_value(field);
                let new = next.tracked_value(field);
                (old != new).then(|| HistoryEntry::new(field, old, new, at))
            })
            .collect()
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_discounted(&self) -> bool {
        self.discount > 0.0
    }
}
