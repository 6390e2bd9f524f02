use serde::{Deserialize, Serialize};

/// Stock level strictly below which a product counts as low in
/// [`ProductStats::low_stock_count`].
pub const LOW_STOCK_LIMIT: u32 = 10;

/// Aggregate snapshot over the catalog.
///
/// `discounted_count`, `featured_count` and `most_popular_category` are part
/// of the reported shape but are not computed by the store; they stay at
/// their zero values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub total_products: usize,
    pub total_categories: usize,
    pub average_price: f64,
    pub total_stock: u64,
    pub out_of_stock_count: usize,
    pub low_stock_count: usize,
    pub discounted_count: usize,
    pub featured_count: usize,
    pub most_popular_category: String,
}
