//! Catalog filter types.

use crate::catalog::Product;
use crate::ids::{CategoryId, ShopId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A filter over catalog products. Lists of filters combine with AND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category.
    Category(CategoryId),
    /// Filter by shop.
    Shop(ShopId),
    /// Effective price within an inclusive range.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only products currently available.
    Available,
    /// Only products with a discounted price.
    Discounted,
    /// Minimum rating.
    Rating { min: f64 },
    /// Case-insensitive text search in name and description.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a shop filter.
    pub fn shop(id: impl Into<ShopId>) -> Self {
        Filter::Shop(id.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(id) => &product.category_id == id,
            Filter::Shop(id) => &product.shop_id == id,
            Filter::PriceRange { min, max } => {
                let price = product.effective_price().amount_minor;
                min.map_or(true, |m| price >= m.amount_minor)
                    && max.map_or(true, |m| price <= m.amount_minor)
            }
            Filter::Available => product.available,
            Filter::Discounted => product.has_discount(),
            Filter::Rating { min } => product.rating >= *min,
            Filter::Text(query) => {
                let query = query.trim().to_lowercase();
                query.is_empty()
                    || product.name.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
            }
        }
    }
}
