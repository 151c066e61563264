//! Product types.

use crate::ids::{CategoryId, ProductId, ShopId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// The cart copies products into its lines and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Base price.
    pub price: Money,
    /// Discounted price, when the shop runs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,
    /// Listing description.
    #[serde(default)]
    pub description: String,
    /// Category the product is listed under.
    pub category_id: CategoryId,
    /// Shop selling the product.
    pub shop_id: ShopId,
    /// Average rating (0.0 - 5.0).
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,
    /// Whether the shop currently has it. Display only; the cart does not enforce it.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Create an available product with no discount.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category_id: impl Into<CategoryId>,
        shop_id: impl Into<ShopId>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            price,
            discount_price: None,
            description: String::new(),
            category_id: category_id.into(),
            shop_id: shop_id.into(),
            rating: 0.0,
            review_count: 0,
            available: true,
        }
    }

    /// Set a discounted price.
    pub fn with_discount(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the rating and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Mark the product unavailable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// The price a customer pays per unit: the discounted price if set, else the base price.
    pub fn effective_price(&self) -> Money {
        self.discount_price.unwrap_or(self.price)
    }

    /// Whether a discounted price is set.
    pub fn has_discount(&self) -> bool {
        self.discount_price.is_some()
    }

    /// Saving per unit from the discount.
    pub fn savings(&self) -> Money {
        self.price.saturating_sub(&self.effective_price())
    }
}

/// Lower-case, hyphen-separated slug of a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
