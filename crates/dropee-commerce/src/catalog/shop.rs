//! Shops that list products in the catalog.

use crate::ids::ShopId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A local shop or restaurant selling through the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shop {
    /// Unique shop identifier.
    pub id: ShopId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Average customer rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Neighbourhood the shop is in.
    #[serde(default)]
    pub location_tag: String,
    /// Delivery fee the shop advertises.
    pub delivery_fee: Money,
    /// Advertised delivery window, e.g. "25-35 min".
    #[serde(default)]
    pub estimated_time: String,
}

impl Shop {
    /// Create a shop with no rating, location or delivery estimate.
    pub fn new(
        id: impl Into<ShopId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        delivery_fee: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            rating: 0.0,
            location_tag: String::new(),
            delivery_fee,
            estimated_time: String::new(),
        }
    }

    /// Set the location tag.
    pub fn located_in(mut self, location_tag: impl Into<String>) -> Self {
        self.location_tag = location_tag.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the delivery estimate.
    pub fn with_estimated_time(mut self, estimated_time: impl Into<String>) -> Self {
        self.estimated_time = estimated_time.into();
        self
    }
}
