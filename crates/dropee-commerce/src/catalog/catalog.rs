//! In-memory product catalog.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{Category, Filter, Product, Shop};
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId, ShopId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A read-only set of categories, shops and products priced in one currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    currency: Currency,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    shops: Vec<Shop>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids and foreign-currency prices.
    pub fn new(
        currency: Currency,
        categories: Vec<Category>,
        shops: Vec<Shop>,
        products: Vec<Product>,
    ) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            let prices = std::iter::once(product.price).chain(product.discount_price);
            for price in prices {
                check_currency(currency, price)?;
            }
        }
        for shop in &shops {
            check_currency(currency, shop.delivery_fee)?;
        }
        Ok(Self {
            currency,
            categories,
            shops,
            products,
        })
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let raw: Catalog = serde_json::from_str(json)?;
        Self::new(raw.currency, raw.categories, raw.shops, raw.products)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ValidationError(format!("cannot read catalog {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// The storefront's built-in sample catalog.
    pub fn demo() -> Self {
        let inr = |major| Money::from_major(major, Currency::INR);
        let categories = vec![
            Category::new("1", "Food", "food", "Delicious meals from local restaurants"),
            Category::new("2", "Grocery", "grocery", "Fresh produce and daily essentials"),
            Category::new("3", "Gifts", "gifts", "Perfect presents for every occasion"),
        ];
        let shops = vec![
            Shop::new("1", "Fresh Kitchen", "fresh-kitchen", inr(30))
                .located_in("Thangmeiband")
                .with_rating(4.8)
                .with_estimated_time("25-35 min"),
            Shop::new("2", "Green Mart", "green-mart", inr(25))
                .located_in("Keishampat")
                .with_rating(4.6)
                .with_estimated_time("30-45 min"),
            Shop::new("3", "Gift Gallery", "gift-gallery", inr(40))
                .located_in("Paona Bazar")
                .with_rating(4.9)
                .with_estimated_time("45-60 min"),
        ];
        let products = vec![
            Product::new("1", "Chicken Biryani", inr(250), "1", "1")
                .with_discount(inr(220))
                .with_description(
                    "Aromatic basmati rice cooked with tender chicken pieces and special spices.",
                )
                .with_rating(4.7, 125),
            Product::new("2", "Fresh Vegetables Box", inr(150), "2", "2")
                .with_description("Assorted fresh vegetables sourced from local farms.")
                .with_rating(4.5, 89),
            Product::new("3", "Premium Gift Basket", inr(1500), "3", "3")
                .with_discount(inr(1299))
                .with_description(
                    "Curated selection of chocolates, dry fruits, and premium items.",
                )
                .with_rating(4.9, 47),
            Product::new("4", "Butter Chicken", inr(280), "1", "1")
                .with_description("Creamy tomato-based curry with tender chicken pieces.")
                .with_rating(4.8, 203),
        ];
        Self {
            currency: Currency::INR,
            categories,
            shops,
            products,
        }
    }

    /// Currency every price in the catalog uses.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in listing order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All shops in listing order.
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, as an error when missing.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Look up a product by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Look up a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Look up a shop by slug.
    pub fn shop_by_slug(&self, slug: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.slug == slug)
    }

    /// Look up the shop selling `product`.
    pub fn shop_of(&self, product: &Product) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == product.shop_id)
    }

    /// Products listed in a category.
    pub fn in_category<'a>(
        &'a self,
        id: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| &p.category_id == id)
    }

    /// Products sold by a shop.
    pub fn in_shop<'a>(&'a self, id: &'a ShopId) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| &p.shop_id == id)
    }

    /// Products currently available.
    pub fn available(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(|p| p.available)
    }

    /// Case-insensitive name/description search.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.filter(&[Filter::text(query)])
    }

    /// Products passing every filter.
    pub fn filter(&self, filters: &[Filter]) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filters.iter().all(|f| f.matches(p)))
            .collect()
    }
}

fn check_currency(expected: Currency, price: Money) -> Result<(), CommerceError> {
    if price.currency != expected {
        return Err(CommerceError::CurrencyMismatch {
            expected: expected.code().to_string(),
            got: price.currency.code().to_string(),
        });
    }
    Ok(())
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}
