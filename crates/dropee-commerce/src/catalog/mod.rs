//! Product catalog module.
//!
//! Contains types for products, categories, shops, and catalog filtering.

mod catalog;
mod category;
mod filter;
mod product;
mod shop;

pub use catalog::Catalog;
pub use category::Category;
pub use filter::Filter;
pub use product::{slugify, Product};
pub use shop::Shop;
