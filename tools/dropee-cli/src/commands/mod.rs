//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use dropee_commerce::prelude::*;

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product id or slug.
        product: String,

        /// Units to add.
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Remove a product's line.
    Remove {
        /// Product id or slug.
        product: String,
    },
    /// Set a line's quantity; 0 or less removes it.
    SetQty {
        /// Product id or slug.
        product: String,

        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
    /// Set the promo code. An empty code removes it.
    Promo {
        /// Code to apply.
        #[arg(default_value = "")]
        code: String,
    },
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only products in this category (slug).
        #[arg(long)]
        category: Option<String>,

        /// Only products sold by this shop (slug).
        #[arg(long)]
        shop: Option<String>,

        /// Only products that can be ordered now.
        #[arg(long)]
        available: bool,

        /// Only discounted products.
        #[arg(long)]
        discounted: bool,
    },
    /// Search product names and descriptions.
    Search {
        /// Search text.
        query: String,
    },
    /// List categories.
    Categories,
    /// List shops.
    Shops,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Contact phone number.
    #[arg(long)]
    pub phone: String,

    /// Delivery address.
    #[arg(long)]
    pub address: String,

    /// Notes for the shop or rider.
    #[arg(long)]
    pub instructions: Option<String>,

    /// Promo code to apply before submitting.
    #[arg(long)]
    pub promo: Option<String>,
}

/// Look a product up by id, falling back to its slug.
pub fn find_product<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Product> {
    catalog
        .find(&ProductId::new(key))
        .or_else(|| catalog.find_by_slug(key))
        .ok_or_else(|| anyhow!("No product with id or slug '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_id_or_slug() {
        let catalog = Catalog::demo();
        assert_eq!(find_product(&catalog, "2").unwrap().name, "Fresh Vegetables Box");
        assert_eq!(find_product(&catalog, "butter-chicken").unwrap().id.as_str(), "4");
        assert!(find_product(&catalog, "pizza").is_err());
    }
}
