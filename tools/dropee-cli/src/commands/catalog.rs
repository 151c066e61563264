//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use dropee_commerce::prelude::*;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{availability_badge, price_label};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    match args.command {
        Some(CatalogCommand::List {
            category,
            shop,
            available,
            discounted,
        }) => {
            let filters = list_filters(
                &catalog,
                category.as_deref(),
                shop.as_deref(),
                available,
                discounted,
            )?;
            print_products(ctx, "Products", &catalog.filter(&filters));
        }
        None => print_products(ctx, "Products", &catalog.filter(&[])),
        Some(CatalogCommand::Search { query }) => {
            let results = catalog.search(&query);
            print_products(ctx, &format!("Results for \"{}\"", query), &results);
        }
        Some(CatalogCommand::Categories) => {
            if ctx.output.is_json() {
                ctx.output.json(&catalog.categories());
                return Ok(());
            }
            ctx.output.header("Categories");
            for category in catalog.categories() {
                let count = catalog.in_category(&category.id).count();
                ctx.output.list_item(&format!(
                    "{} ({}) - {} products",
                    category.name, category.slug, count
                ));
            }
        }
        Some(CatalogCommand::Shops) => {
            if ctx.output.is_json() {
                ctx.output.json(&catalog.shops());
                return Ok(());
            }
            ctx.output.header("Shops");
            for shop in catalog.shops() {
                ctx.output.list_item(&shop_line(shop, catalog.in_shop(&shop.id).count()));
            }
        }
    }
    Ok(())
}

/// One-line summary of a shop.
fn shop_line(shop: &Shop, products: usize) -> String {
    let mut line = format!("{} ({})", shop.name, shop.slug);
    if !shop.location_tag.is_empty() {
        line.push_str(&format!(", {}", shop.location_tag));
    }
    line.push_str(&format!(
        " - {:.1} stars, {} delivery",
        shop.rating,
        shop.delivery_fee.display_compact()
    ));
    if !shop.estimated_time.is_empty() {
        line.push_str(&format!(" in {}", shop.estimated_time));
    }
    line.push_str(&format!(", {} products", products));
    line
}

fn list_filters(
    catalog: &Catalog,
    category: Option<&str>,
    shop: Option<&str>,
    available: bool,
    discounted: bool,
) -> Result<Vec<Filter>> {
    let mut filters = Vec::new();
    if let Some(slug) = category {
        let category = catalog
            .category_by_slug(slug)
            .ok_or_else(|| anyhow!("No category '{}'", slug))?;
        filters.push(Filter::category(category.id.clone()));
    }
    if let Some(slug) = shop {
        let shop = catalog
            .shop_by_slug(slug)
            .ok_or_else(|| anyhow!("No shop '{}'", slug))?;
        filters.push(Filter::shop(shop.id.clone()));
    }
    if available {
        filters.push(Filter::Available);
    }
    if discounted {
        filters.push(Filter::Discounted);
    }
    Ok(filters)
}

fn print_products(ctx: &Context, title: &str, products: &[&Product]) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    ctx.output.header(title);
    if products.is_empty() {
        ctx.output.info("No products found.");
        return;
    }

    let widths = [4, 24, 8, 12];
    ctx.output.table_row(&["ID", "NAME", "RATING", "PRICE"], &widths);
    for product in products {
        let rating = format!("{:.1}", product.rating);
        let price = price_label(product.price, product.discount_price);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &rating,
                &format!("{}  {}", price, availability_badge(product.available)),
            ],
            &widths,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_resolves_slug() {
        let catalog = Catalog::demo();
        let filters = list_filters(&catalog, Some("food"), None, false, true).unwrap();
        let names: Vec<_> = catalog.filter(&filters).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Biryani"]);
    }

    #[test]
    fn unknown_category_is_an_error() {
        let catalog = Catalog::demo();
        assert!(list_filters(&catalog, Some("toys"), None, false, false).is_err());
    }

    #[test]
    fn shop_filter_resolves_slug() {
        let catalog = Catalog::demo();
        let filters = list_filters(&catalog, None, Some("green-mart"), false, false).unwrap();
        let names: Vec<_> = catalog.filter(&filters).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fresh Vegetables Box"]);
        assert!(list_filters(&catalog, None, Some("toy-shop"), false, false).is_err());
    }

    #[test]
    fn shop_summary_line() {
        let catalog = Catalog::demo();
        let kitchen = catalog.shop_by_slug("fresh-kitchen").unwrap();
        assert_eq!(
            shop_line(kitchen, 2),
            "Fresh Kitchen (fresh-kitchen), Thangmeiband - 4.8 stars, \u{20b9}30 delivery \
             in 25-35 min, 2 products"
        );
    }
}
