//! Cart commands.

use anyhow::Result;
use dropee_commerce::prelude::*;
use serde::Serialize;

use super::{find_product, CartArgs, CartCommand};
use crate::context::{Cart, Context};

/// Cart contents as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a [CartLine],
    promo_code: &'a str,
    totals: CartTotals,
    memory_only: bool,
}

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    apply(args.command.unwrap_or(CartCommand::Show), ctx, &mut cart)?;
    show(ctx, &cart);
    Ok(())
}

/// Apply a cart command, reporting what changed.
fn apply(command: CartCommand, ctx: &Context, cart: &mut Cart) -> Result<()> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add { product, quantity } => {
            let catalog = ctx.catalog()?;
            let product = find_product(&catalog, &product)?;
            let before = cart.state().quantity_of(&product.id);
            cart.add_item(product);
            let added = cart.state().quantity_of(&product.id) > before;
            if added && quantity > 1 {
                cart.update_quantity(&product.id, i64::from(before) + i64::from(quantity));
            }
            if !product.available {
                ctx.output
                    .warn(&format!("{} is currently unavailable.", product.name));
            }
            ctx.output.success(&format!(
                "Added {} x {} ({} in cart)",
                quantity,
                product.name,
                cart.state().quantity_of(&product.id)
            ));
        }
        CartCommand::Remove { product } => {
            let catalog = ctx.catalog()?;
            let id = product_id(&catalog, &product);
            if cart.state().line(&id).is_none() {
                ctx.output.info(&format!("{} is not in the cart.", product));
            } else {
                cart.remove_item(&id);
                ctx.output.success(&format!("Removed {}", product));
            }
        }
        CartCommand::SetQty { product, quantity } => {
            let catalog = ctx.catalog()?;
            let id = product_id(&catalog, &product);
            if cart.state().line(&id).is_none() {
                ctx.output.info(&format!("{} is not in the cart.", product));
            } else {
                cart.update_quantity(&id, quantity);
                match cart.state().quantity_of(&id) {
                    0 => ctx.output.success(&format!("Removed {}", product)),
                    n => ctx.output.success(&format!("{} quantity set to {}", product, n)),
                }
            }
        }
        CartCommand::Clear => {
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
        CartCommand::Promo { code } => {
            cart.set_promo_code(code.trim());
            if cart.promo_code().is_empty() {
                ctx.output.success("Promo code removed");
            } else if cart.promo_discount().is_positive() {
                ctx.output.success(&format!(
                    "Promo {} applied: -{}",
                    cart.promo_code(),
                    cart.promo_discount().display_compact()
                ));
            } else {
                ctx.output.warn(&format!(
                    "Promo {} saved but gives no discount on this cart.",
                    cart.promo_code()
                ));
            }
        }
    }
    Ok(())
}

/// Id for a product given by id or slug. Ids not in the catalog are used
/// as-is so stale lines can still be removed.
fn product_id(catalog: &Catalog, key: &str) -> ProductId {
    find_product(catalog, key)
        .map(|p| p.id.clone())
        .unwrap_or_else(|_| ProductId::new(key))
}

fn show(ctx: &Context, cart: &Cart) {
    if cart.is_memory_only() {
        ctx.output
            .warn("Cart could not be saved; changes will be lost when this command exits.");
    }

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: cart.lines(),
            promo_code: cart.promo_code(),
            totals: cart.totals(),
            memory_only: cart.is_memory_only(),
        });
        return;
    }

    ctx.output.header("Your Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [4, 24, 5, 10];
    ctx.output.table_row(&["ID", "ITEM", "QTY", "TOTAL"], &widths);
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                line.product_id().as_str(),
                &line.product.name,
                &format!("x{}", line.quantity),
                &line.line_total().display_compact(),
            ],
            &widths,
        );
    }
    println!();
    if !cart.promo_code().is_empty() {
        ctx.output.kv("Promo", cart.promo_code());
    }
    ctx.output.totals(&cart.totals());
    if ctx.output.is_verbose() {
        ctx.output
            .kv("Saved in", &ctx.storage_dir().display().to_string());
    }
}
