//! Checkout command.

use anyhow::{Context as _, Result};
use dropee_commerce::prelude::*;
use serde::Serialize;

use super::CheckoutArgs;
use crate::context::{Cart, Context};

/// Submitted order as printed in JSON mode.
#[derive(Serialize)]
struct ReceiptView<'a> {
    order: &'a Order,
    message: &'a str,
    link: &'a str,
}

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let receipt = submit(args, ctx, &mut cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&ReceiptView {
            order: &receipt.order,
            message: receipt.message.as_str(),
            link: &receipt.link,
        });
        return Ok(());
    }

    ctx.output.success(&format!(
        "Order {} placed ({} items, {})",
        receipt.order.order_number,
        receipt.order.item_count(),
        receipt.order.total.display_compact()
    ));
    ctx.output.header("Message");
    println!("{}", receipt.message.as_str());
    ctx.output.header("Send via WhatsApp");
    println!("{}", receipt.link);
    Ok(())
}

/// Submit the cart. A `--promo` code only sticks if the order goes through.
fn submit(args: CheckoutArgs, ctx: &Context, cart: &mut Cart) -> Result<CheckoutReceipt> {
    let mut customer = CustomerDetails::new(args.name, args.phone, args.address);
    if let Some(instructions) = args.instructions {
        customer = customer.with_instructions(instructions);
    }

    let previous = cart.promo_code().to_string();
    if let Some(code) = &args.promo {
        cart.set_promo_code(code.trim());
    }

    let result = ctx.config.checkout_settings().submit(cart, customer);
    if result.is_err() && cart.promo_code() != previous {
        cart.set_promo_code(&previous);
    }
    result.context("Checkout failed")
}
