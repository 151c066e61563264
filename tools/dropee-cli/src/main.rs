//! Dropee CLI - Drive a saved storefront cart from the terminal.
//!
//! Commands:
//! - `dropee catalog` - Browse and search products
//! - `dropee cart` - Show and change the cart
//! - `dropee checkout` - Place the order and print the WhatsApp link

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use commands::{CartArgs, CatalogArgs, CheckoutArgs};

/// Dropee CLI - Browse the catalog, build a cart and check out
#[derive(Parser)]
#[command(name = "dropee")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products and categories
    Catalog(CatalogArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Submit the cart as an order
    Checkout(CheckoutArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays parseable
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_quantity() {
        let cli = Cli::try_parse_from(["dropee", "cart", "set-qty", "1", "-2"]).unwrap();
        match cli.command {
            Commands::Cart(CartArgs {
                command: Some(commands::CartCommand::SetQty { product, quantity }),
            }) => {
                assert_eq!(product, "1");
                assert_eq!(quantity, -2);
            }
            _ => panic!("expected cart set-qty"),
        }
    }

    #[test]
    fn zero_add_quantity_is_rejected() {
        assert!(Cli::try_parse_from(["dropee", "cart", "add", "1", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["dropee", "cart", "add", "1", "-q", "3"]).is_ok());
    }

    #[test]
    fn parses_shop_listing() {
        let args = ["dropee", "catalog", "list", "--shop", "green-mart"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Catalog(CatalogArgs {
                command: Some(commands::CatalogCommand::List { shop, .. }),
            }) => assert_eq!(shop.as_deref(), Some("green-mart")),
            _ => panic!("expected catalog list"),
        }
        assert!(Cli::try_parse_from(["dropee", "catalog", "shops"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["dropee", "catalog", "search", "chicken", "--json"]).unwrap();
        assert!(cli.json);
        assert!(!cli.verbose);
    }
}
