//! Output formatting for the CLI.

use console::style;
use dropee_commerce::cart::CartTotals;
use dropee_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Print the price breakdown of a cart.
    pub fn totals(&self, totals: &CartTotals) {
        if self.json {
            return;
        }
        self.kv("Items", &totals.total_items.to_string());
        self.kv("Subtotal", &totals.subtotal.display_compact());
        self.kv("Delivery", &totals.delivery_fee.display_compact());
        if totals.has_discount() {
            self.kv("Discount", &format!("-{}", totals.promo_discount.display_compact()));
        }
        println!(
            "  {}: {}",
            style("Total").bold(),
            style(totals.total.display_compact()).bold()
        );
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad columns to the given widths.
pub fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Price, followed by the original when discounted.
pub fn price_label(price: Money, discount_price: Option<Money>) -> String {
    match discount_price {
        Some(discounted) => format!(
            "{} {}",
            discounted.display_compact(),
            style(format!("(was {})", price.display_compact())).dim()
        ),
        None => price.display_compact(),
    }
}

/// Availability badge for a product.
pub fn availability_badge(available: bool) -> String {
    if available {
        style("in stock").green().to_string()
    } else {
        style("unavailable").red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropee_commerce::Currency;

    #[test]
    fn rows_are_padded_and_trimmed() {
        assert_eq!(format_row(&["1", "Biryani", "x2"], &[3, 10, 4]), "1    Biryani     x2");
        assert_eq!(format_row(&["a", ""], &[2, 5]), "a");
    }

    #[test]
    fn plain_price_label() {
        console::set_colors_enabled(false);
        let price = Money::from_major(150, Currency::INR);
        assert_eq!(price_label(price, None), "\u{20b9}150");
        let was = Money::from_major(250, Currency::INR);
        let now = Money::from_major(220, Currency::INR);
        assert_eq!(price_label(was, Some(now)), "\u{20b9}220 (was \u{20b9}250)");
    }
}
