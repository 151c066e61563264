//! WhatsApp order message composition.
//!
//! Orders leave the storefront as a pre-filled chat message. The text uses
//! WhatsApp's `*bold*` markup.

use std::fmt::Write as _;

use crate::checkout::Order;

/// Store name shown in the message heading.
pub const DEFAULT_STORE_NAME: &str = "HashtagDropee";

/// Base URL of WhatsApp click-to-chat links.
const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Human-readable order text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage(String);

impl OrderMessage {
    /// Compose the message for an order.
    pub fn compose(store_name: &str, order: &Order) -> Self {
        let mut text = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(text, "*New Order - {}*", store_name);
        text.push('\n');

        text.push_str("*Customer Details:*\n");
        let _ = writeln!(text, "Name: {}", order.customer.name);
        let _ = writeln!(text, "Phone: {}", order.customer.phone);
        let _ = writeln!(text, "Address: {}", order.customer.address);
        text.push('\n');

        text.push_str("*Products:*\n");
        for item in &order.items {
            let _ = writeln!(
                text,
                "- {} (Qty: {}, {})",
                item.product_name,
                item.quantity,
                item.line_total.display_compact()
            );
        }
        text.push('\n');

        text.push_str("*Order Summary:*\n");
        let _ = writeln!(text, "Subtotal: {}", order.subtotal.display_compact());
        let _ = writeln!(text, "Delivery Fee: {}", order.delivery_fee.display_compact());
        if let Some(code) = &order.promo_code {
            let _ = writeln!(text, "Promo Applied: {}", code);
        }
        if order.promo_discount.is_positive() {
            let _ = writeln!(text, "Promo Discount: -{}", order.promo_discount.display_compact());
        }
        let _ = writeln!(text, "*Total Amount: {}*", order.total.display_compact());
        text.push('\n');

        text.push_str("*Notes:*\n");
        text.push_str(order.customer.instructions.as_deref().unwrap_or("None"));

        Self(text)
    }

    /// The message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Click-to-chat link that opens WhatsApp with this message typed in.
    pub fn whatsapp_link(&self, phone_number: &str) -> String {
        whatsapp_link(phone_number, &self.0)
    }
}

impl std::fmt::Display for OrderMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build `https://wa.me/<number>?text=<message>`.
///
/// Non-digits are stripped from the number, as wa.me expects.
pub fn whatsapp_link(phone_number: &str, message: &str) -> String {
    let number: String = phone_number.chars().filter(char::is_ascii_digit).collect();
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        number,
        encode_uri_component(message)
    )
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}
