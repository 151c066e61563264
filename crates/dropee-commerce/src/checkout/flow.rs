//! Order submission.

use chrono::Utc;
use dropee_cache::Storage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{CartStore, PromoResolver};
use crate::checkout::{CustomerDetails, Order, OrderMessage, DEFAULT_STORE_NAME};
use crate::CommerceError;

/// Number orders are sent to until one is configured.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919000000000";

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    /// Name in the message heading.
    pub store_name: String,
    /// WhatsApp number receiving orders.
    pub whatsapp_number: String,
}

impl Default for Checkout {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
        }
    }
}

/// Everything produced by a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The order record.
    pub order: Order,
    /// Message text.
    pub message: OrderMessage,
    /// Click-to-chat link carrying the message.
    pub link: String,
}

impl Checkout {
    /// Settings for a given store name and number.
    pub fn new(store_name: impl Into<String>, whatsapp_number: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            whatsapp_number: whatsapp_number.into(),
        }
    }

    /// Turn the cart into an order and empty it.
    ///
    /// Fails without touching the cart if it is empty or the details are
    /// incomplete. Once the order is built the cart is cleared; handing the
    /// link to the messaging app is the caller's job and its outcome is not
    /// reported back.
    pub fn submit<S, P>(
        &self,
        cart: &mut CartStore<S, P>,
        customer: CustomerDetails,
    ) -> Result<CheckoutReceipt, CommerceError>
    where
        S: Storage,
        P: PromoResolver,
    {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        customer.validate()?;

        let totals = cart.totals();
        let order =
            Order::from_cart(customer, cart.lines(), &totals, cart.promo_code(), Utc::now());
        let message = OrderMessage::compose(&self.store_name, &order);
        let link = message.whatsapp_link(&self.whatsapp_number);

        info!(
            order_number = %order.order_number,
            items = order.item_count(),
            total = %order.total,
            "order submitted"
        );
        cart.clear_cart();

        Ok(CheckoutReceipt {
            order,
            message,
            link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PricingConfig;
    use crate::catalog::Catalog;
    use crate::ids::ProductId;
    use dropee_cache::MemoryStorage;

    fn details() -> CustomerDetails {
        CustomerDetails::new("Rahul Singh", "+91 9876543210", "Imphal")
    }

    #[test]
    fn test_submit_clears_cart() {
        let catalog = Catalog::demo();
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(catalog.get(&ProductId::new("1")).unwrap());
        cart.set_promo_code("WELCOME10");

        let receipt = Checkout::default().submit(&mut cart, details()).unwrap();

        assert_eq!(receipt.order.items.len(), 1);
        assert_eq!(receipt.order.promo_code.as_deref(), Some("WELCOME10"));
        assert!(receipt
            .link
            .starts_with("https://wa.me/919000000000?text=*New%20Order%20-%20HashtagDropee*"));
        assert!(cart.is_empty());
        assert_eq!(cart.promo_code(), "");
    }

    #[test]
    fn test_submit_empty_cart_fails() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        let err = Checkout::default().submit(&mut cart, details()).unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }

    #[test]
    fn test_invalid_details_keep_cart() {
        let catalog = Catalog::demo();
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(catalog.get(&ProductId::new("2")).unwrap());

        let err = Checkout::default()
            .submit(&mut cart, CustomerDetails::new("", "1", "x"))
            .unwrap_err();
        assert!(matches!(err, CommerceError::CheckoutIncomplete(_)));
        assert_eq!(cart.total_items(), 1);
    }
}
