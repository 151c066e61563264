//! Checkout module.
//!
//! Customer details, order records, the WhatsApp order message, and the
//! submit step that turns a cart into an order.

mod customer;
mod flow;
mod message;
mod order;

pub use customer::CustomerDetails;
pub use flow::{Checkout, CheckoutReceipt, DEFAULT_WHATSAPP_NUMBER};
pub use message::{encode_uri_component, whatsapp_link, OrderMessage, DEFAULT_STORE_NAME};
pub use order::{Order, OrderItem, OrderStatus};
