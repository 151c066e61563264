//! Catalog, cart and checkout logic for the Dropee storefront.
//!
//! - **Catalog**: products, categories, filtering and search
//! - **Cart**: line reducer, pricing, promo resolution, persisted [`CartStore`](cart::CartStore)
//! - **Checkout**: customer details, orders, WhatsApp order messages
//!
//! # Example
//!
//! ```rust
//! use dropee_cache::MemoryStorage;
//! use dropee_commerce::prelude::*;
//!
//! let catalog = Catalog::demo();
//! let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
//!
//! cart.add_item(catalog.get(&ProductId::new("1")).unwrap());
//! cart.add_item(catalog.get(&ProductId::new("2")).unwrap());
//! cart.add_item(catalog.get(&ProductId::new("2")).unwrap());
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.display_compact(), "\u{20b9}520");
//! assert_eq!(totals.total.display_compact(), "\u{20b9}560");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Filter, Product, Shop};

    // Cart
    pub use crate::cart::{
        CartAction, CartLine, CartSnapshot, CartState, CartStore, CartTotals, NoPromotion,
        PricingConfig, PromoResolver, Promotion, PromotionBook,
    };

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutReceipt, CustomerDetails, Order, OrderItem, OrderMessage, OrderStatus,
    };
}
