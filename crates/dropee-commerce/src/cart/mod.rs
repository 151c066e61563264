//! Shopping cart module.
//!
//! Contains the cart line and state types, the pure reducer, pricing,
//! promo resolution, persistence, and the [`CartStore`] that ties them
//! together.

mod line;
mod persistence;
mod pricing;
mod promo;
mod state;
mod store;

pub use line::CartLine;
pub use persistence::{CartPersistence, PersistenceMode, DEFAULT_CART_KEY};
pub use pricing::{CartTotals, PricingConfig, DEFAULT_DELIVERY_FEE};
pub use promo::{DiscountValue, NoPromotion, PromoResolver, Promotion, PromotionBook};
pub use state::{CartAction, CartSnapshot, CartState};
pub use store::CartStore;
