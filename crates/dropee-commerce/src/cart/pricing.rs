//! Cart pricing calculations.

use crate::cart::{CartState, PromoResolver};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat delivery fee in major units charged on any non-empty order.
pub const DEFAULT_DELIVERY_FEE: i64 = 40;

/// Store-wide pricing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency the cart prices in.
    pub currency: Currency,
    /// Flat fee added whenever the subtotal is positive.
    pub delivery_fee: Money,
}

impl PricingConfig {
    /// Settings for a currency with the given flat fee in major units.
    pub fn new(currency: Currency, delivery_fee_major: i64) -> Self {
        Self {
            currency,
            delivery_fee: Money::from_major(delivery_fee_major, currency),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(Currency::INR, DEFAULT_DELIVERY_FEE)
    }
}

/// Derived totals of a cart. Computed fresh from state on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub total_items: u64,
    /// Sum of effective unit price times quantity.
    pub subtotal: Money,
    /// Flat fee when subtotal is positive, else zero.
    pub delivery_fee: Money,
    /// Discount resolved from the promo code.
    pub promo_discount: Money,
    /// subtotal + delivery_fee - promo_discount.
    pub total: Money,
}

impl CartTotals {
    /// Price a cart.
    ///
    /// The resolved discount is clamped to `0..=subtotal`.
    pub fn compute<P>(state: &CartState, config: &PricingConfig, promotions: &P) -> Self
    where
        P: PromoResolver + ?Sized,
    {
        let zero = Money::zero(config.currency);

        let subtotal = state
            .lines()
            .iter()
            .fold(zero, |acc, line| acc.saturating_add(&line.line_total()));

        let delivery_fee = if subtotal.is_positive() {
            Money::new(config.delivery_fee.amount_minor, config.currency)
        } else {
            zero
        };

        let promo_discount = if state.promo_code().is_empty() || !subtotal.is_positive() {
            zero
        } else {
            let resolved = promotions.resolve(state.promo_code(), subtotal);
            Money::new(resolved.amount_minor.max(0), config.currency).min(subtotal)
        };

        let total = subtotal
            .saturating_add(&delivery_fee)
            .saturating_sub(&promo_discount);

        Self {
            total_items: state.total_items(),
            subtotal,
            delivery_fee,
            promo_discount,
            total,
        }
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.promo_discount.is_positive()
    }
}
