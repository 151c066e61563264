//! Promo code resolution.
//!
//! The cart stores whatever code the customer typed. A [`PromoResolver`]
//! turns that code and the current subtotal into a discount amount when
//! totals are read. [`NoPromotion`] is the default and always yields zero.

use chrono::{Local, NaiveDate};

use crate::ids::PromotionId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maps a promo code and cart subtotal to a discount.
pub trait PromoResolver {
    /// Discount for `code` on an order with the given subtotal.
    ///
    /// Unknown or ineligible codes resolve to zero.
    fn resolve(&self, code: &str, subtotal: Money) -> Money;
}

/// Resolver that never discounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPromotion;

impl PromoResolver for NoPromotion {
    fn resolve(&self, _code: &str, subtotal: Money) -> Money {
        Money::zero(subtotal.currency)
    }
}

impl<F> PromoResolver for F
where
    F: Fn(&str, Money) -> Money,
{
    fn resolve(&self, code: &str, subtotal: Money) -> Money {
        self(code, subtotal)
    }
}

/// Value of a discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountValue {
    /// Percentage off (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off.
    Fixed(Money),
}

impl DiscountValue {
    /// Calculate the discount amount for a given subtotal.
    pub fn calculate(&self, subtotal: &Money) -> Money {
        match self {
            DiscountValue::Percentage(percent) => subtotal.percentage(*percent),
            DiscountValue::Fixed(amount) => {
                // Don't exceed subtotal
                Money::new(amount.amount_minor, subtotal.currency).min(*subtotal)
            }
        }
    }
}

/// A promo code and the rules for applying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Unique promotion identifier.
    #[serde(default = "PromotionId::generate")]
    pub id: PromotionId,
    /// Code customers type (matched case-insensitively).
    pub code: String,
    /// Display text.
    pub description: String,
    /// Discount applied when eligible.
    pub value: DiscountValue,
    /// Smallest subtotal the code applies to.
    #[serde(default)]
    pub min_order_value: Money,
    /// Upper bound on the discount (percentage codes).
    #[serde(default)]
    pub max_discount: Option<Money>,
    /// Maximum redemptions (None = unlimited).
    #[serde(default)]
    pub usage_limit: Option<u32>,
    /// Redemptions so far.
    #[serde(default)]
    pub used_count: u32,
    /// Whether the code is switched on.
    #[serde(default = "default_active")]
    pub active: bool,
    /// First day the code works.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Last day the code works.
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Promotion {
    /// A percentage-off code with no minimum.
    pub fn percentage(
        code: impl Into<String>,
        description: impl Into<String>,
        percent: f64,
    ) -> Self {
        Self::with_value(code, description, DiscountValue::Percentage(percent))
    }

    /// A fixed-amount-off code with no minimum.
    pub fn fixed(code: impl Into<String>, description: impl Into<String>, amount: Money) -> Self {
        Self::with_value(code, description, DiscountValue::Fixed(amount))
    }

    fn with_value(
        code: impl Into<String>,
        description: impl Into<String>,
        value: DiscountValue,
    ) -> Self {
        let currency = match &value {
            DiscountValue::Fixed(amount) => amount.currency,
            DiscountValue::Percentage(_) => Currency::default(),
        };
        Self {
            id: PromotionId::generate(),
            code: code.into(),
            description: description.into(),
            value,
            min_order_value: Money::zero(currency),
            max_discount: None,
            usage_limit: None,
            used_count: 0,
            active: true,
            valid_from: None,
            valid_until: None,
        }
    }

    /// Require a minimum subtotal.
    pub fn with_minimum_order(mut self, amount: Money) -> Self {
        self.min_order_value = amount;
        self
    }

    /// Cap the discount.
    pub fn with_max_discount(mut self, amount: Money) -> Self {
        self.max_discount = Some(amount);
        self
    }

    /// Limit total redemptions.
    pub fn with_usage_limit(mut self, limit: u32, used: u32) -> Self {
        self.usage_limit = Some(limit);
        self.used_count = used;
        self
    }

    /// Restrict to an inclusive date window.
    pub fn valid_between(mut self, from: NaiveDate, until: NaiveDate) -> Self {
        self.valid_from = Some(from);
        self.valid_until = Some(until);
        self
    }

    /// Switch the code off.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check if the usage limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.used_count >= limit)
    }

    /// Check active flag, date window and usage limit.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        if !self.active || self.is_exhausted() {
            return false;
        }
        if self.valid_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.valid_until.is_some_and(|until| date > until) {
            return false;
        }
        true
    }

    /// Discount this code gives on `subtotal` on `date`; zero when ineligible.
    pub fn discount_for(&self, subtotal: Money, date: NaiveDate) -> Money {
        let zero = Money::zero(subtotal.currency);
        if !self.is_valid_on(date) || subtotal.amount_minor < self.min_order_value.amount_minor {
            return zero;
        }
        let mut discount = self.value.calculate(&subtotal);
        if let Some(max) = self.max_discount {
            discount = discount.min(Money::new(max.amount_minor, subtotal.currency));
        }
        Money::new(discount.amount_minor.max(0), subtotal.currency).min(subtotal)
    }
}

/// A set of promotions looked up by code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionBook {
    promotions: Vec<Promotion>,
    as_of: Option<NaiveDate>,
}

impl PromotionBook {
    /// Book over the given promotions, evaluated against today's date.
    pub fn new(promotions: Vec<Promotion>) -> Self {
        Self {
            promotions,
            as_of: None,
        }
    }

    /// The storefront's sample promotions.
    pub fn demo() -> Self {
        let inr = |major| Money::from_major(major, Currency::INR);
        let date = |m, d| NaiveDate::from_ymd_opt(2026, m, d).unwrap_or_default();
        Self::new(vec![
            Promotion::percentage("WELCOME10", "10% off on your first order", 10.0)
                .with_minimum_order(inr(200))
                .with_max_discount(inr(100))
                .with_usage_limit(1000, 234)
                .valid_between(date(1, 1), date(3, 31)),
            Promotion::fixed("FLAT50", "Flat \u{20b9}50 off on orders above \u{20b9}300", inr(50))
                .with_minimum_order(inr(300))
                .with_usage_limit(500, 89)
                .valid_between(date(2, 1), date(2, 28)),
            Promotion::percentage("BIGSAVE20", "20% off on orders above \u{20b9}1000", 20.0)
                .with_minimum_order(inr(1000))
                .with_max_discount(inr(300))
                .with_usage_limit(200, 45)
                .valid_between(date(1, 15), date(2, 15))
                .inactive(),
        ])
    }

    /// Parse a JSON list of promotions.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Evaluate validity windows against a fixed date instead of today.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Look up a promotion by code, ignoring case and surrounding whitespace.
    pub fn find(&self, code: &str) -> Option<&Promotion> {
        let code = code.trim();
        self.promotions
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code))
    }

    /// Promotions usable today.
    pub fn active(&self) -> impl Iterator<Item = &Promotion> + '_ {
        let today = self.today();
        self.promotions.iter().filter(move |p| p.is_valid_on(today))
    }

    /// All promotions.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl PromoResolver for PromotionBook {
    fn resolve(&self, code: &str, subtotal: Money) -> Money {
        match self.find(code) {
            Some(promotion) => promotion.discount_for(subtotal, self.today()),
            None => Money::zero(subtotal.currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(major: i64) -> Money {
        Money::from_major(major, Currency::INR)
    }

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_no_promotion_is_zero() {
        assert!(NoPromotion.resolve("WELCOME10", inr(1000)).is_zero());
    }

    #[test]
    fn test_percentage_with_cap() {
        let book = PromotionBook::demo().as_of(day(2, 10));
        assert_eq!(book.resolve("WELCOME10", inr(520)), inr(52));
        assert_eq!(book.resolve("welcome10", inr(5000)), inr(100));
    }

    #[test]
    fn test_minimum_order() {
        let book = PromotionBook::demo().as_of(day(2, 10));
        assert!(book.resolve("WELCOME10", inr(199)).is_zero());
        assert!(book.resolve("FLAT50", inr(299)).is_zero());
        assert_eq!(book.resolve("FLAT50", inr(300)), inr(50));
    }

    #[test]
    fn test_date_window() {
        let book = PromotionBook::demo().as_of(day(3, 1));
        assert!(book.resolve("FLAT50", inr(500)).is_zero());
        assert_eq!(book.resolve("WELCOME10", inr(500)), inr(50));
    }

    #[test]
    fn test_inactive_code() {
        let book = PromotionBook::demo().as_of(day(2, 1));
        assert!(book.resolve("BIGSAVE20", inr(2000)).is_zero());
        assert_eq!(book.active().count(), 2);
    }

    #[test]
    fn test_usage_limit() {
        let promo = Promotion::fixed("ONCE", "One use", inr(10)).with_usage_limit(1, 1);
        assert!(promo.is_exhausted());
        assert!(promo.discount_for(inr(100), day(1, 1)).is_zero());
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let promo = Promotion::fixed("BIG", "Big", inr(500));
        assert_eq!(promo.discount_for(inr(120), day(1, 1)), inr(120));
    }

    #[test]
    fn test_unknown_code() {
        let book = PromotionBook::demo();
        assert!(book.find("NOPE").is_none());
        assert!(book.resolve("NOPE", inr(1000)).is_zero());
    }

    #[test]
    fn test_from_minimal_json() {
        let book = PromotionBook::from_json(
            r#"[{
                "code": "MONSOON",
                "description": "Rainy day",
                "value": {"type": "percentage", "value": 5.0}
            }]"#,
        )
        .unwrap();
        let promo = book.find("monsoon").unwrap();
        assert!(promo.active);
        assert!(promo.min_order_value.is_zero());
        assert_eq!(book.resolve("MONSOON", inr(400)), inr(20));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::to_string(PromotionBook::demo().promotions()).unwrap();
        let book = PromotionBook::from_json(&json).unwrap();
        assert_eq!(book.promotions().len(), 3);
        assert!(book.find(" flat50 ").is_some());
    }
}
