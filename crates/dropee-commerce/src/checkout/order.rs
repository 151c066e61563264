//! Order types.

use chrono::{DateTime, Utc};

use crate::cart::{CartLine, CartTotals};
use crate::checkout::CustomerDetails;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order sent, awaiting the shop.
    #[default]
    Pending,
    /// Shop accepted the order.
    Confirmed,
    /// Being prepared.
    Preparing,
    /// With a rider.
    OutForDelivery,
    /// Delivered.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// A product line frozen into an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Quantity.
    pub quantity: u32,
    /// Effective unit price at order time.
    pub unit_price: Money,
    /// unit_price * quantity.
    pub line_total: Money,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(),
            line_total: line.line_total(),
        }
    }
}

/// A submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Who ordered.
    pub customer: CustomerDetails,
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Delivery fee charged.
    pub delivery_fee: Money,
    /// Promo code entered, if any.
    pub promo_code: Option<String>,
    /// Discount from the promo code.
    pub promo_discount: Money,
    /// Amount due.
    pub total: Money,
    /// Order status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Freeze the cart contents into a pending order.
    pub fn from_cart(
        customer: CustomerDetails,
        lines: &[CartLine],
        totals: &CartTotals,
        promo_code: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            order_number: format!("ORD-{}", created_at.format("%Y%m%d-%H%M%S")),
            customer,
            items: lines.iter().map(OrderItem::from).collect(),
            subtotal: totals.subtotal,
            delivery_fee: totals.delivery_fee,
            promo_code: (!promo_code.is_empty()).then(|| promo_code.to_string()),
            promo_discount: totals.promo_discount,
            total: totals.total,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// Total number of units.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartAction, CartState, NoPromotion, PricingConfig};
    use crate::catalog::Product;
    use crate::money::Currency;
    use chrono::TimeZone;

    #[test]
    fn test_from_cart() {
        let inr = |m| Money::from_major(m, Currency::INR);
        let biryani =
            Product::new("1", "Chicken Biryani", inr(250), "1", "1").with_discount(inr(220));
        let butter_chicken = Product::new("4", "Butter Chicken", inr(280), "1", "1");
        let state = CartState::new()
            .reduce(CartAction::Add(biryani.clone()))
            .reduce(CartAction::Add(butter_chicken))
            .reduce(CartAction::Add(biryani));
        let totals = CartTotals::compute(&state, &PricingConfig::default(), &NoPromotion);
        let at = Utc.with_ymd_and_hms(2026, 2, 4, 10, 30, 0).unwrap();

        let order = Order::from_cart(
            CustomerDetails::new("Rahul Singh", "+91 9876543210", "Imphal"),
            state.lines(),
            &totals,
            "",
            at,
        );

        assert_eq!(order.order_number, "ORD-20260204-103000");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].line_total, inr(440));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.subtotal, inr(720));
        assert_eq!(order.total, inr(760));
        assert_eq!(order.promo_code, None);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out_for_delivery\"");
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
