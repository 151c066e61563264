//! Cart line type.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product in the cart and how many of it.
///
/// Lines only exist with `quantity >= 1`; the reducer removes a line
/// instead of letting its quantity reach zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Copy of the product at the time it was added.
    pub product: Product,
    /// Number of units.
    pub quantity: u32,
}

impl CartLine {
    /// A new line holding one unit.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Id of the product on this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price per unit: the discounted price if present, else the base price.
    pub fn unit_price(&self) -> Money {
        self.product.effective_price()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_line_total_uses_discount() {
        let price = Money::from_major(250, Currency::INR);
        let product = Product::new("1", "Chicken Biryani", price, "1", "1")
            .with_discount(Money::from_major(220, Currency::INR));
        let mut line = CartLine::new(product);
        line.quantity = 3;
        assert_eq!(line.unit_price(), Money::from_major(220, Currency::INR));
        assert_eq!(line.line_total(), Money::from_major(660, Currency::INR));
    }

    #[test]
    fn test_serialized_shape() {
        let product = Product::new("2", "Veg Box", Money::from_major(150, Currency::INR), "2", "2");
        let value = serde_json::to_value(CartLine::new(product)).unwrap();
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["product"]["id"], "2");
    }
}
