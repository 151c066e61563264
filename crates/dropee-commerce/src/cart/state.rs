//! Cart state and its reducer.
//!
//! [`CartState::apply`] is the only way cart contents change. It performs no
//! I/O; the store persists the result afterwards.

use crate::cart::CartLine;
use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A mutation of the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(Product),
    /// Drop the line for a product.
    Remove(ProductId),
    /// Set a line's quantity. Values below 1 remove the line.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Empty the cart and reset the promo code.
    Clear,
    /// Replace the promo code verbatim.
    SetPromoCode(String),
}

/// Lines in insertion order plus the entered promo code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    promo_code: String,
}

/// Serialized form of [`CartState`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartSnapshot {
    /// Cart lines.
    pub items: Vec<CartLine>,
    /// Promo code, empty when none was entered.
    #[serde(default)]
    pub promo_code: String,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a snapshot.
    ///
    /// Zero-quantity lines are dropped and repeated product ids are merged,
    /// so a hand-edited snapshot cannot break the line invariants.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(snapshot.items.len());
        for line in snapshot.items {
            if line.quantity == 0 {
                continue;
            }
            match lines.iter_mut().find(|l| l.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }
        Self {
            lines,
            promo_code: snapshot.promo_code,
        }
    }

    /// Serializable copy of the state.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.lines.clone(),
            promo_code: self.promo_code.clone(),
        }
    }

    /// Apply one action.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => {
                match self.lines.iter_mut().find(|l| l.product.id == product.id) {
                    Some(line) => line.quantity = line.quantity.saturating_add(1),
                    None => self.lines.push(CartLine::new(product)),
                }
            }
            CartAction::Remove(product_id) => {
                self.lines.retain(|l| l.product.id != product_id);
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => {
                if quantity < 1 {
                    self.apply(CartAction::Remove(product_id));
                    return;
                }
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
                    line.quantity = quantity;
                }
            }
            CartAction::Clear => {
                self.lines.clear();
                self.promo_code.clear();
            }
            CartAction::SetPromoCode(code) => {
                self.promo_code = code;
            }
        }
    }

    /// Pure form of [`apply`](Self::apply).
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.apply(action);
        self
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Entered promo code, empty when none.
    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Quantity of a product, zero when absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Keep only lines matching `keep`.
    pub(crate) fn retain_lines(&mut self, keep: impl FnMut(&CartLine) -> bool) {
        self.lines.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, price: i64) -> Product {
        let price = Money::from_major(price, Currency::INR);
        Product::new(id, format!("Product {}", id), price, "1", "1")
    }

    #[test]
    fn test_add_same_product_increments() {
        let state = CartState::new()
            .reduce(CartAction::Add(product("a", 10)))
            .reduce(CartAction::Add(product("a", 10)));
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.quantity_of(&ProductId::new("a")), 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let state = CartState::new()
            .reduce(CartAction::Add(product("b", 10)))
            .reduce(CartAction::Add(product("a", 10)))
            .reduce(CartAction::Add(product("b", 10)));
        let ids: Vec<_> = state.lines().iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        for q in [0, -1, i64::MIN] {
            let state = CartState::new()
                .reduce(CartAction::Add(product("a", 10)))
                .reduce(CartAction::UpdateQuantity {
                    product_id: ProductId::new("a"),
                    quantity: q,
                });
            assert!(state.is_empty(), "quantity {} should remove the line", q);
        }
    }

    #[test]
    fn test_update_quantity_unknown_is_noop() {
        let before = CartState::new().reduce(CartAction::Add(product("a", 10)));
        let after = before.clone().reduce(CartAction::UpdateQuantity {
            product_id: ProductId::new("missing"),
            quantity: 5,
        });
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_quantity_clamps_to_u32() {
        let state = CartState::new()
            .reduce(CartAction::Add(product("a", 10)))
            .reduce(CartAction::UpdateQuantity {
                product_id: ProductId::new("a"),
                quantity: i64::MAX,
            });
        assert_eq!(state.quantity_of(&ProductId::new("a")), u32::MAX);
    }

    #[test]
    fn test_clear_resets_promo() {
        let state = CartState::new()
            .reduce(CartAction::Add(product("a", 10)))
            .reduce(CartAction::SetPromoCode("WELCOME10".to_string()))
            .reduce(CartAction::Clear);
        assert!(state.is_empty());
        assert_eq!(state.promo_code(), "");
    }

    #[test]
    fn test_from_snapshot_normalises() {
        let snapshot = CartSnapshot {
            items: vec![
                CartLine { product: product("a", 10), quantity: 2 },
                CartLine { product: product("b", 10), quantity: 0 },
                CartLine { product: product("a", 10), quantity: 3 },
            ],
            promo_code: "FLAT50".to_string(),
        };
        let state = CartState::from_snapshot(snapshot);
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.quantity_of(&ProductId::new("a")), 5);
        assert_eq!(state.promo_code(), "FLAT50");
    }
}
