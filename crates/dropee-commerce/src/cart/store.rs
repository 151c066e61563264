//! The cart store: state, pricing and persistence behind one API.

use dropee_cache::Storage;
use tracing::{debug, warn};

use crate::cart::{
    CartAction, CartLine, CartPersistence, CartState, CartTotals, NoPromotion, PersistenceMode,
    PricingConfig, PromoResolver, DEFAULT_CART_KEY,
};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// The session's cart.
///
/// Construct one at start-up and hand `&mut` to whatever needs to change it.
/// Every mutation runs the reducer and then writes the full snapshot to
/// storage. Totals are computed on each read.
///
/// A failed write leaves the in-memory change in place and switches the
/// store to memory-only mode (see [`is_memory_only`](Self::is_memory_only)).
#[derive(Debug)]
pub struct CartStore<S, P = NoPromotion> {
    state: CartState,
    persistence: CartPersistence<S>,
    pricing: PricingConfig,
    promotions: P,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart saved under the default key.
    pub fn open(storage: S, pricing: PricingConfig) -> Self {
        Self::open_with_key(storage, DEFAULT_CART_KEY, pricing)
    }

    /// Open the cart saved under `key`.
    pub fn open_with_key(storage: S, key: impl Into<String>, pricing: PricingConfig) -> Self {
        let mut persistence = CartPersistence::new(storage, key);
        let mut state = persistence
            .load()
            .map(CartState::from_snapshot)
            .unwrap_or_default();

        let before = state.lines().len();
        state.retain_lines(|line| line.unit_price().currency == pricing.currency);
        if state.lines().len() != before {
            warn!(
                dropped = before - state.lines().len(),
                currency = %pricing.currency,
                "dropped saved cart lines priced in another currency"
            );
        }

        debug!(
            lines = state.lines().len(),
            mode = ?persistence.mode(),
            "cart store opened"
        );

        Self {
            state,
            persistence,
            pricing,
            promotions: NoPromotion,
        }
    }
}

impl<S: Storage, P: PromoResolver> CartStore<S, P> {
    /// Swap in a promo resolver.
    pub fn with_promotions<Q: PromoResolver>(self, promotions: Q) -> CartStore<S, Q> {
        CartStore {
            state: self.state,
            persistence: self.persistence,
            pricing: self.pricing,
            promotions,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Products priced in a currency other than the store's are ignored.
    pub fn add_item(&mut self, product: &Product) {
        if product.effective_price().currency != self.pricing.currency {
            warn!(
                product_id = %product.id,
                expected = %self.pricing.currency,
                got = %product.effective_price().currency,
                "ignoring product priced in another currency"
            );
            return;
        }
        debug!(product_id = %product.id, "add item");
        self.dispatch(CartAction::Add(product.clone()));
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        debug!(product_id = %product_id, "remove item");
        self.dispatch(CartAction::Remove(product_id.clone()));
    }

    /// Set a line's quantity; values below 1 remove the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        debug!(product_id = %product_id, quantity, "update quantity");
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Empty the cart and reset the promo code.
    pub fn clear_cart(&mut self) {
        debug!("clear cart");
        self.dispatch(CartAction::Clear);
    }

    /// Store a promo code verbatim. It is not validated here.
    pub fn set_promo_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        debug!(code = %code, "set promo code");
        self.dispatch(CartAction::SetPromoCode(code));
    }

    fn dispatch(&mut self, action: CartAction) {
        self.state.apply(action);
        self.persistence.save(&self.state.snapshot());
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// Entered promo code, empty when none.
    pub fn promo_code(&self) -> &str {
        self.state.promo_code()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// All derived totals at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.state, &self.pricing, &self.promotions)
    }

    /// Sum of line quantities.
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// Sum of effective unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.totals().subtotal
    }

    /// Flat delivery fee, zero for an empty cart.
    pub fn delivery_fee(&self) -> Money {
        self.totals().delivery_fee
    }

    /// Discount resolved from the promo code.
    pub fn promo_discount(&self) -> Money {
        self.totals().promo_discount
    }

    /// subtotal + delivery fee - promo discount.
    pub fn total(&self) -> Money {
        self.totals().total
    }

    /// Pricing settings in use.
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Promo resolver in use.
    pub fn promotions(&self) -> &P {
        &self.promotions
    }

    /// Whether writes still reach storage.
    pub fn persistence_mode(&self) -> PersistenceMode {
        self.persistence.mode()
    }

    /// True once storage has failed and the cart lives only in memory.
    pub fn is_memory_only(&self) -> bool {
        self.persistence.is_memory_only()
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use dropee_cache::MemoryStorage;

    fn inr(major: i64) -> Money {
        Money::from_major(major, Currency::INR)
    }

    fn biryani() -> Product {
        Product::new("1", "Chicken Biryani", inr(250), "1", "1").with_discount(inr(220))
    }

    fn veg_box() -> Product {
        Product::new("2", "Fresh Vegetables Box", inr(150), "2", "2")
    }

    #[test]
    fn test_reference_scenario() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&biryani());
        cart.add_item(&veg_box());
        cart.add_item(&veg_box());

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), inr(520));
        assert_eq!(cart.delivery_fee(), inr(40));
        assert_eq!(cart.total(), inr(560));
    }

    #[test]
    fn test_add_then_zero_quantity_empties() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&biryani());
        cart.update_quantity(&ProductId::new("1"), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_add_twice_one_line() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&biryani());
        cart.add_item(&biryani());
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_unavailable_product_can_be_added() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&veg_box().unavailable());
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_foreign_currency_product_ignored() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        let usd = Product::new("9", "Import", Money::from_major(5, Currency::USD), "1", "1");
        cart.add_item(&usd);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&biryani());
        let raw = cart.storage().read(DEFAULT_CART_KEY).unwrap().unwrap();
        assert!(raw.contains("Chicken Biryani"));

        cart.set_promo_code("WELCOME10");
        let raw = cart.storage().read(DEFAULT_CART_KEY).unwrap().unwrap();
        assert!(raw.contains("WELCOME10"));

        cart.clear_cart();
        let raw = cart.storage().read(DEFAULT_CART_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"items":[],"promo_code":""}"#);
    }

    #[test]
    fn test_promo_code_default_resolver_gives_zero() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default());
        cart.add_item(&biryani());
        cart.set_promo_code("WELCOME10");
        assert_eq!(cart.promo_code(), "WELCOME10");
        assert!(cart.promo_discount().is_zero());
        assert_eq!(cart.total(), inr(260));
    }

    #[test]
    fn test_with_promotions_resolves_discount() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default())
            .with_promotions(|code: &str, subtotal: Money| {
                if code == "TEN" {
                    subtotal.percentage(10.0)
                } else {
                    Money::zero(subtotal.currency)
                }
            });
        cart.add_item(&biryani());
        cart.add_item(&veg_box());
        cart.add_item(&veg_box());
        cart.set_promo_code("TEN");
        assert_eq!(cart.promo_discount(), inr(52));
        assert_eq!(cart.total(), inr(508));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = CartStore::open(MemoryStorage::new(), PricingConfig::default())
            .with_promotions(|_: &str, _: Money| inr(30));
        cart.add_item(&biryani());
        cart.set_promo_code("ANY");
        assert_eq!(cart.promo_discount(), inr(30));

        cart.clear_cart();
        let totals = cart.totals();
        assert_eq!(totals.total_items, 0);
        assert!(totals.subtotal.is_zero());
        assert!(totals.delivery_fee.is_zero());
        assert!(totals.promo_discount.is_zero());
        assert!(totals.total.is_zero());
        assert_eq!(cart.promo_code(), "");
    }
}
