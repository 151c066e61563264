//! Property tests for cart reducer and totals.

use std::collections::HashMap;

use dropee_cache::MemoryStorage;
use dropee_commerce::prelude::*;
use proptest::prelude::*;

fn inr(major: i64) -> Money {
    Money::from_major(major, Currency::INR)
}

fn product(index: u8) -> Product {
    let base = 50 + i64::from(index) * 35;
    let product = Product::new(
        format!("p{}", index),
        format!("Product {}", index),
        inr(base),
        "1",
        "1",
    );
    if index % 2 == 0 {
        product.with_discount(inr(base - 10))
    } else {
        product
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
    Update(u8, i64),
    Promo(String),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..6).prop_map(Op::Add),
        1 => (0u8..6).prop_map(Op::Remove),
        2 => (0u8..6, -3i64..8).prop_map(|(p, q)| Op::Update(p, q)),
        1 => "[A-Z0-9]{0,8}".prop_map(Op::Promo),
        1 => Just(Op::Clear),
    ]
}

fn run<P: PromoResolver>(cart: &mut CartStore<&MemoryStorage, P>, op: &Op) {
    match op {
        Op::Add(p) => cart.add_item(&product(*p)),
        Op::Remove(p) => cart.remove_item(&product(*p).id),
        Op::Update(p, q) => cart.update_quantity(&product(*p).id, *q),
        Op::Promo(code) => cart.set_promo_code(code.clone()),
        Op::Clear => cart.clear_cart(),
    }
}

fn assert_consistent<P: PromoResolver>(cart: &CartStore<&MemoryStorage, P>) {
    let mut seen = std::collections::HashSet::new();
    for line in cart.lines() {
        assert!(line.quantity >= 1, "zero-quantity line survived");
        assert!(seen.insert(line.product.id.clone()), "duplicate line");
    }

    let expected_subtotal: i64 = cart
        .lines()
        .iter()
        .map(|l| l.product.effective_price().amount_minor * i64::from(l.quantity))
        .sum();
    let totals = cart.totals();
    assert_eq!(totals.subtotal.amount_minor, expected_subtotal);
    assert_eq!(
        totals.total_items,
        cart.lines().iter().map(|l| u64::from(l.quantity)).sum::<u64>()
    );
    if expected_subtotal == 0 {
        assert!(totals.delivery_fee.is_zero());
    } else {
        assert_eq!(totals.delivery_fee, inr(40));
    }
    assert_eq!(
        totals.total.amount_minor,
        totals.subtotal.amount_minor + totals.delivery_fee.amount_minor
            - totals.promo_discount.amount_minor
    );
    assert!(!totals.total.is_negative());
}

proptest! {
    #[test]
    fn repeated_adds_make_one_line(n in 1usize..40) {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage, PricingConfig::default());
        for _ in 0..n {
            cart.add_item(&product(3));
        }
        prop_assert_eq!(cart.lines().len(), 1);
        prop_assert_eq!(cart.lines()[0].quantity as usize, n);
    }

    #[test]
    fn non_positive_update_equals_remove(
        ops in prop::collection::vec(op(), 0..20),
        target in 0u8..8,
        q in -5i64..=0,
    ) {
        let left_storage = MemoryStorage::new();
        let right_storage = MemoryStorage::new();
        let mut left = CartStore::open(&left_storage, PricingConfig::default());
        let mut right = CartStore::open(&right_storage, PricingConfig::default());
        for op in &ops {
            run(&mut left, op);
            run(&mut right, op);
        }

        left.update_quantity(&product(target).id, q);
        right.remove_item(&product(target).id);

        prop_assert_eq!(left.state(), right.state());
    }

    #[test]
    fn totals_never_go_stale(ops in prop::collection::vec(op(), 0..40)) {
        let storage = MemoryStorage::new();
        let book = PromotionBook::new(vec![
            Promotion::percentage("TEN", "10% off", 10.0).with_max_discount(inr(100)),
            Promotion::fixed("FLAT50", "50 off", inr(50)).with_minimum_order(inr(300)),
        ]);
        let mut cart = CartStore::open(&storage, PricingConfig::default()).with_promotions(book);
        for op in &ops {
            run(&mut cart, op);
            assert_consistent(&cart);
        }
    }

    #[test]
    fn snapshot_roundtrip_preserves_quantities(ops in prop::collection::vec(op(), 0..30)) {
        let storage = MemoryStorage::new();
        let before: HashMap<ProductId, u32> = {
            let mut cart = CartStore::open(&storage, PricingConfig::default());
            for op in &ops {
                run(&mut cart, op);
            }
            cart.lines().iter().map(|l| (l.product.id.clone(), l.quantity)).collect()
        };

        let reopened = CartStore::open(&storage, PricingConfig::default());
        let after: HashMap<ProductId, u32> = reopened
            .lines()
            .iter()
            .map(|l| (l.product.id.clone(), l.quantity))
            .collect();
        prop_assert_eq!(before, after);
    }
}

#[test]
fn clear_zeroes_every_total() {
    let storage = MemoryStorage::new();
    let mut cart = CartStore::open(&storage, PricingConfig::default());
    for p in 0..4 {
        cart.add_item(&product(p));
    }
    cart.set_promo_code("TEN");
    cart.clear_cart();

    assert_eq!(cart.total_items(), 0);
    assert!(cart.subtotal().is_zero());
    assert!(cart.delivery_fee().is_zero());
    assert!(cart.total().is_zero());
    assert_eq!(cart.promo_code(), "");
}
