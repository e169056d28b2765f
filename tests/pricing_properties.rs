//! Property tests for receipt pricing.

use proptest::{prelude::*, test_runner::TestCaseError};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};

use checkout::prelude::*;

const SKU: Sku = Sku::new(1);

fn catalog_with(
    unit: Unit,
    price_minor: i64,
    rule: PricingRule<'static>,
) -> Result<Catalog<'static>, TestCaseError> {
    let mut catalog = Catalog::new(USD);

    catalog.insert(
        "item",
        Product::with_rule(SKU, "Item", unit, Money::from_minor(price_minor, USD), rule),
    )?;

    Ok(catalog)
}

fn scan_all<'c>(
    catalog: &'c Catalog<'static>,
    quantities: &[Decimal],
) -> Result<Register<'c, 'static>, TestCaseError> {
    let mut register = Register::new(catalog);

    for quantity in quantities {
        register.add_item(SKU, *quantity)?;
    }

    Ok(register)
}

fn render(
    catalog: &Catalog<'static>,
    quantities: &[Decimal],
) -> Result<Receipt<'static>, TestCaseError> {
    Ok(scan_all(catalog, quantities)?.receipt()?)
}

proptest! {
    #[test]
    fn flat_items_total_their_line_prices(
        price_minor in 1i64..10_000,
        units in prop::collection::vec(1u32..20, 1..30),
    ) {
        let catalog = catalog_with(Unit::Each, price_minor, PricingRule::default())?;
        let quantities: Vec<Decimal> = units.iter().copied().map(Decimal::from).collect();
        let receipt = render(&catalog, &quantities)?;

        let expected: Decimal = quantities
            .iter()
            .map(|quantity| Decimal::new(price_minor, 2) * quantity)
            .sum();

        prop_assert_eq!(receipt.discount_count(), 0);
        prop_assert_eq!(*receipt.total().amount(), expected);
        prop_assert_eq!(receipt.lines().len(), quantities.len());
    }

    #[test]
    fn weighed_items_are_priced_exactly(
        price_minor in 1i64..10_000,
        hundredths in prop::collection::vec(1i64..1_000, 1..30),
    ) {
        let catalog = catalog_with(Unit::Lb, price_minor, PricingRule::default())?;
        let weights: Vec<Decimal> = hundredths.iter().map(|h| Decimal::new(*h, 2)).collect();
        let receipt = render(&catalog, &weights)?;

        let weight: Decimal = weights.iter().sum();

        prop_assert_eq!(*receipt.total().amount(), Decimal::new(price_minor, 2) * weight);
    }

    #[test]
    fn threshold_discount_never_over_subtracts(
        breakpoint in 1u32..8,
        discount_minor in 1i64..100,
        scans in 1usize..40,
    ) {
        let discount = Money::from_minor(discount_minor, USD);
        let rule = ThresholdMultipleDiscount::new(breakpoint, discount)?;
        let catalog = catalog_with(Unit::Each, 300, rule.into())?;
        let receipt = render(&catalog, &vec![Decimal::ONE; scans])?;

        let count = Decimal::from(scans);
        let step = Decimal::from(breakpoint);

        // Single-unit scans land on every multiple, so the last one reached is what is owed.
        let reached = count - count % step;
        let owed = Decimal::new(discount_minor, 2) * reached;

        prop_assert_eq!(Decimal::from(receipt.discount_count()), (count / step).floor());
        prop_assert_eq!(*receipt.subtotal().amount(), Decimal::from(3) * count);
        prop_assert_eq!(*receipt.total().amount(), Decimal::from(3) * count - owed);
    }

    #[test]
    fn bundle_refunds_free_units_once(
        buy in 1u32..5,
        free in 1u32..3,
        scans in 1usize..30,
    ) {
        let rule = BundleDiscount::new(buy, free)?;
        let catalog = catalog_with(Unit::Each, 400, rule.into())?;
        let receipt = render(&catalog, &vec![Decimal::ONE; scans])?;

        // The owed amount is the same at every completed bundle, so only the first one
        // changes the total. Later bundles print a zero discount line.
        let bundles = (Decimal::from(scans) / Decimal::from(buy + 1)).floor();
        let refunded = if bundles.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::from(4) * Decimal::from(free)
        };

        prop_assert_eq!(Decimal::from(receipt.discount_count()), bundles);
        prop_assert_eq!(
            *receipt.total().amount(),
            Decimal::from(4) * Decimal::from(scans) - refunded
        );
    }

    #[test]
    fn rendering_is_idempotent(units in prop::collection::vec(1u32..6, 1..20)) {
        let rule = ThresholdMultipleDiscount::new(4, Money::from_minor(50, USD))?;
        let catalog = catalog_with(Unit::Each, 300, rule.into())?;
        let quantities: Vec<Decimal> = units.iter().copied().map(Decimal::from).collect();

        let register = scan_all(&catalog, &quantities)?;

        prop_assert_eq!(register.print_receipt()?, register.print_receipt()?);
    }
}
