//! Receipt
//!
//! Replays a ledger against a catalog. Each scan is priced by its product's rule and added to the
//! running total. After every scan the product's cumulative quantity is checked against the rule;
//! when a discount is owed, only the part not yet charged is subtracted. The per-product state
//! lives for a single render, so rendering the same ledger twice gives the same receipt.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    catalog::{Catalog, CatalogError},
    ledger::Ledger,
    pricing::PricingError,
    products::Sku,
};

/// Separator printed between the lines and the total.
pub const SEPARATOR: &str = "------------";

/// Errors that can occur when building a receipt.
#[derive(Debug, Error, PartialEq)]
pub enum ReceiptError {
    /// A scanned product is missing from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A pricing rule failed to price a line.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single printed line, before the separator.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptLine<'a> {
    /// A scanned item at its full price.
    Item {
        /// Scanned product
        sku: Sku,

        /// Product name
        name: String,

        /// Price of this scan
        price: Money<'a, Currency>,
    },

    /// Discount triggered by the scan printed immediately above.
    Discount {
        /// Product that earned the discount
        sku: Sku,

        /// Amount subtracted from the total
        amount: Money<'a, Currency>,
    },
}

impl fmt::Display for ReceiptLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptLine::Item { name, price, .. } => write!(f, "{name}  ${}", Amount(price)),
            ReceiptLine::Discount { amount, .. } => write!(f, "* Discount  -${}", Amount(amount)),
        }
    }
}

/// Running figures for one product during a render.
struct ProductTally<'a> {
    quantity: Decimal,
    charged: Money<'a, Currency>,
}

/// Final receipt for a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt<'a> {
    /// Item and discount lines in scan order
    lines: Vec<ReceiptLine<'a>>,

    /// Total of every scan at full price
    subtotal: Money<'a, Currency>,

    /// Amount due after discounts
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Price every scan in `ledger` against `catalog`.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::Catalog`]: a scanned SKU is not in the catalog. No receipt is produced.
    /// - [`ReceiptError::Pricing`]: a price or discount overflowed.
    /// - [`ReceiptError::Money`]: money arithmetic failed.
    pub fn render(ledger: &Ledger, catalog: &Catalog<'a>) -> Result<Self, ReceiptError> {
        let zero = Money::from_minor(0, catalog.currency());

        let mut lines = Vec::with_capacity(ledger.len());
        let mut tallies: FxHashMap<Sku, ProductTally<'a>> = FxHashMap::default();
        let mut subtotal = zero;
        let mut total = zero;

        for event in ledger.iter() {
            let product = catalog.lookup(event.sku())?;
            let price = product.rule.price_for(&product.price, event.quantity())?;

            subtotal = subtotal.add(price)?;
            total = total.add(price)?;

            trace!(sku = %product.sku, quantity = %event.quantity(), %price, "priced scan");

            lines.push(ReceiptLine::Item {
                sku: product.sku,
                name: product.name.clone(),
                price,
            });

            let tally = tallies.entry(product.sku).or_insert(ProductTally {
                quantity: Decimal::ZERO,
                charged: zero,
            });

            tally.quantity = tally
                .quantity
                .checked_add(event.quantity())
                .ok_or(PricingError::Overflow)?;

            let Some(owed) = product.rule.discount_owed(&product.price, tally.quantity)? else {
                continue;
            };

            let delta = owed.sub(tally.charged)?;
            tally.charged = owed;

            debug!(
                sku = %product.sku,
                cumulative = %tally.quantity,
                %owed,
                %delta,
                "applied discount"
            );

            total = total.sub(delta)?;

            lines.push(ReceiptLine::Discount {
                sku: product.sku,
                amount: delta,
            });
        }

        Ok(Receipt {
            lines,
            subtotal,
            total,
        })
    }

    /// Item and discount lines in scan order.
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Total cost before any discounts
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Amount due after discounts
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Sum of all discounts on the receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Number of discount lines.
    pub fn discount_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, ReceiptLine::Discount { .. }))
            .count()
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }

        writeln!(f, "{SEPARATOR}")?;
        write!(f, "Total  ${}", Amount(&self.total))
    }
}

/// Plain two-decimal rendering of a money amount: no symbol, no grouping.
struct Amount<'m, 'a>(&'m Money<'a, Currency>);

impl fmt::Display for Amount<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .amount()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        write!(f, "{rounded:.2}")
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        ledger::LedgerError,
        pricing::{BundleDiscount, ThresholdMultipleDiscount},
        products::{Product, Unit},
    };

    use super::*;

    const CHIPS: Sku = Sku::new(10001);
    const APPLES: Sku = Sku::new(10002);
    const CEREAL: Sku = Sku::new(10003);
    const ICE_CREAM: Sku = Sku::new(10004);

    fn catalog<'a>() -> Result<Catalog<'a>, ReceiptError> {
        let mut catalog = Catalog::new(USD);

        catalog.insert(
            "chips",
            Product::new(CHIPS, "Chips", Unit::Each, Money::from_minor(300, USD)),
        )?;
        catalog.insert(
            "apples",
            Product::new(APPLES, "Apples ($2/lb)", Unit::Lb, Money::from_minor(200, USD)),
        )?;
        catalog.insert(
            "cereal",
            Product::with_rule(
                CEREAL,
                "Cereal",
                Unit::Each,
                Money::from_minor(300, USD),
                ThresholdMultipleDiscount::new(4, Money::from_minor(50, USD))?.into(),
            ),
        )?;
        catalog.insert(
            "ice_cream",
            Product::with_rule(
                ICE_CREAM,
                "Ice Cream",
                Unit::Each,
                Money::from_minor(400, USD),
                BundleDiscount::new(2, 1)?.into(),
            ),
        )?;

        Ok(catalog)
    }

    fn ledger(scans: &[(Sku, Decimal)]) -> Result<Ledger, LedgerError> {
        let mut ledger = Ledger::new();

        for (sku, quantity) in scans {
            ledger.add_scan(*sku, *quantity)?;
        }

        Ok(ledger)
    }

    #[test]
    fn empty_ledger_renders_zero_total() -> TestResult {
        let receipt = Receipt::render(&Ledger::new(), &catalog()?)?;

        assert!(receipt.lines().is_empty());
        assert_eq!(receipt.to_string(), "------------\nTotal  $0.00");

        Ok(())
    }

    #[test]
    fn flat_items_are_priced_per_scan() -> TestResult {
        let ledger = ledger(&[(CHIPS, Decimal::ONE), (CHIPS, Decimal::ONE)])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(
            receipt.to_string(),
            "Chips  $3.00\nChips  $3.00\n------------\nTotal  $6.00"
        );
        assert_eq!(receipt.discount_count(), 0);

        Ok(())
    }

    #[test]
    fn threshold_discount_is_charged_once_per_breakpoint() -> TestResult {
        let ledger = ledger(&[(CEREAL, Decimal::ONE); 8])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        let discounts: Vec<(usize, &Money<'_, Currency>)> = receipt
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                ReceiptLine::Discount { amount, .. } => Some((idx, amount)),
                ReceiptLine::Item { .. } => None,
            })
            .collect();

        // Discount lines follow the 4th and 8th scans.
        assert_eq!(
            discounts,
            [
                (4, &Money::from_minor(200, USD)),
                (9, &Money::from_minor(200, USD))
            ]
        );
        assert_eq!(receipt.total(), Money::from_minor(2000, USD));
        assert_eq!(receipt.savings()?, Money::from_minor(400, USD));

        Ok(())
    }

    #[test]
    fn batch_landing_on_breakpoint_triggers_discount() -> TestResult {
        let ledger = ledger(&[(CEREAL, Decimal::from(4))])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(
            receipt.to_string(),
            "Cereal  $12.00\n* Discount  -$2.00\n------------\nTotal  $10.00"
        );

        Ok(())
    }

    #[test]
    fn batch_skipping_over_breakpoint_does_not_trigger() -> TestResult {
        let ledger = ledger(&[(CEREAL, Decimal::from(3)), (CEREAL, Decimal::from(2))])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(receipt.discount_count(), 0);
        assert_eq!(receipt.total(), Money::from_minor(1500, USD));

        Ok(())
    }

    #[test]
    fn second_bundle_prints_a_zero_discount() -> TestResult {
        let ledger = ledger(&[(ICE_CREAM, Decimal::ONE); 6])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(
            receipt.to_string(),
            "Ice Cream  $4.00\n\
             Ice Cream  $4.00\n\
             Ice Cream  $4.00\n\
             * Discount  -$4.00\n\
             Ice Cream  $4.00\n\
             Ice Cream  $4.00\n\
             Ice Cream  $4.00\n\
             * Discount  -$0.00\n\
             ------------\n\
             Total  $20.00"
        );
        assert_eq!(receipt.discount_count(), 2);

        Ok(())
    }

    #[test]
    fn zero_threshold_discount_still_prints_a_line() -> TestResult {
        let mut catalog = Catalog::new(USD);
        let sku = Sku::new(1);

        catalog.insert(
            "x",
            Product::with_rule(
                sku,
                "X",
                Unit::Each,
                Money::from_minor(100, USD),
                ThresholdMultipleDiscount::new(2, Money::from_minor(0, USD))?.into(),
            ),
        )?;

        let receipt = Receipt::render(&ledger(&[(sku, Decimal::ONE); 2])?, &catalog)?;

        assert_eq!(
            receipt.to_string(),
            "X  $1.00\nX  $1.00\n* Discount  -$0.00\n------------\nTotal  $2.00"
        );

        Ok(())
    }

    #[test]
    fn weighed_items_are_priced_exactly() -> TestResult {
        let ledger = ledger(&[(APPLES, Decimal::new(125, 2)), (APPLES, Decimal::new(5, 1))])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(
            receipt.to_string(),
            "Apples ($2/lb)  $2.50\nApples ($2/lb)  $1.00\n------------\nTotal  $3.50"
        );

        Ok(())
    }

    #[test]
    fn amounts_are_rounded_for_display_only() -> TestResult {
        // 0.333 lb at $2.00 is $0.666; three of them are exactly $1.998.
        let ledger = ledger(&[(APPLES, Decimal::new(333, 3)); 3])?;
        let receipt = Receipt::render(&ledger, &catalog()?)?;

        assert_eq!(receipt.total(), Money::from_decimal(Decimal::new(1998, 3), USD));
        assert_eq!(
            receipt.to_string(),
            "Apples ($2/lb)  $0.67\nApples ($2/lb)  $0.67\nApples ($2/lb)  $0.67\n------------\nTotal  $2.00"
        );

        Ok(())
    }

    #[test]
    fn unknown_product_aborts_render() -> TestResult {
        let ledger = ledger(&[(CHIPS, Decimal::ONE), (Sku::new(42), Decimal::ONE)])?;

        assert_eq!(
            Receipt::render(&ledger, &catalog()?),
            Err(ReceiptError::Catalog(CatalogError::ProductNotFound(
                Sku::new(42)
            )))
        );

        Ok(())
    }

    #[test]
    fn render_is_idempotent() -> TestResult {
        let ledger = ledger(&[(CEREAL, Decimal::ONE); 5])?;
        let catalog = catalog()?;

        let first = Receipt::render(&ledger, &catalog)?;
        let second = Receipt::render(&ledger, &catalog)?;

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());

        Ok(())
    }

    #[test]
    fn amount_has_no_thousands_separator() {
        let money = Money::from_minor(123_456_700, USD);

        assert_eq!(Amount(&money).to_string(), "1234567.00");
    }
}
