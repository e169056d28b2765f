//! Pricing rules
//!
//! Every product carries exactly one [`PricingRule`]. A rule answers two questions:
//!
//! - what a single scan costs ([`PricingRule::price_for`]), and
//! - what total discount the product has earned once a given cumulative quantity has been
//!   scanned ([`PricingRule::discount_owed`]).
//!
//! The discount is always stated as a total for the cumulative quantity, never as a per-scan
//! amount. Callers keep track of what they have already charged and apply the difference.

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

pub mod bundle;
pub mod flat_unit_price;
pub mod threshold_multiple;

pub use bundle::BundleDiscount;
pub use flat_unit_price::FlatUnitPrice;
pub use threshold_multiple::ThresholdMultipleDiscount;

/// Errors raised while building or evaluating a pricing rule.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A threshold breakpoint of zero would never be reached.
    #[error("breakpoint must be at least 1")]
    InvalidBreakpoint,

    /// A bundle must contain at least one paid unit.
    #[error("bundle size must be at least 1")]
    InvalidBundleSize,

    /// A bundle must give away at least one unit.
    #[error("free units must be at least 1")]
    InvalidFreeUnits,

    /// Discounts are subtracted from the total, so a negative one would add to it.
    #[error("discount per unit must not be negative, got {0}")]
    NegativeDiscount(Decimal),

    /// Decimal arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Pricing rule enum
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingRule<'a> {
    /// Base price times quantity, no discount.
    FlatUnitPrice(FlatUnitPrice),

    /// Base price, with a per-unit discount every time the cumulative quantity reaches a
    /// multiple of the breakpoint.
    ThresholdMultiple(ThresholdMultipleDiscount<'a>),

    /// Buy X get Y free.
    Bundle(BundleDiscount),
}

impl Default for PricingRule<'_> {
    fn default() -> Self {
        PricingRule::FlatUnitPrice(FlatUnitPrice)
    }
}

impl<'a> PricingRule<'a> {
    /// Price of a single scan of `quantity` units at `base_price`.
    ///
    /// Every rule charges the full base price per unit; discounts are refunded separately.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn price_for(
        &self,
        base_price: &Money<'a, Currency>,
        quantity: Decimal,
    ) -> Result<Money<'a, Currency>, PricingError> {
        match self {
            PricingRule::FlatUnitPrice(flat) => flat.price_for(base_price, quantity),
            PricingRule::ThresholdMultiple(threshold) => threshold.price_for(base_price, quantity),
            PricingRule::Bundle(bundle) => bundle.price_for(base_price, quantity),
        }
    }

    /// Total discount owed once `cumulative_quantity` of the product has been scanned, or
    /// `None` when the cumulative quantity does not trigger the rule.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the discount cannot be represented.
    pub fn discount_owed(
        &self,
        base_price: &Money<'a, Currency>,
        cumulative_quantity: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, PricingError> {
        debug_assert!(
            !cumulative_quantity.is_sign_negative(),
            "cumulative quantity went negative: {cumulative_quantity}"
        );

        match self {
            PricingRule::FlatUnitPrice(_) => Ok(None),
            PricingRule::ThresholdMultiple(threshold) => {
                threshold.discount_owed(cumulative_quantity)
            }
            PricingRule::Bundle(bundle) => bundle.discount_owed(base_price, cumulative_quantity),
        }
    }

    /// The currency the rule's own parameters are expressed in, if it has any.
    pub fn currency(&self) -> Option<&'a Currency> {
        match self {
            PricingRule::ThresholdMultiple(threshold) => Some(threshold.discount().currency()),
            PricingRule::FlatUnitPrice(_) | PricingRule::Bundle(_) => None,
        }
    }
}

impl From<FlatUnitPrice> for PricingRule<'_> {
    fn from(rule: FlatUnitPrice) -> Self {
        PricingRule::FlatUnitPrice(rule)
    }
}

impl<'a> From<ThresholdMultipleDiscount<'a>> for PricingRule<'a> {
    fn from(rule: ThresholdMultipleDiscount<'a>) -> Self {
        PricingRule::ThresholdMultiple(rule)
    }
}

impl From<BundleDiscount> for PricingRule<'_> {
    fn from(rule: BundleDiscount) -> Self {
        PricingRule::Bundle(rule)
    }
}

/// Multiplies a unit price by a quantity without leaving decimal space.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn extended_price<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: Decimal,
) -> Result<Money<'a, Currency>, PricingError> {
    let amount = unit_price
        .amount()
        .checked_mul(quantity)
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_decimal(amount, unit_price.currency()))
}
