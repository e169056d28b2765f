//! Threshold Multiple Discount
//!
//! "4 for $10, or $3 each": full price per scan, and every time the cumulative quantity lands on
//! a multiple of the breakpoint the product has earned `discount × cumulative quantity` in total.
//!
//! Only exact multiples count. A single scan that jumps over a multiple (3 already scanned, then
//! 2 more) does not trigger anything until the cumulative quantity lands on one.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, extended_price};

/// A per-unit discount that recurs at every multiple of a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMultipleDiscount<'a> {
    breakpoint: u32,
    discount: Money<'a, Currency>,
}

impl<'a> ThresholdMultipleDiscount<'a> {
    /// Create a new threshold discount.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidBreakpoint`]: the breakpoint is zero.
    /// - [`PricingError::NegativeDiscount`]: the per-unit discount is negative.
    pub fn new(breakpoint: u32, discount: Money<'a, Currency>) -> Result<Self, PricingError> {
        if breakpoint == 0 {
            return Err(PricingError::InvalidBreakpoint);
        }

        if discount.amount().is_sign_negative() {
            return Err(PricingError::NegativeDiscount(*discount.amount()));
        }

        Ok(Self {
            breakpoint,
            discount,
        })
    }

    /// Return the breakpoint
    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }

    /// Return the discount per unit
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// Price of `quantity` units at `base_price`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn price_for(
        &self,
        base_price: &Money<'a, Currency>,
        quantity: Decimal,
    ) -> Result<Money<'a, Currency>, PricingError> {
        extended_price(base_price, quantity)
    }

    /// Total discount owed at `cumulative_quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the discount cannot be represented.
    pub fn discount_owed(
        &self,
        cumulative_quantity: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, PricingError> {
        if cumulative_quantity <= Decimal::ZERO {
            return Ok(None);
        }

        let remainder = cumulative_quantity
            .checked_rem(Decimal::from(self.breakpoint))
            .ok_or(PricingError::Overflow)?;

        if !remainder.is_zero() {
            return Ok(None);
        }

        extended_price(&self.discount, cumulative_quantity).map(Some)
    }
}
