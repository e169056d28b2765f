//! Flat Unit Price
//!
//! Base price times quantity, for counted and weighed products alike.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, extended_price};

/// Flat unit pricing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatUnitPrice;

impl FlatUnitPrice {
    /// Price of `quantity` units at `base_price`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the multiplication overflows.
    pub fn price_for<'a>(
        &self,
        base_price: &Money<'a, Currency>,
        quantity: Decimal,
    ) -> Result<Money<'a, Currency>, PricingError> {
        extended_price(base_price, quantity)
    }
}
