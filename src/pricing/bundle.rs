//! Bundle Discount
//!
//! "Buy X get Y free". Every unit is charged at full price. Whenever the cumulative quantity is a
//! multiple of `X + 1`, the owed discount is the price of the free units.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, extended_price};

/// Buy `bundle_size`, get `free_units` free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleDiscount {
    bundle_size: u32,
    free_units: u32,
}

impl BundleDiscount {
    /// Create a new bundle discount.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidBundleSize`]: `bundle_size` is zero.
    /// - [`PricingError::InvalidFreeUnits`]: `free_units` is zero.
    pub fn new(bundle_size: u32, free_units: u32) -> Result<Self, PricingError> {
        if bundle_size == 0 {
            return Err(PricingError::InvalidBundleSize);
        }

        if free_units == 0 {
            return Err(PricingError::InvalidFreeUnits);
        }

        Ok(Self {
            bundle_size,
            free_units,
        })
    }

    /// Return the number of units that must be bought
    pub fn bundle_size(&self) -> u32 {
        self.bundle_size
    }

    /// Return the number of units refunded per completed bundle
    pub fn free_units(&self) -> u32 {
        self.free_units
    }

    /// Price of `quantity` units at `base_price`. Free units are not deducted here.
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

    /// Discount owed at `cumulative_quantity`: `free_units × base_price`, reported only when the
    /// cumulative quantity is a multiple of `bundle_size + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the discount cannot be represented.
    pub fn discount_owed<'a>(
        &self,
        base_price: &Money<'a, Currency>,
        cumulative_quantity: Decimal,
    ) -> Result<Option<Money<'a, Currency>>, PricingError> {
        if cumulative_quantity <= Decimal::ZERO {
            return Ok(None);
        }

        // The bundle period is X + 1 units. Done in decimal so u32::MAX cannot wrap.
        let period = Decimal::from(self.bundle_size) + Decimal::ONE;

        let remainder = cumulative_quantity
            .checked_rem(period)
            .ok_or(PricingError::Overflow)?;

        if !remainder.is_zero() {
            return Ok(None);
        }

        extended_price(base_price, Decimal::from(self.free_units)).map(Some)
    }
}
