//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

use crate::pricing::PricingRule;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Stock-keeping unit, the unique product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Sku(u32);

impl Sku {
    /// Creates a new SKU
    pub const fn new(value: u32) -> Self {
        Sku(value)
    }

    /// Returns the numeric value
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Sku {
    fn from(value: u32) -> Self {
        Sku(value)
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit of measure a product is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Counted items, quantities must be whole numbers.
    Each,

    /// Weighed items, priced per pound. Quantities may be fractional.
    #[serde(alias = "pound")]
    Lb,
}

impl Unit {
    /// Whether quantities in this unit must be whole numbers.
    pub fn is_counted(self) -> bool {
        matches!(self, Unit::Each)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Each => f.write_str("each"),
            Unit::Lb => f.write_str("lb"),
        }
    }
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product SKU
    pub sku: Sku,

    /// Product name, as printed on the receipt
    pub name: String,

    /// Unit of measure
    pub unit: Unit,

    /// Base price per unit
    pub price: Money<'a, Currency>,

    /// Pricing rule applied to every scan of this product
    pub rule: PricingRule<'a>,
}

impl<'a> Product<'a> {
    /// Create a product priced with a flat unit price.
    pub fn new(sku: Sku, name: impl Into<String>, unit: Unit, price: Money<'a, Currency>) -> Self {
        Self::with_rule(sku, name, unit, price, PricingRule::default())
    }

    /// Create a product with the given pricing rule.
    pub fn with_rule(
        sku: Sku,
        name: impl Into<String>,
        unit: Unit,
        price: Money<'a, Currency>,
        rule: PricingRule<'a>,
    ) -> Self {
        Self {
            sku,
            name: name.into(),
            unit,
            price,
            rule,
        }
    }
}
