//! Catalog Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::{BundleDiscount, PricingRule, ThresholdMultipleDiscount},
    products::{Product, Sku, Unit},
};

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of product handle -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product SKU
    pub sku: Sku,

    /// Product name
    pub name: String,

    /// Unit of measure
    #[serde(default = "default_unit")]
    pub unit: Unit,

    /// Base unit price (e.g., "2.99 USD")
    pub price: String,

    /// Pricing rule, flat when omitted
    #[serde(default)]
    pub pricing: PricingFixture,
}

fn default_unit() -> Unit {
    Unit::Each
}

/// Pricing rule fixture, tagged by `type`
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingFixture {
    /// Flat unit price
    #[default]
    Flat,

    /// Per-unit discount at every multiple of `breakpoint`
    ThresholdMultiple {
        /// Cumulative quantity at which the discount recurs
        breakpoint: u32,

        /// Discount per unit (e.g., "0.50 USD")
        discount: String,
    },

    /// Buy `buy`, get `free` free
    Bundle {
        /// Units that must be bought
        buy: u32,

        /// Units refunded per bundle
        free: u32,
    },
}

impl TryFrom<PricingFixture> for PricingRule<'_> {
    type Error = FixtureError;

    fn try_from(fixture: PricingFixture) -> Result<Self, Self::Error> {
        Ok(match fixture {
            PricingFixture::Flat => PricingRule::default(),
            PricingFixture::ThresholdMultiple {
                breakpoint,
                discount,
            } => ThresholdMultipleDiscount::new(breakpoint, parse_price(&discount)?)?.into(),
            PricingFixture::Bundle { buy, free } => BundleDiscount::new(buy, free)?.into(),
        })
    }
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        Ok(Product::with_rule(
            fixture.sku,
            fixture.name,
            fixture.unit,
            parse_price(&fixture.price)?,
            fixture.pricing.try_into()?,
        ))
    }
}

/// Parse price string (e.g., "2.99 USD") into exact money
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok(Money::from_decimal(amount, currency))
}
