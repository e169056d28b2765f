//! Cart Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::fixtures::FixtureError;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Scans in the order they are rung up
    pub scans: Vec<ScanFixture>,
}

/// A single scan, referencing a product by its catalog handle
#[derive(Debug, Deserialize)]
pub struct ScanFixture {
    /// Product handle
    pub item: String,

    /// Units or weight, one when omitted
    #[serde(default)]
    pub quantity: Option<QuantityFixture>,
}

/// Scan quantity as written in YAML.
///
/// Whole numbers may be written bare; fractional quantities must be quoted (`"2.5"`) so they
/// never pass through a float. A bare fraction still deserializes, so it can be rejected with an
/// error that says how to write it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityFixture {
    /// A bare whole number
    Whole(u32),

    /// A quoted decimal
    Exact(String),

    /// Any other bare number, such as `2.5` or `-1`. Always rejected.
    Unquoted(f64),
}

impl ScanFixture {
    /// The scan quantity as an exact decimal.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::InvalidQuantity`]: a quoted quantity is not a decimal number.
    /// - [`FixtureError::UnquotedQuantity`]: a bare number is not a whole number.
    pub fn quantity(&self) -> Result<Decimal, FixtureError> {
        match &self.quantity {
            None => Ok(Decimal::ONE),
            Some(QuantityFixture::Whole(n)) => Ok(Decimal::from(*n)),
            Some(QuantityFixture::Exact(s)) => parse_quantity(s),
            Some(QuantityFixture::Unquoted(n)) => {
                Err(FixtureError::UnquotedQuantity(n.to_string()))
            }
        }
    }
}

/// Parse a quantity string (e.g., "2" or "0.75") into an exact decimal
///
/// # Errors
///
/// Returns [`FixtureError::InvalidQuantity`] if the string is not a decimal number.
pub fn parse_quantity(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidQuantity(s.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn quantity_defaults_to_one() -> TestResult {
        let cart: CartFixture = serde_norway::from_str("scans:\n  - item: chips\n")?;

        let quantities = cart
            .scans
            .iter()
            .map(ScanFixture::quantity)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(quantities, [Decimal::ONE]);

        Ok(())
    }

    #[test]
    fn bare_and_quoted_quantities_are_exact() -> TestResult {
        let cart: CartFixture = serde_norway::from_str(
            "scans:\n  - item: apples\n    quantity: 6\n  - item: apples\n    quantity: \"0.35\"\n",
        )?;

        let quantities = cart
            .scans
            .iter()
            .map(ScanFixture::quantity)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(quantities, [Decimal::from(6), Decimal::new(35, 2)]);

        Ok(())
    }

    #[test]
    fn bare_fractional_quantity_asks_for_quotes() -> TestResult {
        let cart: CartFixture =
            serde_norway::from_str("scans:\n  - item: apples\n    quantity: 2.5\n")?;

        let quantity = cart.scans.first().map(ScanFixture::quantity);

        assert!(
            matches!(&quantity, Some(Err(FixtureError::UnquotedQuantity(q))) if q == "2.5"),
            "{quantity:?}"
        );
        assert_eq!(
            FixtureError::UnquotedQuantity("2.5".to_string()).to_string(),
            "Quantity 2.5 must be a whole number or quoted, e.g. quantity: \"2.5\""
        );

        Ok(())
    }

    #[test]
    fn parse_quantity_rejects_garbage() {
        assert!(matches!(
            parse_quantity("lots"),
            Err(FixtureError::InvalidQuantity(q)) if q == "lots"
        ));
    }

    #[test]
    fn parse_quantity_handles_whitespace() -> TestResult {
        assert_eq!(parse_quantity(" 1.5 ")?, Decimal::new(15, 1));

        Ok(())
    }
}
