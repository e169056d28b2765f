//! Command line configuration

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    fixtures::carts::parse_quantity,
    products::Sku,
    register::{Register, RegisterError},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Checkout register configuration
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Price a cart and print the receipt", long_about = None)]
pub struct CheckoutArgs {
    /// Directory holding `catalogs/` and `carts/` fixtures
    #[arg(long, env = "CHECKOUT_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Catalog fixture to price against
    #[arg(short, long, env = "CHECKOUT_CATALOG", default_value = "store")]
    pub catalog: String,

    /// Cart fixture to scan before any scans given on the command line
    #[arg(long)]
    pub cart: Option<String>,

    /// Scans as `ITEM[:QUANTITY]`, where ITEM is a SKU or a catalog handle
    #[arg(value_name = "SCAN")]
    pub scans: Vec<ScanArg>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Errors parsing a scan argument.
#[derive(Debug, Error, PartialEq)]
pub enum ScanArgError {
    /// Nothing before the colon
    #[error("scan is missing an item: {0:?}")]
    MissingItem(String),

    /// Quantity after the colon is not a decimal number
    #[error("invalid quantity in scan {0:?}")]
    InvalidQuantity(String),
}

/// Product reference in a scan argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// A numeric SKU
    Sku(Sku),

    /// A catalog handle
    Handle(String),
}

/// A scan given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArg {
    /// Product to scan
    pub target: ScanTarget,

    /// Units or weight
    pub quantity: Decimal,
}

impl ScanArg {
    /// Ring this scan up on a register.
    ///
    /// # Errors
    ///
    /// Returns a [`RegisterError`] if the product is unknown or the quantity is rejected.
    pub fn apply(&self, register: &mut Register<'_, '_>) -> Result<(), RegisterError> {
        match &self.target {
            ScanTarget::Sku(sku) => register.add_item(*sku, self.quantity),
            ScanTarget::Handle(handle) => register.add_by_name(handle, self.quantity),
        }
    }
}

impl FromStr for ScanArg {
    type Err = ScanArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, quantity) = match s.split_once(':') {
            Some((item, quantity)) => (
                item.trim(),
                parse_quantity(quantity)
                    .map_err(|_err| ScanArgError::InvalidQuantity(s.to_string()))?,
            ),
            None => (s.trim(), Decimal::ONE),
        };

        if item.is_empty() {
            return Err(ScanArgError::MissingItem(s.to_string()));
        }

        let target = match item.parse::<u32>() {
            Ok(sku) => ScanTarget::Sku(Sku::new(sku)),
            Err(_) => ScanTarget::Handle(item.to_string()),
        };

        Ok(ScanArg { target, quantity })
    }
}
