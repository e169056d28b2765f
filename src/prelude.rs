//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{Fixture, FixtureError},
    ledger::{Ledger, LedgerError, ScanEvent},
    pricing::{
        BundleDiscount, FlatUnitPrice, PricingError, PricingRule, ThresholdMultipleDiscount,
    },
    products::{Product, ProductKey, Sku, Unit},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    register::{Register, RegisterError},
};
