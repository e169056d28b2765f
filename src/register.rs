//! Register
//!
//! The cash register a cashier drives: scan items, void the transaction, print the receipt.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::{
    catalog::{Catalog, CatalogError},
    ledger::{Ledger, LedgerError, ScanEvent},
    products::{Product, Sku},
    receipt::{Receipt, ReceiptError},
};

/// Errors raised while scanning items.
#[derive(Debug, Error, PartialEq)]
pub enum RegisterError {
    /// The scanned product is not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The scan quantity was rejected.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Register
#[derive(Debug)]
pub struct Register<'c, 'a> {
    catalog: &'c Catalog<'a>,
    ledger: Ledger,
}

impl<'c, 'a> Register<'c, 'a> {
    /// Open a register with an empty transaction.
    pub fn new(catalog: &'c Catalog<'a>) -> Self {
        Self {
            catalog,
            ledger: Ledger::new(),
        }
    }

    /// Scan `quantity` units (or pounds) of the product with this SKU.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::Catalog`]: the SKU is not in the catalog.
    /// - [`RegisterError::Ledger`]: the quantity is not positive, or is fractional for a product
    ///   sold in whole units.
    pub fn add_item(&mut self, sku: Sku, quantity: Decimal) -> Result<(), RegisterError> {
        let catalog = self.catalog;
        let product = catalog.lookup(sku).inspect_err(|err| {
            warn!(%sku, %err, "rejected scan");
        })?;

        self.scan(product, quantity)
    }

    /// Scan a single unit of the product with this SKU.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Catalog`] if the SKU is not in the catalog.
    pub fn add_one(&mut self, sku: Sku) -> Result<(), RegisterError> {
        self.add_item(sku, Decimal::ONE)
    }

    /// Scan `quantity` of the product with this catalog handle.
    ///
    /// # Errors
    ///
    /// Same as [`Register::add_item`], with [`CatalogError::HandleNotFound`] for unknown handles.
    pub fn add_by_name(&mut self, handle: &str, quantity: Decimal) -> Result<(), RegisterError> {
        let catalog = self.catalog;
        let product = catalog.by_name(handle).inspect_err(|err| {
            warn!(handle, %err, "rejected scan");
        })?;

        self.scan(product, quantity)
    }

    fn scan(&mut self, product: &Product<'a>, quantity: Decimal) -> Result<(), RegisterError> {
        let sku = product.sku;

        let event = ScanEvent::new(sku, quantity).inspect_err(|err| {
            warn!(%sku, %quantity, %err, "rejected scan");
        })?;

        if product.unit.is_counted() && quantity.fract() != Decimal::ZERO {
            warn!(%sku, %quantity, unit = %product.unit, "rejected fractional scan");

            return Err(LedgerError::FractionalCount(sku, quantity).into());
        }

        self.ledger.push(event);

        Ok(())
    }

    /// Clear out the items for this transaction.
    pub fn reset(&mut self) {
        self.ledger.reset();
    }

    /// Scans recorded so far.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The catalog this register prices against.
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    /// Price the current transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if any scan cannot be priced.
    pub fn receipt(&self) -> Result<Receipt<'a>, ReceiptError> {
        Receipt::render(&self.ledger, self.catalog)
    }

    /// Price the current transaction and return the printed receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if any scan cannot be priced.
    pub fn print_receipt(&self) -> Result<String, ReceiptError> {
        Ok(self.receipt()?.to_string())
    }
}
