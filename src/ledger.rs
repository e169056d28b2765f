//! Ledger
//!
//! The ordered list of scans in one transaction. Scans are appended and never edited; the only
//! way to remove one is to reset the whole transaction.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::Sku;

/// Errors related to recording scans.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Quantities must be strictly positive (SKU, quantity).
    #[error("Invalid quantity {1} for product {0}; quantities must be positive")]
    InvalidQuantity(Sku, Decimal),

    /// Counted products must be scanned in whole units (SKU, quantity).
    #[error("Invalid quantity {1} for product {0}; product is sold in whole units")]
    FractionalCount(Sku, Decimal),
}

/// A single scan: one product, one quantity (a count or a weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanEvent {
    sku: Sku,
    quantity: Decimal,
}

impl ScanEvent {
    /// Create a new scan event.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidQuantity`] if `quantity` is zero or negative.
    pub fn new(sku: Sku, quantity: Decimal) -> Result<Self, LedgerError> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidQuantity(sku, quantity));
        }

        Ok(Self { sku, quantity })
    }

    /// Returns the scanned SKU
    pub fn sku(&self) -> Sku {
        self.sku
    }

    /// Returns the scanned quantity
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }
}

/// Ledger
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    events: Vec<ScanEvent>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scan.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidQuantity`] if `quantity` is zero or negative; the ledger
    /// is left unchanged.
    pub fn add_scan(&mut self, sku: Sku, quantity: Decimal) -> Result<(), LedgerError> {
        self.events.push(ScanEvent::new(sku, quantity)?);

        Ok(())
    }

    /// Append an already validated scan.
    pub fn push(&mut self, event: ScanEvent) {
        self.events.push(event);
    }

    /// Remove every scan.
    pub fn reset(&mut self) {
        self.events.clear();
    }

    /// Scans in the order they were added.
    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    /// Iterate over scans in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &ScanEvent> {
        self.events.iter()
    }

    /// Get the number of scans.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
