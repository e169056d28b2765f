//! Catalog
//!
//! The store's product data: every product the register can sell, indexed by SKU and by a short
//! handle (`"cereal"`). Built once at startup and never mutated while a transaction is priced.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey, Sku};

/// Errors related to catalog construction and lookups.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No product with this SKU exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(Sku),

    /// No product with this handle exists in the catalog.
    #[error("Product not found: {0}")]
    HandleNotFound(String),

    /// A product with this SKU was already inserted.
    #[error("Duplicate SKU: {0}")]
    DuplicateSku(Sku),

    /// A product with this handle was already inserted.
    #[error("Duplicate product handle: {0}")]
    DuplicateHandle(String),

    /// A product's money is in a different currency from the catalog (SKU, product currency,
    /// catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(Sku, &'static str, &'static str),
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    currency: &'static Currency,
    products: SlotMap<ProductKey, Product<'a>>,
    skus: FxHashMap<Sku, ProductKey>,
    handles: FxHashMap<String, ProductKey>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            currency,
            products: SlotMap::with_key(),
            skus: FxHashMap::default(),
            handles: FxHashMap::default(),
        }
    }

    /// Add a product under the given handle.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the SKU or handle is taken, or if the product's price or
    /// pricing rule is in a different currency from the catalog.
    pub fn insert(
        &mut self,
        handle: impl Into<String>,
        product: Product<'a>,
    ) -> Result<ProductKey, CatalogError> {
        let handle = handle.into();

        if self.skus.contains_key(&product.sku) {
            return Err(CatalogError::DuplicateSku(product.sku));
        }

        if self.handles.contains_key(&handle) {
            return Err(CatalogError::DuplicateHandle(handle));
        }

        let currencies = [Some(product.price.currency()), product.rule.currency()];

        for currency in currencies.into_iter().flatten() {
            if currency != self.currency {
                return Err(CatalogError::CurrencyMismatch(
                    product.sku,
                    currency.iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }
        }

        let sku = product.sku;
        let key = self.products.insert(product);

        self.skus.insert(sku, key);
        self.handles.insert(handle, key);

        Ok(key)
    }

    /// Look up a product by SKU.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the SKU is unknown.
    pub fn lookup(&self, sku: Sku) -> Result<&Product<'a>, CatalogError> {
        self.skus
            .get(&sku)
            .and_then(|key| self.products.get(*key))
            .ok_or(CatalogError::ProductNotFound(sku))
    }

    /// Look up a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::HandleNotFound`] if the handle is unknown.
    pub fn by_name(&self, handle: &str) -> Result<&Product<'a>, CatalogError> {
        self.handles
            .get(handle)
            .and_then(|key| self.products.get(*key))
            .ok_or_else(|| CatalogError::HandleNotFound(handle.to_string()))
    }

    /// Whether a product with this SKU exists.
    pub fn contains(&self, sku: Sku) -> bool {
        self.skus.contains_key(&sku)
    }

    /// Iterate over all products, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.values()
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
