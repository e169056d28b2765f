//! Fixtures
//!
//! YAML store data: catalogs under `<base>/catalogs/<name>.yml` and carts under
//! `<base>/carts/<name>.yml`. A fixture set is a catalog and a cart sharing a name.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::{carts::CartFixture, catalogs::CatalogFixture},
    ledger::LedgerError,
    pricing::PricingError,
    products::{Product, Sku},
    register::{Register, RegisterError},
};

pub mod carts;
pub mod catalogs;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid quantity format
    #[error("Invalid quantity format: {0}")]
    InvalidQuantity(String),

    /// Bare fractional or negative quantity in a cart
    #[error("Quantity {0} must be a whole number or quoted, e.g. quantity: \"{0}\"")]
    UnquotedQuantity(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A catalog must hold at least one product to know its currency
    #[error("Catalog fixture has no products; currency unknown")]
    EmptyCatalog,

    /// No catalog loaded yet
    #[error("No catalog loaded")]
    NoCatalog,

    /// Invalid pricing rule parameters
    #[error("Invalid pricing rule: {0}")]
    Pricing(#[from] PricingError),

    /// Catalog construction or lookup error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A cart scan was rejected
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<RegisterError> for FixtureError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Catalog(err) => FixtureError::Catalog(err),
            RegisterError::Ledger(err) => FixtureError::Ledger(err),
        }
    }
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded catalog
    catalog: Option<Catalog<'a>>,

    /// Cart scans, resolved to SKUs
    scans: Vec<(Sku, Decimal)>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            scans: Vec::new(),
        }
    }

    /// Load a catalog from a YAML fixture file, replacing any catalog already loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a product is invalid, or if
    /// products disagree on currency.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        let mut products: Vec<(String, Product<'static>)> =
            Vec::with_capacity(fixture.products.len());

        for (handle, product) in fixture.products {
            products.push((handle, product.try_into()?));
        }

        // Stable insertion order keeps duplicate-SKU errors deterministic.
        products.sort_by_key(|(_, product)| product.sku);

        let currency = products
            .first()
            .map(|(_, product)| product.price.currency())
            .ok_or(FixtureError::EmptyCatalog)?;

        let mut catalog = Catalog::new(currency);

        for (handle, product) in products {
            catalog.insert(handle, product)?;
        }

        debug!(
            path = %file_path.display(),
            products = catalog.len(),
            currency = currency.iso_alpha_code,
            "loaded catalog"
        );

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load a cart from a YAML fixture file, appending its scans.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog is loaded, if the file cannot be read or parsed, or if a
    /// scan references an unknown product or has an invalid quantity.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let catalog = self.catalog.as_ref().ok_or(FixtureError::NoCatalog)?;

        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        let mut scans = Vec::with_capacity(fixture.scans.len());

        for scan in &fixture.scans {
            let product = catalog.by_name(&scan.item)?;

            scans.push((product.sku, scan.quantity()?));
        }

        debug!(path = %file_path.display(), scans = scans.len(), "loaded cart");

        self.scans.extend(scans);

        Ok(self)
    }

    /// Load a complete fixture set (catalog and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NoCatalog`] if no catalog has been loaded.
    pub fn catalog(&self) -> Result<&Catalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Get the cart scans loaded so far
    pub fn scans(&self) -> &[(Sku, Decimal)] {
        &self.scans
    }

    /// Open a register on the loaded catalog with the cart already scanned.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog is loaded or a cart scan is rejected by the register.
    pub fn register(&self) -> Result<Register<'_, 'a>, FixtureError> {
        let mut register = Register::new(self.catalog()?);

        for (sku, quantity) in &self.scans {
            register.add_item(*sku, *quantity)?;
        }

        Ok(register)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
