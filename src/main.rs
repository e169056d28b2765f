//! Checkout register
//!
//! Prices a cart against a catalog fixture and prints the receipt.
//!
//! ```text
//! checkout --cart store
//! checkout cereal:4 apples:1.5 10001
//! ```

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use checkout::{config::CheckoutArgs, fixtures::Fixture, logging::init_subscriber};

fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    init_subscriber(&args.logging)?;

    let mut fixture = Fixture::with_base_path(&args.fixtures);

    fixture
        .load_catalog(&args.catalog)
        .with_context(|| format!("loading catalog {:?}", args.catalog))?;

    if let Some(cart) = args.cart.as_deref() {
        fixture
            .load_cart(cart)
            .with_context(|| format!("loading cart {cart:?}"))?;
    }

    let mut register = fixture.register()?;

    for scan in &args.scans {
        scan.apply(&mut register)?;
    }

    let receipt = register.receipt()?;

    info!(
        scans = register.ledger().len(),
        discounts = receipt.discount_count(),
        total = %receipt.total(),
        "priced transaction"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "{receipt}")?;

    Ok(())
}
