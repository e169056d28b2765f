//! Checkout
//!
//! Point-of-sale register pricing. Scans are priced by a per-product rule (flat unit price,
//! weight-based price, threshold discount or buy-X-get-Y-free bundle), discounts are earned on
//! the cumulative quantity scanned per product, and the transaction is rendered as a
//! line-by-line receipt.
//!
//! ```
//! use checkout::prelude::*;
//! use rust_decimal::Decimal;
//! use rusty_money::{Money, iso::USD};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut catalog = Catalog::new(USD);
//!
//! catalog.insert(
//!     "ice_cream",
//!     Product::with_rule(
//!         Sku::new(10004),
//!         "Ice Cream",
//!         Unit::Each,
//!         Money::from_minor(400, USD),
//!         BundleDiscount::new(2, 1)?.into(),
//!     ),
//! )?;
//!
//! let mut register = Register::new(&catalog);
//!
//! for _ in 0..3 {
//!     register.add_one(Sku::new(10004))?;
//! }
//!
//! assert_eq!(
//!     register.print_receipt()?,
//!     "Ice Cream  $4.00\nIce Cream  $4.00\nIce Cream  $4.00\n* Discount  -$4.00\n------------\nTotal  $8.00"
//! );
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod ledger;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod register;
