//! # pruefwerk
//!
//! Invoice compliance and monetary derivation engine: certifies
//! AI-extracted invoice data against international e-invoicing profiles
//! (XRechnung, Peppol BIS, FatturaPA, KSeF, ZUGFeRD, Factur-X).
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The canonical model follows the [EN 16931](https://standards.cencenelec.eu/dyn/www/f?p=205:110:0::::FSP_PROJECT:60602) semantic model.
//!
//! ## Quick Start
//!
//! ```rust
//! use pruefwerk::*;
//! use rust_decimal_macros::dec;
//!
//! let mut invoice = CanonicalInvoice::default();
//! invoice.invoice_number = Some("RE-2026-001".into());
//! invoice.invoice_date = Some("2026-08-29".into());
//! invoice.line_items.push(LineItem {
//!     description: Some("Beratung".into()),
//!     quantity: Some(dec!(10)),
//!     unit_price: Some(dec!(150.00)),
//!     total_price: Some(dec!(1500.00)),
//!     tax_rate: Some(dec!(19)),
//!     ..Default::default()
//! });
//! invoice.recompute_totals();
//! assert_eq!(invoice.totals.total_amount, dec!(1785.00));
//!
//! let outcomes = check(&invoice, OutputFormat::Peppol);
//! let summary = summarize(&outcomes);
//! assert!(!summary.is_ready); // seller, buyer, endpoints still missing
//! ```

pub mod core;
pub mod profile;
pub mod report;
pub mod rules;

pub use crate::core::*;
pub use crate::profile::*;
pub use crate::report::{ComplianceSummary, summarize};
pub use crate::rules::{RuleOutcome, check, check_by_id, evaluate, evaluate_by_id};
