//! Canonical invoice model and monetary derivation.
//!
//! The types here are the normalized shape every other component operates
//! on. All state lives in the caller-held [`CanonicalInvoice`] value; no
//! component retains anything between invocations.

mod error;
pub mod iban;
mod money;
mod totals;
mod types;

pub use error::*;
pub use money::{MONEY_TOLERANCE, format_amount};
pub use totals::compute_totals;
pub use types::*;
