//! Business rule evaluation.
//!
//! Every rule is a total predicate over an immutable invoice snapshot:
//! deterministic, side-effect-free, and never failing the evaluation
//! itself. Blank or missing fields fail their rule; rules that depend on a
//! fact another field provides (a tax rate, a unit price) skip instead of
//! reporting a secondary error.

mod arithmetic;
mod presence;
mod semantic;

use serde::Serialize;

use crate::core::{CanonicalInvoice, Severity, ValidationError};
use crate::profile::{FormatProfile, OutputFormat};

/// Outcome of one rule evaluation, pass or fail.
///
/// The compliance reporter needs passed counts, so the evaluator records
/// every rule it ran, not just the failures.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    /// Stable rule code.
    pub rule: String,
    pub severity: Severity,
    pub passed: bool,
    /// Populated iff `passed` is false.
    pub error: Option<ValidationError>,
}

impl RuleOutcome {
    pub(crate) fn pass(rule: impl Into<String>, severity: Severity) -> Self {
        Self {
            rule: rule.into(),
            severity,
            passed: true,
            error: None,
        }
    }

    pub(crate) fn fail(error: ValidationError) -> Self {
        Self {
            rule: error.rule.clone(),
            severity: error.severity,
            passed: false,
            error: Some(error),
        }
    }
}

/// Evaluate every rule active for `format` and return the full per-rule
/// record. Presence and IBAN enforcement are format-scoped via the
/// registry; arithmetic, balance, and semantic rules run for every format.
pub fn check(invoice: &CanonicalInvoice, format: OutputFormat) -> Vec<RuleOutcome> {
    let profile = FormatProfile::for_format(format);
    let mut outcomes = Vec::new();
    presence::check_presence(invoice, profile, format, &mut outcomes);
    presence::check_structure(invoice, profile, &mut outcomes);
    arithmetic::check_arithmetic(invoice, &mut outcomes);
    semantic::check_semantic(invoice, &mut outcomes);
    outcomes
}

/// Failures-only projection of [`check`].
pub fn evaluate(invoice: &CanonicalInvoice, format: OutputFormat) -> Vec<ValidationError> {
    check(invoice, format)
        .into_iter()
        .filter_map(|o| o.error)
        .collect()
}

/// Evaluate by raw format identifier.
///
/// Unknown or unconfigured ids do not fail evaluation; they fall back to
/// the minimal universal rule subset (document number, date, seller name,
/// line items present, monetary balance).
pub fn check_by_id(invoice: &CanonicalInvoice, format_id: &str) -> Vec<RuleOutcome> {
    match OutputFormat::parse(format_id) {
        Some(format) => check(invoice, format),
        None => minimal_check(invoice),
    }
}

/// Failures-only projection of [`check_by_id`].
pub fn evaluate_by_id(invoice: &CanonicalInvoice, format_id: &str) -> Vec<ValidationError> {
    check_by_id(invoice, format_id)
        .into_iter()
        .filter_map(|o| o.error)
        .collect()
}

fn minimal_check(invoice: &CanonicalInvoice) -> Vec<RuleOutcome> {
    use crate::profile::LogicalField::*;

    let mut outcomes = Vec::new();
    for field in [InvoiceNumber, InvoiceDate, SellerName, LineItems] {
        presence::check_one_presence(invoice, field, Severity::Error, &mut outcomes);
    }
    arithmetic::check_balance(invoice, &mut outcomes);
    outcomes
}
