//! Semantic NET/GROSS heuristics.
//!
//! Upstream AI extraction systematically conflates gross (tax-inclusive)
//! and net amounts; these rules are the defense. For each taxed line the
//! expected net is quantity times unit price. A line whose total matches
//! the gross candidate instead is flagged as `SEMANTIC-NET-GROSS`; a line
//! matching neither candidate gets the generic
//! `SEMANTIC-LINE-TOTAL-MISMATCH`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{CanonicalInvoice, Severity, ValidationError, format_amount};

use super::RuleOutcome;

/// Absolute tolerance for the NET/GROSS heuristics. Fixed currency
/// epsilon, not a percentage: a relative tolerance false-positives on
/// rounding noise for large amounts and misses genuine gross swaps on
/// small ones.
pub(crate) const SEMANTIC_TOLERANCE: Decimal = dec!(0.02);

pub(super) fn check_semantic(invoice: &CanonicalInvoice, outcomes: &mut Vec<RuleOutcome>) {
    for (index, line) in invoice.line_items.iter().enumerate() {
        // No tax relationship to test: zero or unknown rate exempts the
        // line from both heuristics.
        let Some(rate) = line.tax_rate.filter(|r| *r > Decimal::ZERO) else {
            continue;
        };
        let (Some(quantity), Some(unit_price)) = (line.quantity, line.unit_price) else {
            continue;
        };
        let Some(total_price) = line.total_price else {
            continue;
        };

        // Amounts large enough to overflow the candidate computation carry
        // no testable NET/GROSS relationship; skip like other unusable
        // numerics.
        let Some(expected_net) = quantity.checked_mul(unit_price) else {
            continue;
        };
        let Some(expected_gross) = expected_net.checked_mul(Decimal::ONE + rate / dec!(100))
        else {
            continue;
        };
        let (Some(net_diff), Some(gross_diff)) = (
            total_price.checked_sub(expected_net).map(|d| d.abs()),
            total_price.checked_sub(expected_gross).map(|d| d.abs()),
        ) else {
            continue;
        };

        let field = format!("line_items[{index}].total_price");

        if net_diff <= SEMANTIC_TOLERANCE {
            outcomes.push(RuleOutcome::pass("SEMANTIC-NET-GROSS", Severity::Error));
        } else if gross_diff <= SEMANTIC_TOLERANCE {
            outcomes.push(RuleOutcome::fail(
                ValidationError::for_field(
                    "SEMANTIC-NET-GROSS",
                    Severity::Error,
                    field,
                    format!(
                        "line {}: total price {} matches the GROSS amount ({} x {} at {}% tax); \
                         the NET amount {} is required",
                        index + 1,
                        format_amount(total_price),
                        quantity,
                        format_amount(unit_price),
                        rate,
                        format_amount(expected_net)
                    ),
                )
                .with_values(format_amount(expected_net), format_amount(total_price)),
            ));
        } else {
            outcomes.push(RuleOutcome::fail(
                ValidationError::for_field(
                    "SEMANTIC-LINE-TOTAL-MISMATCH",
                    Severity::Error,
                    field,
                    format!(
                        "line {}: total price {} matches neither the NET amount {} nor the \
                         GROSS amount {}",
                        index + 1,
                        format_amount(total_price),
                        format_amount(expected_net),
                        format_amount(expected_gross)
                    ),
                )
                .with_values(format_amount(expected_net), format_amount(total_price)),
            ));
        }
    }
}
