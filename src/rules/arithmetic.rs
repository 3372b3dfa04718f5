//! Arithmetic consistency rules (BR-CO family).
//!
//! Each rule compares the stored totals against a fresh recomputation and
//! tolerates up to [`MONEY_TOLERANCE`] of accumulated rounding.

use crate::core::{
    CanonicalInvoice, MONEY_TOLERANCE, Severity, ValidationError, compute_totals, format_amount,
};

use super::RuleOutcome;

pub(super) fn check_arithmetic(invoice: &CanonicalInvoice, outcomes: &mut Vec<RuleOutcome>) {
    let recomputed = compute_totals(&invoice.line_items, &invoice.allowance_charges);
    let totals = &invoice.totals;

    // BR-CO-10: the allowance/charge-adjusted line sum must match the
    // stored subtotal.
    let subtotal_diff = recomputed.subtotal.saturating_sub(totals.subtotal).abs();
    if subtotal_diff <= MONEY_TOLERANCE {
        outcomes.push(RuleOutcome::pass("BR-CO-10", Severity::Error));
    } else {
        outcomes.push(RuleOutcome::fail(
            ValidationError::for_field(
                "BR-CO-10",
                Severity::Error,
                "totals.subtotal",
                format!(
                    "subtotal {} does not match the adjusted line sum {}",
                    format_amount(totals.subtotal),
                    format_amount(recomputed.subtotal)
                ),
            )
            .with_values(
                format_amount(recomputed.subtotal),
                format_amount(totals.subtotal),
            ),
        ));
    }

    // BR-CO-14: the stored tax amount must match the per-component
    // recomputation.
    let tax_diff = recomputed.tax_amount.saturating_sub(totals.tax_amount).abs();
    if tax_diff <= MONEY_TOLERANCE {
        outcomes.push(RuleOutcome::pass("BR-CO-14", Severity::Error));
    } else {
        outcomes.push(RuleOutcome::fail(
            ValidationError::for_field(
                "BR-CO-14",
                Severity::Error,
                "totals.tax_amount",
                format!(
                    "tax amount {} does not match the recomputed tax {}",
                    format_amount(totals.tax_amount),
                    format_amount(recomputed.tax_amount)
                ),
            )
            .with_values(
                format_amount(recomputed.tax_amount),
                format_amount(totals.tax_amount),
            ),
        ));
    }

    check_balance(invoice, outcomes);
}

/// BR-CO-15: subtotal + tax must equal the grand total. Also part of the
/// minimal fallback subset for unknown format ids.
pub(super) fn check_balance(invoice: &CanonicalInvoice, outcomes: &mut Vec<RuleOutcome>) {
    let totals = &invoice.totals;
    // Stored totals arrive straight from the payload; saturate rather
    // than overflow on absurd values, which fail the rule anyway.
    let expected = totals.subtotal.saturating_add(totals.tax_amount);
    let diff = expected.saturating_sub(totals.total_amount).abs();
    if diff <= MONEY_TOLERANCE {
        outcomes.push(RuleOutcome::pass("BR-CO-15", Severity::Error));
    } else {
        outcomes.push(RuleOutcome::fail(
            ValidationError::for_field(
                "BR-CO-15",
                Severity::Error,
                "totals.total_amount",
                format!(
                    "total {} does not equal subtotal {} + tax {}",
                    format_amount(totals.total_amount),
                    format_amount(totals.subtotal),
                    format_amount(totals.tax_amount)
                ),
            )
            .with_values(format_amount(expected), format_amount(totals.total_amount)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LineItem, Totals};
    use rust_decimal_macros::dec;

    fn invoice_with_line() -> CanonicalInvoice {
        let mut invoice = CanonicalInvoice::default();
        invoice.line_items.push(LineItem {
            total_price: Some(dec!(100.00)),
            tax_rate: Some(dec!(19)),
            ..Default::default()
        });
        invoice.recompute_totals();
        invoice
    }

    fn failures(invoice: &CanonicalInvoice) -> Vec<String> {
        let mut outcomes = Vec::new();
        check_arithmetic(invoice, &mut outcomes);
        outcomes
            .into_iter()
            .filter(|o| !o.passed)
            .map(|o| o.rule)
            .collect()
    }

    #[test]
    fn recomputed_totals_pass_all_arithmetic_rules() {
        assert!(failures(&invoice_with_line()).is_empty());
    }

    #[test]
    fn stale_subtotal_fails_br_co_10() {
        let mut invoice = invoice_with_line();
        invoice.totals.subtotal = dec!(90.00);
        let rules = failures(&invoice);
        assert!(rules.contains(&"BR-CO-10".to_string()));
    }

    #[test]
    fn stale_tax_fails_br_co_14_with_values() {
        let mut invoice = invoice_with_line();
        invoice.totals.tax_amount = dec!(7.00);
        let mut outcomes = Vec::new();
        check_arithmetic(&invoice, &mut outcomes);
        let failure = outcomes
            .iter()
            .find(|o| o.rule == "BR-CO-14" && !o.passed)
            .and_then(|o| o.error.as_ref())
            .unwrap();
        assert_eq!(failure.expected.as_deref(), Some("19.00"));
        assert_eq!(failure.actual.as_deref(), Some("7.00"));
    }

    #[test]
    fn unbalanced_totals_fail_br_co_15() {
        let mut invoice = invoice_with_line();
        invoice.totals = Totals {
            subtotal: dec!(100.00),
            tax_amount: dec!(19.00),
            total_amount: dec!(120.00),
        };
        assert!(failures(&invoice).contains(&"BR-CO-15".to_string()));
    }

    #[test]
    fn astronomical_stored_totals_fail_without_aborting() {
        use rust_decimal::Decimal;
        let mut invoice = invoice_with_line();
        invoice.totals = Totals {
            subtotal: Decimal::MAX,
            tax_amount: Decimal::MAX,
            total_amount: Decimal::MIN,
        };
        let rules = failures(&invoice);
        assert!(rules.contains(&"BR-CO-10".to_string()));
        assert!(rules.contains(&"BR-CO-14".to_string()));
        assert!(rules.contains(&"BR-CO-15".to_string()));
    }

    #[test]
    fn two_cent_drift_is_tolerated() {
        let mut invoice = invoice_with_line();
        invoice.totals.total_amount = dec!(119.02);
        assert!(!failures(&invoice).contains(&"BR-CO-15".to_string()));
        invoice.totals.total_amount = dec!(119.03);
        assert!(failures(&invoice).contains(&"BR-CO-15".to_string()));
    }
}
