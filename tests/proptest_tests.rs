//! Property-based tests for the monetary derivation and rule evaluation.

use proptest::prelude::*;
use pruefwerk::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a reasonable price (0.01 to 99999.99).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a reasonable quantity (1 to 100).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1u32..=100u32).prop_map(Decimal::from)
}

/// Generate a tax rate the engine must handle (0%, reduced, standard).
fn arb_tax_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(5)),
        Just(dec!(7)),
        Just(dec!(19)),
        Just(dec!(21)),
        Just(dec!(23)),
    ]
}

/// Generate a consistent line item with a net total.
fn arb_line() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_price(), arb_tax_rate()).prop_map(|(quantity, unit_price, rate)| {
        LineItem {
            description: Some("Position".into()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            total_price: Some(quantity * unit_price),
            tax_rate: Some(rate),
            ..Default::default()
        }
    })
}

/// Generate 1-5 line items.
fn arb_lines() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_line(), 1..=5)
}

/// Generate an optional document-level allowance or charge.
fn arb_adjustments() -> impl Strategy<Value = Vec<AllowanceCharge>> {
    prop::collection::vec(
        (any::<bool>(), 1u64..100_000u64, arb_tax_rate()).prop_map(
            |(charge_indicator, cents, rate)| AllowanceCharge {
                charge_indicator,
                amount: Some(Decimal::new(cents as i64, 2)),
                tax_rate: Some(rate),
                ..Default::default()
            },
        ),
        0..=2,
    )
}

// ── Properties ──────────────────────────────────────────────────────────────

proptest! {
    /// Recomputing totals from the same snapshot is idempotent.
    #[test]
    fn compute_totals_is_idempotent(lines in arb_lines(), adjustments in arb_adjustments()) {
        let first = compute_totals(&lines, &adjustments);
        let second = compute_totals(&lines, &adjustments);
        prop_assert_eq!(first, second);
    }

    /// Derived totals always balance within the money tolerance.
    #[test]
    fn derived_totals_balance(lines in arb_lines(), adjustments in arb_adjustments()) {
        let totals = compute_totals(&lines, &adjustments);
        let diff = (totals.subtotal + totals.tax_amount - totals.total_amount).abs();
        prop_assert!(diff <= MONEY_TOLERANCE);
    }

    /// Every derived amount carries exactly two decimal places.
    #[test]
    fn derived_totals_are_cent_precise(lines in arb_lines(), adjustments in arb_adjustments()) {
        let totals = compute_totals(&lines, &adjustments);
        for amount in [totals.subtotal, totals.tax_amount, totals.total_amount] {
            prop_assert_eq!(amount.round_dp(2), amount);
        }
    }

    /// Derived totals never fail the arithmetic rules.
    #[test]
    fn derived_totals_pass_arithmetic_rules(lines in arb_lines(), adjustments in arb_adjustments()) {
        let mut invoice = CanonicalInvoice::default();
        invoice.line_items = lines;
        invoice.allowance_charges = adjustments;
        invoice.recompute_totals();
        let errors = evaluate(&invoice, OutputFormat::Peppol);
        prop_assert!(errors.iter().all(|e| !e.rule.starts_with("BR-CO-")));
    }

    /// Consistent net lines never trip the gross heuristic.
    #[test]
    fn net_lines_never_flag_gross(lines in arb_lines()) {
        let mut invoice = CanonicalInvoice::default();
        invoice.line_items = lines;
        invoice.recompute_totals();
        let errors = evaluate(&invoice, OutputFormat::Peppol);
        prop_assert!(errors.iter().all(|e| !e.rule.starts_with("SEMANTIC")));
    }

    /// Evaluation is a pure function of the snapshot.
    #[test]
    fn evaluation_is_deterministic(lines in arb_lines()) {
        let mut invoice = CanonicalInvoice::default();
        invoice.invoice_number = Some("RE-PROP".into());
        invoice.line_items = lines;
        invoice.recompute_totals();
        let first = check(&invoice, OutputFormat::XRechnungCii);
        let second = check(&invoice, OutputFormat::XRechnungCii);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(&a.rule, &b.rule);
            prop_assert_eq!(a.passed, b.passed);
        }
    }

    /// The model round-trips through its JSON payload form.
    #[test]
    fn payload_roundtrip_preserves_evaluation(lines in arb_lines()) {
        let mut invoice = CanonicalInvoice::default();
        invoice.invoice_number = Some("RE-PROP".into());
        invoice.line_items = lines;
        invoice.recompute_totals();

        let payload = serde_json::to_string(&invoice).unwrap();
        let reparsed = CanonicalInvoice::from_json(&payload).unwrap();
        let before = summarize(&check(&invoice, OutputFormat::Peppol));
        let after = summarize(&check(&reparsed, OutputFormat::Peppol));
        prop_assert_eq!(before, after);
    }
}
