//! Integer-cent arithmetic helpers.
//!
//! All monetary derivation runs on integer cents: every incoming amount is
//! converted once via half-up rounding, summed as `i64`, and only rendered
//! back to a 2-decimal [`Decimal`] at the output boundary. Accumulating in
//! decimal fractions drifts on cent boundaries, and financial documents
//! fail legal validation on cent-level discrepancies.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Absolute tolerance for monetary comparisons.
/// Line-level rounding can accumulate up to 2 cents when many components
/// are summed per rate; KoSIT accepts this tolerance for BR-CO-17.
pub const MONEY_TOLERANCE: Decimal = dec!(0.02);

/// Convert a possibly-missing amount to integer cents, rounding half-up
/// (kaufmännische Rundung). Missing, overflowing, or unrepresentable values
/// degrade to 0; upstream extraction is allowed to hand us garbage.
pub(crate) fn to_cents(amount: Option<Decimal>) -> i64 {
    amount
        .and_then(|a| a.checked_mul(dec!(100)))
        .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|c| c.to_i64())
        .unwrap_or(0)
}

/// Tax cents for one component: `cents * rate / 100`, rounded half-up.
/// Component-level rounding before summation is mandated by the governing
/// tax-basis rule; rounding a single aggregate rate against the basis gives
/// different (wrong) cents. Overflowing rates degrade to 0 tax.
pub(crate) fn component_tax_cents(cents: i64, rate: Decimal) -> i64 {
    Decimal::from(cents)
        .checked_mul(rate)
        .map(|t| (t / dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|t| t.to_i64())
        .unwrap_or(0)
}

/// Render integer cents as a `Decimal` with exactly 2 fractional digits.
pub(crate) fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Format an amount with exactly two decimals for expected/actual
/// reporting ("19.90", not "19.9").
pub fn format_amount(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_conversion_rounds_half_up() {
        assert_eq!(to_cents(Some(dec!(19.90))), 1990);
        assert_eq!(to_cents(Some(dec!(19.905))), 1991);
        assert_eq!(to_cents(Some(dec!(19.904))), 1990);
        assert_eq!(to_cents(Some(dec!(-0.005))), -1);
    }

    #[test]
    fn missing_amount_is_zero_cents() {
        assert_eq!(to_cents(None), 0);
    }

    #[test]
    fn overflowing_amounts_degrade_to_zero_cents() {
        assert_eq!(to_cents(Some(Decimal::MAX)), 0);
        assert_eq!(to_cents(Some(Decimal::MIN)), 0);
        assert_eq!(component_tax_cents(i64::MAX, Decimal::MAX), 0);
    }

    #[test]
    fn component_tax_rounds_per_component() {
        // 0.05 at 19% = 0.0095, rounds to 1 cent
        assert_eq!(component_tax_cents(5, dec!(19)), 1);
        // 19.90 at 19% = 3.781, rounds to 3.78
        assert_eq!(component_tax_cents(1990, dec!(19)), 378);
        assert_eq!(component_tax_cents(1990, Decimal::ZERO), 0);
    }

    #[test]
    fn format_amount_pads_to_two_decimals() {
        assert_eq!(format_amount(dec!(19.9)), "19.90");
        assert_eq!(format_amount(dec!(19.905)), "19.91");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn cents_to_decimal_keeps_scale() {
        assert_eq!(format_amount(cents_to_decimal(1990)), "19.90");
        assert_eq!(cents_to_decimal(0), Decimal::ZERO);
    }
}
