//! Monetary totals derivation.

use rust_decimal::Decimal;

use super::money::{cents_to_decimal, component_tax_cents, to_cents};
use super::types::{AllowanceCharge, LineItem, Totals};

/// Derive document totals from line items and document-level
/// allowances/charges.
///
/// Pure and total: there is no error path, missing or invalid numeric
/// fields count as zero, and the result never depends on whatever totals
/// upstream extraction claimed. The tax basis is the line net sum adjusted
/// by document-level allowances (subtracted) and charges (added); tax is
/// rounded per component and then summed, never computed against the
/// aggregate basis.
///
/// Callers re-run this after every field mutation. Identical input always
/// yields identical output, so redundant invocation is harmless.
pub fn compute_totals(lines: &[LineItem], allowance_charges: &[AllowanceCharge]) -> Totals {
    let mut line_net_cents: i64 = 0;
    let mut tax_cents: i64 = 0;

    for line in lines {
        let cents = to_cents(line.total_price);
        line_net_cents = line_net_cents.saturating_add(cents);
        if let Some(rate) = line.tax_rate {
            if rate > Decimal::ZERO {
                tax_cents = tax_cents.saturating_add(component_tax_cents(cents, rate));
            }
        }
    }

    let mut allowance_cents: i64 = 0;
    let mut charge_cents: i64 = 0;

    for ac in allowance_charges {
        let cents = to_cents(ac.amount);
        // Non-positive adjustment amounts are treated as absent.
        if cents <= 0 {
            continue;
        }
        let component_tax = match ac.tax_rate {
            Some(rate) if rate > Decimal::ZERO => component_tax_cents(cents, rate),
            _ => 0,
        };
        if ac.charge_indicator {
            charge_cents = charge_cents.saturating_add(cents);
            tax_cents = tax_cents.saturating_add(component_tax);
        } else {
            allowance_cents = allowance_cents.saturating_add(cents);
            tax_cents = tax_cents.saturating_sub(component_tax);
        }
    }

    let tax_basis_cents = line_net_cents
        .saturating_sub(allowance_cents)
        .saturating_add(charge_cents);

    Totals {
        subtotal: cents_to_decimal(tax_basis_cents),
        tax_amount: cents_to_decimal(tax_cents),
        total_amount: cents_to_decimal(tax_basis_cents.saturating_add(tax_cents)),
    }
}
