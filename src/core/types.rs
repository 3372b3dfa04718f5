use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::totals::compute_totals;

/// The normalized in-memory invoice, independent of any output wire format.
///
/// A `CanonicalInvoice` is built once per extraction/review session from an
/// AI-extracted payload, mutated field by field as a human reviewer edits
/// it, and re-derived/re-evaluated after every mutation. Every leaf that
/// upstream extraction can fail to produce is optional: missing data fails
/// the corresponding rule, it never rejects the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalInvoice {
    /// BT-1: Invoice number.
    pub invoice_number: Option<String>,
    /// BT-2: Issue date as extracted. Validated against the ISO calendar
    /// form (YYYY-MM-DD), not parsed eagerly.
    pub invoice_date: Option<String>,
    /// BT-5: Invoice currency code (ISO 4217, e.g. "EUR").
    pub currency_code: Option<String>,
    /// BT-10: Buyer reference (Leitweg-ID for the German profiles).
    pub buyer_reference: Option<String>,
    /// BG-4: Seller.
    pub seller: Party,
    /// BG-7: Buyer.
    pub buyer: Party,
    /// BT-20: Payment terms.
    pub payment: PaymentTerms,
    /// BG-25: Invoice lines.
    pub line_items: Vec<LineItem>,
    /// BG-20/BG-21: Document-level allowances and charges.
    pub allowance_charges: Vec<AllowanceCharge>,
    /// BG-22: Derived totals. Overwritten by [`recompute_totals`] on every
    /// pass; extracted totals never survive recomputation.
    ///
    /// [`recompute_totals`]: CanonicalInvoice::recompute_totals
    pub totals: Totals,
}

impl CanonicalInvoice {
    /// Deserialize an upstream extraction payload.
    ///
    /// Absent fields default rather than fail: a payload containing only
    /// `{"invoice_number": "RE-1"}` is a valid (if very incomplete)
    /// canonical invoice.
    pub fn from_json(payload: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Re-derive `totals` from the current line items and allowance/charges.
    ///
    /// Unconditional and format-independent. Call after every field
    /// mutation; repeated invocation on the same snapshot yields identical
    /// output.
    pub fn recompute_totals(&mut self) {
        self.totals = compute_totals(&self.line_items, &self.allowance_charges);
    }
}

/// BG-4 / BG-7: Seller or buyer party.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    /// BT-27 / BT-44: Name.
    pub name: Option<String>,
    /// BT-43 / BT-58: Contact email.
    pub email: Option<String>,
    /// BT-34 / BT-49: Electronic address (Peppol endpoint, SDI code, PEC).
    pub electronic_address: Option<String>,
    /// BT-42 / BT-57: Contact telephone.
    pub phone: Option<String>,
    /// BG-5 / BG-8: Postal address.
    pub address: Address,
    /// BT-31 / BT-48: VAT identifier (USt-IdNr., NIP, partita IVA).
    pub vat_id: Option<String>,
    /// BT-84: IBAN (seller side).
    pub iban: Option<String>,
    /// BT-86: BIC (seller side).
    pub bic: Option<String>,
}

/// BG-5 / BG-8: Postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// BT-35 / BT-50: Street and house number.
    pub street: Option<String>,
    /// BT-37 / BT-52: City.
    pub city: Option<String>,
    /// BT-38 / BT-53: Postal code.
    pub postal_code: Option<String>,
    /// BT-40 / BT-55: Country code (ISO 3166-1 alpha-2).
    pub country_code: Option<String>,
}

/// BT-20: Payment terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentTerms {
    /// Free-text terms ("Zahlbar innerhalb von 14 Tagen ohne Abzug").
    pub terms: Option<String>,
    /// BT-9: Due date as extracted.
    pub due_date: Option<String>,
}

/// BG-25: Invoice line item.
///
/// `total_price` carries the **net** line amount. That invariant is
/// checked, not assumed: the semantic heuristics flag lines where the
/// extracted value matches the gross figure instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// BT-153/BT-154: Item name or description.
    pub description: Option<String>,
    /// BT-129: Invoiced quantity.
    pub quantity: Option<Decimal>,
    /// BT-146: Item net price per unit.
    pub unit_price: Option<Decimal>,
    /// BT-131: Line net amount (quantity x unit price).
    pub total_price: Option<Decimal>,
    /// BT-152: Tax rate percentage. Absent when extraction could not
    /// determine it.
    pub tax_rate: Option<Decimal>,
    /// BT-151: UNTDID 5305 tax category letter code (e.g. "S", "AE").
    pub tax_category_code: Option<String>,
}

/// BG-20 / BG-21: Document-level allowance or charge.
///
/// `amount` is always non-negative; `charge_indicator` decides whether it
/// is added to or subtracted from the tax basis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceCharge {
    /// False = allowance (discount), true = charge (surcharge).
    pub charge_indicator: bool,
    /// BT-92 / BT-99: Amount, non-negative.
    pub amount: Option<Decimal>,
    /// BT-94 / BT-101: Percentage, if percentage-based.
    pub percentage: Option<Decimal>,
    /// BT-97 / BT-104: Reason text.
    pub reason: Option<String>,
    /// BT-96 / BT-103: Tax rate applicable to this adjustment.
    pub tax_rate: Option<Decimal>,
}

/// BG-22: Document totals, derived by [`compute_totals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    /// BT-109: Tax basis (line net sum minus allowances plus charges).
    pub subtotal: Decimal,
    /// BT-110: Total tax amount.
    pub tax_amount: Decimal,
    /// BT-112: Grand total including tax.
    pub total_amount: Decimal,
}
