//! Format-scoped presence rules and structural field checks.

use chrono::NaiveDate;

use crate::core::iban::{has_iban_structure, has_valid_iban_checksum, normalize_iban};
use crate::core::{CanonicalInvoice, Severity, ValidationError};
use crate::profile::{FieldObligation, FormatProfile, LogicalField, OutputFormat};

use super::RuleOutcome;

/// One presence outcome per field the profile marks required.
pub(super) fn check_presence(
    invoice: &CanonicalInvoice,
    profile: &FormatProfile,
    format: OutputFormat,
    outcomes: &mut Vec<RuleOutcome>,
) {
    for field in profile.required_fields() {
        // The German public-sector profiles treat a missing Leitweg-ID as
        // a warning: many B2B buyers simply do not issue one.
        let severity = if field == LogicalField::BuyerReference && format.is_german_profile() {
            Severity::Warning
        } else {
            Severity::Error
        };
        check_one_presence(invoice, field, severity, outcomes);
    }
}

/// Presence check for a single logical field.
pub(super) fn check_one_presence(
    invoice: &CanonicalInvoice,
    field: LogicalField,
    severity: Severity,
    outcomes: &mut Vec<RuleOutcome>,
) {
    let rule = field.presence_rule();
    if field_present(invoice, field) {
        outcomes.push(RuleOutcome::pass(rule, severity));
    } else {
        outcomes.push(RuleOutcome::fail(ValidationError::for_field(
            rule,
            severity,
            field.key(),
            match field {
                LogicalField::LineItems => "invoice must have at least one line item".to_string(),
                _ => format!("{} must not be empty", field.key()),
            },
        )));
    }
}

/// Structural rules: ISO date form, IBAN pattern and checksum.
///
/// The date rule runs for every date field carrying a value. The IBAN rule
/// only runs where the registry marks the IBAN required; its absence is
/// already covered by the presence rule.
pub(super) fn check_structure(
    invoice: &CanonicalInvoice,
    profile: &FormatProfile,
    outcomes: &mut Vec<RuleOutcome>,
) {
    check_iso_date(invoice.invoice_date.as_deref(), "invoice_date", outcomes);
    check_iso_date(
        invoice.payment.due_date.as_deref(),
        "payment.due_date",
        outcomes,
    );

    if profile.obligation(LogicalField::SellerIban) == FieldObligation::Required {
        if let Some(raw) = invoice.seller.iban.as_deref() {
            let iban = normalize_iban(raw);
            if iban.is_empty() {
                // blank, already failed the presence rule
            } else if !has_iban_structure(&iban) {
                outcomes.push(RuleOutcome::fail(ValidationError::for_field(
                    "FORMAT-IBAN",
                    Severity::Error,
                    "seller.iban",
                    format!(
                        "'{raw}' does not match the IBAN pattern (2 letters, 2 digits, 4-30 alphanumerics)"
                    ),
                )));
            } else if !has_valid_iban_checksum(&iban) {
                outcomes.push(RuleOutcome::fail(ValidationError::for_field(
                    "FORMAT-IBAN",
                    Severity::Error,
                    "seller.iban",
                    format!("'{raw}' fails the ISO 7064 mod-97 checksum"),
                )));
            } else {
                outcomes.push(RuleOutcome::pass("FORMAT-IBAN", Severity::Error));
            }
        }
    }
}

fn check_iso_date(raw: Option<&str>, field: &'static str, outcomes: &mut Vec<RuleOutcome>) {
    let Some(date) = raw.map(str::trim).filter(|d| !d.is_empty()) else {
        return;
    };
    // chrono accepts unpadded months/days, ISO 8601 does not.
    let well_formed = date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok();
    if well_formed {
        outcomes.push(RuleOutcome::pass("FORMAT-DATE-ISO", Severity::Error));
    } else {
        outcomes.push(RuleOutcome::fail(
            ValidationError::for_field(
                "FORMAT-DATE-ISO",
                Severity::Error,
                field,
                format!("'{date}' is not an ISO calendar date (YYYY-MM-DD)"),
            )
            .with_values("YYYY-MM-DD", date),
        ));
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn field_present(invoice: &CanonicalInvoice, field: LogicalField) -> bool {
    match field {
        LogicalField::InvoiceNumber => filled(&invoice.invoice_number),
        LogicalField::InvoiceDate => filled(&invoice.invoice_date),
        LogicalField::CurrencyCode => filled(&invoice.currency_code),
        LogicalField::BuyerReference => filled(&invoice.buyer_reference),
        LogicalField::SellerName => filled(&invoice.seller.name),
        LogicalField::SellerVatId => filled(&invoice.seller.vat_id),
        LogicalField::SellerAddress => address_present(invoice, true),
        LogicalField::SellerEmail => filled(&invoice.seller.email),
        LogicalField::SellerPhone => filled(&invoice.seller.phone),
        LogicalField::SellerIban => filled(&invoice.seller.iban),
        LogicalField::SellerBic => filled(&invoice.seller.bic),
        LogicalField::SellerElectronicAddress => filled(&invoice.seller.electronic_address),
        LogicalField::BuyerName => filled(&invoice.buyer.name),
        LogicalField::BuyerVatId => filled(&invoice.buyer.vat_id),
        LogicalField::BuyerAddress => address_present(invoice, false),
        LogicalField::BuyerElectronicAddress => filled(&invoice.buyer.electronic_address),
        LogicalField::PaymentTerms => filled(&invoice.payment.terms),
        LogicalField::LineItems => !invoice.line_items.is_empty(),
    }
}

/// An address counts as present when street, city, postal code, and
/// country are all filled.
fn address_present(invoice: &CanonicalInvoice, seller: bool) -> bool {
    let address = if seller {
        &invoice.seller.address
    } else {
        &invoice.buyer.address
    };
    filled(&address.street)
        && filled(&address.city)
        && filled(&address.postal_code)
        && filled(&address.country_code)
}
