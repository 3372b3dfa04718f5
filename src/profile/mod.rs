//! Format profiles: which fields each destination e-invoicing profile
//! requires, and the rule subsets the evaluator enforces per profile.
//!
//! Adding a format means adding a registry row in [`registry`], not a new
//! code path; the evaluator stays free of per-format branching.

mod registry;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// Supported destination e-invoicing profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// German XRechnung, UN/CEFACT CII syntax.
    XRechnungCii,
    /// German XRechnung, OASIS UBL syntax.
    XRechnungUbl,
    /// Peppol BIS Billing 3.0.
    Peppol,
    /// Italian FatturaPA, routed through the SDI exchange.
    FatturaPa,
    /// Polish KSeF structured invoice.
    Ksef,
    /// ZUGFeRD hybrid PDF/A-3 with embedded CII.
    Zugferd,
    /// Factur-X hybrid PDF/A-3 (the French twin of ZUGFeRD).
    FacturX,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 7] = [
        Self::XRechnungCii,
        Self::XRechnungUbl,
        Self::Peppol,
        Self::FatturaPa,
        Self::Ksef,
        Self::Zugferd,
        Self::FacturX,
    ];

    /// Stable format identifier used by callers selecting a profile.
    pub fn id(&self) -> &'static str {
        match self {
            Self::XRechnungCii => "xrechnung-cii",
            Self::XRechnungUbl => "xrechnung-ubl",
            Self::Peppol => "peppol",
            Self::FatturaPa => "fatturapa",
            Self::Ksef => "ksef",
            Self::Zugferd => "zugferd",
            Self::FacturX => "facturx",
        }
    }

    /// Parse from a format identifier.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "xrechnung-cii" => Some(Self::XRechnungCii),
            "xrechnung-ubl" => Some(Self::XRechnungUbl),
            "peppol" => Some(Self::Peppol),
            "fatturapa" => Some(Self::FatturaPa),
            "ksef" => Some(Self::Ksef),
            "zugferd" => Some(Self::Zugferd),
            "facturx" => Some(Self::FacturX),
            _ => None,
        }
    }

    /// German public-sector profiles downgrade the buyer-reference
    /// presence rule from error to warning.
    pub(crate) fn is_german_profile(&self) -> bool {
        matches!(self, Self::XRechnungCii | Self::XRechnungUbl | Self::Zugferd)
    }
}

impl FromStr for OutputFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| EngineError::UnknownFormat(s.to_string()))
    }
}

/// Whether a field must, may, or must not be shown and filled for a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldObligation {
    Required,
    Optional,
    Hidden,
}

/// Logical field names referenced by the presence rules and the review
/// surface. Each maps to one location in the canonical invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    InvoiceNumber,
    InvoiceDate,
    CurrencyCode,
    BuyerReference,
    SellerName,
    SellerVatId,
    SellerAddress,
    SellerEmail,
    SellerPhone,
    SellerIban,
    SellerBic,
    SellerElectronicAddress,
    BuyerName,
    BuyerVatId,
    BuyerAddress,
    BuyerElectronicAddress,
    PaymentTerms,
    LineItems,
}

impl LogicalField {
    pub const ALL: [LogicalField; 18] = [
        Self::InvoiceNumber,
        Self::InvoiceDate,
        Self::CurrencyCode,
        Self::BuyerReference,
        Self::SellerName,
        Self::SellerVatId,
        Self::SellerAddress,
        Self::SellerEmail,
        Self::SellerPhone,
        Self::SellerIban,
        Self::SellerBic,
        Self::SellerElectronicAddress,
        Self::BuyerName,
        Self::BuyerVatId,
        Self::BuyerAddress,
        Self::BuyerElectronicAddress,
        Self::PaymentTerms,
        Self::LineItems,
    ];

    /// Stable key used in error field paths and configuration.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "invoice_number",
            Self::InvoiceDate => "invoice_date",
            Self::CurrencyCode => "currency_code",
            Self::BuyerReference => "buyer_reference",
            Self::SellerName => "seller.name",
            Self::SellerVatId => "seller.vat_id",
            Self::SellerAddress => "seller.address",
            Self::SellerEmail => "seller.email",
            Self::SellerPhone => "seller.phone",
            Self::SellerIban => "seller.iban",
            Self::SellerBic => "seller.bic",
            Self::SellerElectronicAddress => "seller.electronic_address",
            Self::BuyerName => "buyer.name",
            Self::BuyerVatId => "buyer.vat_id",
            Self::BuyerAddress => "buyer.address",
            Self::BuyerElectronicAddress => "buyer.electronic_address",
            Self::PaymentTerms => "payment.terms",
            Self::LineItems => "line_items",
        }
    }

    /// Business-rule code covering this field's presence requirement.
    /// Codes reuse the EN 16931 / BR-DE / PEPPOL families.
    pub(crate) fn presence_rule(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "BR-02",
            Self::InvoiceDate => "BR-03",
            Self::CurrencyCode => "BR-05",
            Self::BuyerReference => "BR-DE-15",
            Self::SellerName => "BR-06",
            Self::SellerVatId => "BR-CO-26",
            Self::SellerAddress => "BR-08",
            Self::SellerEmail => "BR-DE-7",
            Self::SellerPhone => "BR-DE-6",
            Self::SellerIban => "BR-DE-24",
            Self::SellerBic => "BR-DE-19",
            Self::SellerElectronicAddress => "PEPPOL-EN16931-R020",
            Self::BuyerName => "BR-07",
            Self::BuyerVatId => "BR-CO-09",
            Self::BuyerAddress => "BR-10",
            Self::BuyerElectronicAddress => "PEPPOL-EN16931-R010",
            Self::PaymentTerms => "BR-DE-1",
            Self::LineItems => "BR-16",
        }
    }
}

/// One field's authored rule within a format profile.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: LogicalField,
    pub obligation: FieldObligation,
    /// Free-text guidance for the editing surface.
    pub hint: &'static str,
}

/// One registry row: the static obligation matrix for a format.
///
/// Data only, authored per supported format; consulted by the rule
/// evaluator and by the external field-rendering collaborator.
#[derive(Debug)]
pub struct FormatProfile {
    pub format: OutputFormat,
    /// Display name for the review surface.
    pub name: &'static str,
    /// Ordered field rules. Fields not listed resolve to `Optional`.
    fields: &'static [FieldRule],
}

impl FormatProfile {
    /// Look up the registry row for a format. Total: every variant has one.
    pub fn for_format(format: OutputFormat) -> &'static FormatProfile {
        registry::profile_for(format)
    }

    /// Obligation level for a field; `Optional` when the profile does not
    /// constrain it.
    pub fn obligation(&self, field: LogicalField) -> FieldObligation {
        self.fields
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.obligation)
            .unwrap_or(FieldObligation::Optional)
    }

    /// Hint text for a field, if the profile carries one.
    pub fn hint(&self, field: LogicalField) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|r| r.field == field && !r.hint.is_empty())
            .map(|r| r.hint)
    }

    /// The ordered required fields of this profile.
    pub fn required_fields(&self) -> impl Iterator<Item = LogicalField> + '_ {
        self.fields
            .iter()
            .filter(|r| r.obligation == FieldObligation::Required)
            .map(|r| r.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_id_roundtrip() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::parse(format.id()), Some(format));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(OutputFormat::parse("edifact"), None);
        assert!("edifact".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn registry_is_total() {
        // Every format has a row; every logical field resolves.
        for format in OutputFormat::ALL {
            let profile = FormatProfile::for_format(format);
            assert_eq!(profile.format, format);
            for field in LogicalField::ALL {
                // Must not panic; unconstrained fields default to Optional.
                let _ = profile.obligation(field);
            }
        }
    }

    #[test]
    fn every_profile_requires_the_universal_core() {
        for format in OutputFormat::ALL {
            let profile = FormatProfile::for_format(format);
            for field in [
                LogicalField::InvoiceNumber,
                LogicalField::InvoiceDate,
                LogicalField::SellerName,
                LogicalField::LineItems,
            ] {
                assert_eq!(
                    profile.obligation(field),
                    FieldObligation::Required,
                    "{} must require {:?}",
                    format.id(),
                    field
                );
            }
        }
    }

    #[test]
    fn iban_scoping_differs_between_profiles() {
        let xrechnung = FormatProfile::for_format(OutputFormat::XRechnungCii);
        let peppol = FormatProfile::for_format(OutputFormat::Peppol);
        assert_eq!(
            xrechnung.obligation(LogicalField::SellerIban),
            FieldObligation::Required
        );
        assert_eq!(
            peppol.obligation(LogicalField::SellerIban),
            FieldObligation::Hidden
        );
    }

    #[test]
    fn peppol_enforces_electronic_addresses_instead_of_phone() {
        let peppol = FormatProfile::for_format(OutputFormat::Peppol);
        assert_eq!(
            peppol.obligation(LogicalField::SellerElectronicAddress),
            FieldObligation::Required
        );
        assert_eq!(
            peppol.obligation(LogicalField::BuyerElectronicAddress),
            FieldObligation::Required
        );
        assert_ne!(
            peppol.obligation(LogicalField::SellerPhone),
            FieldObligation::Required
        );
    }

    #[test]
    fn hints_exist_for_required_fields_with_guidance() {
        let xrechnung = FormatProfile::for_format(OutputFormat::XRechnungCii);
        assert!(
            xrechnung
                .hint(LogicalField::BuyerReference)
                .is_some_and(|h| h.contains("Leitweg"))
        );
    }
}
