//! Authored per-format obligation tables.
//!
//! Static configuration data, not derived. One row per supported format;
//! the hint strings feed the review surface next to each input field.

use super::{FieldObligation, FieldRule, FormatProfile, LogicalField, OutputFormat};

use FieldObligation::{Hidden, Optional, Required};
use LogicalField::*;

const fn rule(field: LogicalField, obligation: FieldObligation, hint: &'static str) -> FieldRule {
    FieldRule {
        field,
        obligation,
        hint,
    }
}

pub(super) fn profile_for(format: OutputFormat) -> &'static FormatProfile {
    match format {
        OutputFormat::XRechnungCii => &XRECHNUNG_CII,
        OutputFormat::XRechnungUbl => &XRECHNUNG_UBL,
        OutputFormat::Peppol => &PEPPOL,
        OutputFormat::FatturaPa => &FATTURAPA,
        OutputFormat::Ksef => &KSEF,
        OutputFormat::Zugferd => &ZUGFERD,
        OutputFormat::FacturX => &FACTURX,
    }
}

/// Shared field set of the bank-transfer-centric German XRechnung profiles.
/// CII and UBL differ in syntax, not in semantic obligations.
static XRECHNUNG_FIELDS: &[FieldRule] = &[
    rule(InvoiceNumber, Required, "Unique invoice number (BT-1)."),
    rule(InvoiceDate, Required, "Issue date, ISO form YYYY-MM-DD (BT-2)."),
    rule(CurrencyCode, Required, "ISO 4217 code, e.g. EUR (BT-5)."),
    rule(
        BuyerReference,
        Required,
        "Leitweg-ID routing the invoice to the public-sector buyer (BT-10).",
    ),
    rule(SellerName, Required, "Legal seller name (BT-27)."),
    rule(
        SellerVatId,
        Required,
        "USt-IdNr. or Steuernummer of the seller (BT-31/BT-32).",
    ),
    rule(SellerAddress, Required, "Full postal address of the seller."),
    rule(
        SellerPhone,
        Required,
        "Seller contact telephone (BT-42); the buyer must be able to reach a person.",
    ),
    rule(SellerEmail, Required, "Seller contact email (BT-43)."),
    rule(
        SellerIban,
        Required,
        "IBAN for SEPA credit transfer (BT-84).",
    ),
    rule(SellerBic, Optional, "BIC; only needed outside the SEPA area."),
    rule(SellerElectronicAddress, Optional, ""),
    rule(BuyerName, Required, "Buyer name (BT-44)."),
    rule(BuyerAddress, Required, "Full postal address of the buyer."),
    rule(BuyerElectronicAddress, Optional, ""),
    rule(PaymentTerms, Optional, "Free-text payment terms (BT-20)."),
    rule(LineItems, Required, "At least one invoice line (BG-25)."),
];

static XRECHNUNG_CII: FormatProfile = FormatProfile {
    format: OutputFormat::XRechnungCii,
    name: "XRechnung (CII)",
    fields: XRECHNUNG_FIELDS,
};

static XRECHNUNG_UBL: FormatProfile = FormatProfile {
    format: OutputFormat::XRechnungUbl,
    name: "XRechnung (UBL)",
    fields: XRECHNUNG_FIELDS,
};

static PEPPOL: FormatProfile = FormatProfile {
    format: OutputFormat::Peppol,
    name: "Peppol BIS Billing 3.0",
    fields: &[
        rule(InvoiceNumber, Required, "Unique invoice number (BT-1)."),
        rule(InvoiceDate, Required, "Issue date, ISO form YYYY-MM-DD (BT-2)."),
        rule(CurrencyCode, Required, "ISO 4217 code (BT-5)."),
        rule(
            BuyerReference,
            Required,
            "Buyer reference or order reference (PEPPOL-EN16931-R003).",
        ),
        rule(SellerName, Required, "Seller name (BT-27)."),
        rule(SellerVatId, Required, "Seller VAT identifier (BT-31)."),
        rule(SellerAddress, Required, "Seller postal address."),
        rule(
            SellerElectronicAddress,
            Required,
            "Seller Peppol endpoint ID (BT-34), e.g. 0204:99661234XX.",
        ),
        rule(
            BuyerElectronicAddress,
            Required,
            "Buyer Peppol endpoint ID (BT-49).",
        ),
        rule(SellerPhone, Optional, ""),
        rule(SellerIban, Hidden, "Payment routing is out of band on the Peppol network."),
        rule(SellerBic, Hidden, ""),
        rule(BuyerName, Required, "Buyer name (BT-44)."),
        rule(BuyerAddress, Required, "Buyer postal address."),
        rule(LineItems, Required, "At least one invoice line (BG-25)."),
    ],
};

static FATTURAPA: FormatProfile = FormatProfile {
    format: OutputFormat::FatturaPa,
    name: "FatturaPA",
    fields: &[
        rule(InvoiceNumber, Required, "Numero fattura (BT-1)."),
        rule(InvoiceDate, Required, "Data emissione, ISO form YYYY-MM-DD."),
        rule(CurrencyCode, Required, "ISO 4217 code; domestic invoices use EUR."),
        rule(SellerName, Required, "Seller legal name."),
        rule(SellerVatId, Required, "Partita IVA of the seller."),
        rule(SellerAddress, Required, "Seller postal address."),
        rule(BuyerName, Required, "Buyer legal name."),
        rule(BuyerVatId, Required, "Partita IVA or codice fiscale of the buyer."),
        rule(BuyerAddress, Required, "Buyer postal address."),
        rule(
            BuyerElectronicAddress,
            Required,
            "SDI destination code (7 chars) or PEC address.",
        ),
        rule(SellerIban, Hidden, "Collected by SDI payment metadata, not the invoice body."),
        rule(SellerBic, Hidden, ""),
        rule(LineItems, Required, "At least one invoice line."),
    ],
};

static KSEF: FormatProfile = FormatProfile {
    format: OutputFormat::Ksef,
    name: "KSeF",
    fields: &[
        rule(InvoiceNumber, Required, "Invoice number (P_2)."),
        rule(InvoiceDate, Required, "Issue date, ISO form YYYY-MM-DD (P_1)."),
        rule(CurrencyCode, Required, "ISO 4217 code; domestic invoices use PLN."),
        rule(SellerName, Required, "Seller name."),
        rule(SellerVatId, Required, "NIP of the seller."),
        rule(SellerAddress, Required, "Seller postal address."),
        rule(BuyerName, Required, "Buyer name."),
        rule(BuyerVatId, Required, "NIP of the buyer."),
        rule(BuyerAddress, Optional, ""),
        rule(SellerIban, Optional, "Bank account for the split-payment mechanism."),
        rule(LineItems, Required, "At least one invoice line."),
    ],
};

static ZUGFERD: FormatProfile = FormatProfile {
    format: OutputFormat::Zugferd,
    name: "ZUGFeRD (EN 16931)",
    fields: &[
        rule(InvoiceNumber, Required, "Unique invoice number (BT-1)."),
        rule(InvoiceDate, Required, "Issue date, ISO form YYYY-MM-DD (BT-2)."),
        rule(CurrencyCode, Required, "ISO 4217 code (BT-5)."),
        rule(
            BuyerReference,
            Required,
            "Leitweg-ID when invoicing German public-sector buyers (BT-10).",
        ),
        rule(SellerName, Required, "Seller name (BT-27)."),
        rule(SellerVatId, Required, "USt-IdNr. or Steuernummer (BT-31/BT-32)."),
        rule(SellerAddress, Required, "Seller postal address."),
        rule(SellerIban, Required, "IBAN for SEPA credit transfer (BT-84)."),
        rule(SellerPhone, Optional, ""),
        rule(BuyerName, Required, "Buyer name (BT-44)."),
        rule(BuyerAddress, Required, "Buyer postal address."),
        rule(LineItems, Required, "At least one invoice line (BG-25)."),
    ],
};

static FACTURX: FormatProfile = FormatProfile {
    format: OutputFormat::FacturX,
    name: "Factur-X (EN 16931)",
    fields: &[
        rule(InvoiceNumber, Required, "Unique invoice number (BT-1)."),
        rule(InvoiceDate, Required, "Issue date, ISO form YYYY-MM-DD (BT-2)."),
        rule(CurrencyCode, Required, "ISO 4217 code (BT-5)."),
        rule(BuyerReference, Optional, ""),
        rule(SellerName, Required, "Seller name (BT-27)."),
        rule(SellerVatId, Required, "Seller VAT identifier (BT-31)."),
        rule(SellerAddress, Required, "Seller postal address."),
        rule(SellerIban, Required, "IBAN for credit transfer (BT-84)."),
        rule(BuyerName, Required, "Buyer name (BT-44)."),
        rule(BuyerAddress, Required, "Buyer postal address."),
        rule(LineItems, Required, "At least one invoice line (BG-25)."),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicate_fields_within_a_row() {
        for format in OutputFormat::ALL {
            let profile = profile_for(format);
            let mut seen = std::collections::HashSet::new();
            for r in profile.fields {
                assert!(
                    seen.insert(r.field),
                    "{} lists {:?} twice",
                    format.id(),
                    r.field
                );
            }
        }
    }

    #[test]
    fn german_profiles_require_buyer_reference() {
        for format in [
            OutputFormat::XRechnungCii,
            OutputFormat::XRechnungUbl,
            OutputFormat::Zugferd,
        ] {
            assert_eq!(
                profile_for(format).obligation(LogicalField::BuyerReference),
                FieldObligation::Required
            );
        }
    }
}
