//! IBAN structural and checksum validation (ISO 13616 / ISO 7064 mod 97-10).
//!
//! Structural check and checksum are separate so callers can report which
//! one failed. Both operate on a normalized IBAN; use [`normalize_iban`]
//! first, since extracted values often contain grouping spaces.

/// Strip whitespace and uppercase. Extracted IBANs frequently arrive as
/// "DE89 3704 0044 0532 0130 00".
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Check the IBAN structural pattern: 2 letters (country), 2 check digits,
/// then 4 to 30 alphanumerics.
pub fn has_iban_structure(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    if bytes.len() < 8 || bytes.len() > 34 {
        return false;
    }
    bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_alphanumeric)
}

/// ISO 7064 mod 97-10 checksum: move the first four characters to the end,
/// expand letters to two-digit values (A=10 .. Z=35), and the whole number
/// mod 97 must equal 1. Computed incrementally to avoid big-integer math.
pub fn has_valid_iban_checksum(iban: &str) -> bool {
    if !has_iban_structure(iban) {
        return false;
    }
    let rearranged = iban.bytes().skip(4).chain(iban.bytes().take(4));
    let mut remainder: u64 = 0;
    for b in rearranged {
        let value = if b.is_ascii_digit() {
            u64::from(b - b'0')
        } else {
            u64::from(b.to_ascii_uppercase() - b'A') + 10
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    remainder == 1
}
