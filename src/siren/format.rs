//! SIREN, SIRET and intra-community VAT number checks.

use thiserror::Error;

/// SIREN of La Poste, whose establishments do not follow the Luhn rule.
const LA_POSTE_SIREN: &str = "356000000";

/// Error returned when an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}': {reason}")]
pub struct IdentifierError {
    /// Which identifier was checked ("SIREN", "SIRET", "VAT number").
    pub kind: &'static str,
    /// The input value, whitespace removed.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl IdentifierError {
    fn new(kind: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

fn compact(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Luhn (mod 10) checksum over an all-digit string.
fn luhn(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Validate a SIREN (9 digits, Luhn checksum). Returns the compacted value.
///
/// ```
/// use facture::siren::validate_siren;
///
/// assert_eq!(validate_siren("732 829 320").unwrap(), "732829320");
/// assert!(validate_siren("732829321").is_err());
/// ```
pub fn validate_siren(raw: &str) -> Result<String, IdentifierError> {
    let siren = compact(raw);
    if siren.len() != 9 || !all_digits(&siren) {
        return Err(IdentifierError::new("SIREN", &siren, "must be exactly 9 digits"));
    }
    if !luhn(&siren) {
        return Err(IdentifierError::new("SIREN", &siren, "checksum mismatch"));
    }
    Ok(siren)
}

/// Validate a SIRET (SIREN + 5-digit NIC). Returns the compacted value.
///
/// La Poste establishments are checked with their own rule: the digit sum
/// must be a multiple of 5.
pub fn validate_siret(raw: &str) -> Result<String, IdentifierError> {
    let siret = compact(raw);
    if siret.len() != 14 || !all_digits(&siret) {
        return Err(IdentifierError::new("SIRET", &siret, "must be exactly 14 digits"));
    }
    let valid = if siret.starts_with(LA_POSTE_SIREN) {
        siret.bytes().map(|b| u32::from(b - b'0')).sum::<u32>() % 5 == 0
    } else {
        luhn(&siret)
    };
    if !valid {
        return Err(IdentifierError::new("SIRET", &siret, "checksum mismatch"));
    }
    Ok(siret)
}

/// The SIREN part of a valid SIRET.
pub fn siren_of_siret(raw: &str) -> Result<String, IdentifierError> {
    validate_siret(raw).map(|siret| siret[..9].to_string())
}

/// French VAT key for a SIREN: (12 + 3 × (SIREN mod 97)) mod 97.
fn vat_key(siren: &str) -> Option<u64> {
    let n: u64 = siren.parse().ok()?;
    Some((12 + 3 * (n % 97)) % 97)
}

/// Derive the French intra-community VAT number of a company.
///
/// ```
/// use facture::siren::vat_number_from_siren;
///
/// assert_eq!(vat_number_from_siren("732829320").unwrap(), "FR44732829320");
/// ```
pub fn vat_number_from_siren(raw: &str) -> Result<String, IdentifierError> {
    let siren = validate_siren(raw)?;
    let key = vat_key(&siren)
        .ok_or_else(|| IdentifierError::new("SIREN", &siren, "not a number"))?;
    Ok(format!("FR{key:02}{siren}"))
}

/// Length and charset of the national part of a non-French EU VAT number.
struct NationalFormat {
    country: &'static str,
    min: usize,
    max: usize,
    alphanumeric: bool,
}

const EU_FORMATS: &[NationalFormat] = &[
    NationalFormat { country: "AT", min: 9, max: 9, alphanumeric: true },
    NationalFormat { country: "BE", min: 10, max: 10, alphanumeric: false },
    NationalFormat { country: "DE", min: 9, max: 9, alphanumeric: false },
    NationalFormat { country: "DK", min: 8, max: 8, alphanumeric: false },
    NationalFormat { country: "ES", min: 9, max: 9, alphanumeric: true },
    NationalFormat { country: "IE", min: 8, max: 9, alphanumeric: true },
    NationalFormat { country: "IT", min: 11, max: 11, alphanumeric: false },
    NationalFormat { country: "LU", min: 8, max: 8, alphanumeric: false },
    NationalFormat { country: "NL", min: 12, max: 12, alphanumeric: true },
    NationalFormat { country: "PL", min: 10, max: 10, alphanumeric: false },
    NationalFormat { country: "PT", min: 9, max: 9, alphanumeric: false },
    NationalFormat { country: "SE", min: 12, max: 12, alphanumeric: false },
];

/// Validate an intra-community VAT number. Returns the compacted,
/// upper-cased value.
///
/// French numbers (`FR` + 2-character key + SIREN) are checked in full:
/// the SIREN checksum and, for numeric keys, the key itself. Other EU
/// numbers are checked by length and charset only.
pub fn validate_vat_number(raw: &str) -> Result<String, IdentifierError> {
    let vat = compact(raw).to_ascii_uppercase();
    if vat.len() < 4 || !vat.is_char_boundary(2) {
        return Err(IdentifierError::new(
            "VAT number",
            &vat,
            "too short, expected a 2-letter country code and a national number",
        ));
    }
    let (country, national) = vat.split_at(2);

    if country == "FR" {
        if national.len() != 11 || !national.is_char_boundary(2) {
            return Err(IdentifierError::new(
                "VAT number",
                &vat,
                "French VAT numbers are FR + 2-character key + 9-digit SIREN",
            ));
        }
        let (key, siren) = national.split_at(2);
        if !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdentifierError::new("VAT number", &vat, "invalid key characters"));
        }
        validate_siren(siren).map_err(|e| IdentifierError::new("VAT number", &vat, e.reason))?;
        if all_digits(key) {
            let expected = vat_key(siren).unwrap_or_default();
            if key.parse::<u64>().ok() != Some(expected) {
                return Err(IdentifierError::new(
                    "VAT number",
                    &vat,
                    format!("key {key} does not match SIREN (expected {expected:02})"),
                ));
            }
        }
        return Ok(vat);
    }

    let Some(format) = EU_FORMATS.iter().find(|f| f.country == country) else {
        return Err(IdentifierError::new(
            "VAT number",
            &vat,
            format!("unsupported country prefix '{country}'"),
        ));
    };
    let charset_ok = if format.alphanumeric {
        national.bytes().all(|b| b.is_ascii_alphanumeric())
    } else {
        all_digits(national)
    };
    if !(format.min..=format.max).contains(&national.len()) || !charset_ok {
        return Err(IdentifierError::new(
            "VAT number",
            &vat,
            format!("does not match the {country} national format"),
        ));
    }
    Ok(vat)
}
