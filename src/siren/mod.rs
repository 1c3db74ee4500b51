//! French company identifiers and VAT exemption mentions.
//!
//! Validates SIREN / SIRET numbers and intra-community VAT numbers by
//! checksum (no network call), and lists the legal mentions required on
//! 0% lines.
//!
//! # Example
//!
//! ```
//! use facture::siren::*;
//!
//! assert!(validate_siret("732 829 320 00074").is_ok());
//! assert_eq!(vat_number_from_siren("732829320").unwrap(), "FR44732829320");
//! assert_eq!(
//!     ExemptionReason::detect("TVA non applicable, art. 293 B du CGI"),
//!     Some(ExemptionReason::Franchise)
//! );
//! ```

mod exemption;
mod format;

pub use exemption::ExemptionReason;
pub use format::{
    IdentifierError, siren_of_siret, validate_siren, validate_siret, validate_vat_number,
    vat_number_from_siren,
};
