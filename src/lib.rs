//! # facture
//!
//! Computation and validation core for French commercial documents
//! (factures and devis): per-line discounts, multi-rate TVA aggregation,
//! document-level discount allocation, and the field rules a compliant
//! invoice must satisfy (mention d'exonération at 0%, date ordering,
//! numbering and reference patterns).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every function is pure: validators return structured error lists and the
//! calculators never fail, so previews stay renderable while a form is
//! being edited.
//!
//! ## Quick Start
//!
//! ```rust
//! use facture::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new("Développement", dec!(2), "jour", dec!(100))
//!         .vat_rate(dec!(20))
//!         .build(),
//! ];
//!
//! let totals = compute_document_totals(&items, None);
//! assert_eq!(totals.total_ht, dec!(200));
//! assert_eq!(totals.total_vat, dec!(40));
//! assert_eq!(totals.final_total_ttc, dec!(240));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line items, totals, field validation, numbering |
//! | `siren` | SIREN / SIRET / TVA intracommunautaire checks, exemption mentions |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "siren")]
pub mod siren;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
