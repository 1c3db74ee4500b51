//! Core document types, validation, totals, and numbering.
//!
//! This module provides the computation and validation engine behind
//! invoice and quote forms: drafts hold raw form input, validators turn
//! them into typed records, and the calculators derive the HT / TVA / TTC
//! breakdown.

mod builder;
mod dates;
mod error;
pub mod messages;
mod numbering;
mod patterns;
mod settings;
mod totals;
mod types;
mod validation;

pub use builder::*;
pub use dates::*;
pub use error::*;
pub use messages::Locale;
pub use numbering::*;
pub use settings::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
