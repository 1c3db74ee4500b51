use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::messages::Locale;

/// Errors that can occur while building documents or checking numbers.
///
/// Field validation never produces this type directly: validators return a
/// [`Validation`] so every failing field can be reported at once.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactureError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Totals or arithmetic inconsistency.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

/// The five families of user-correctable validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A mandatory field is empty or absent.
    RequiredField,
    /// A value fails its charset, format, or length pattern.
    PatternMismatch,
    /// A numeric value is outside its range (including unparseable input).
    RangeError,
    /// A date violates a required ordering against another date.
    OrderingViolation,
    /// VAT rate is exactly 0 but no exemption mention is given.
    MissingExemptionMention,
}

/// Precise reason behind a [`ValidationError`].
///
/// Codes carry no language; [`MessageCode::localize`] turns them into
/// user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCode {
    Required,
    IssueDateRequired,
    DueDateRequired,
    ValidUntilRequired,
    InvalidDate,
    DescriptionInvalid,
    UnitInvalid,
    InvalidCharacters,
    TooLong { max: usize },
    InvalidUrl,
    LinkTitleRequired,
    NotANumber,
    QuantityNotPositive,
    UnitPriceNotPositive,
    UnitPriceNegative,
    VatRateOutOfRange,
    DiscountNegative,
    PercentageAbove100,
    TooManyItems { max: usize },
    ExemptionMentionRequired,
    DueBeforeIssue,
    ValidUntilBeforeIssue,
    ExecutionBeforeIssue,
}

/// A single validation error with field path, kind, and reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[2].vat_rate").
    pub field: String,
    /// Error family.
    pub kind: ErrorKind,
    /// Specific reason, localized on demand.
    pub code: MessageCode,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message(Locale::default()))
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ErrorKind, code: MessageCode) -> Self {
        Self {
            field: field.into(),
            kind,
            code,
        }
    }

    /// Shorthand for a [`ErrorKind::RequiredField`] error with the generic message.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, ErrorKind::RequiredField, MessageCode::Required)
    }

    /// User-facing message in the given locale.
    pub fn message(&self, locale: Locale) -> String {
        self.code.localize(locale)
    }

    /// Same error re-rooted under a parent path, e.g. `items[0].`.
    pub fn nested(self, parent: &str) -> Self {
        Self {
            field: format!("{parent}.{}", self.field),
            ..self
        }
    }
}

/// Outcome of a validation pass: every failing field, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    errors: Vec<ValidationError>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append another pass, re-rooting its fields under `parent` when given.
    pub fn merge(&mut self, other: Validation, parent: Option<&str>) {
        match parent {
            Some(parent) => self
                .errors
                .extend(other.errors.into_iter().map(|e| e.nested(parent))),
            None => self.errors.extend(other.errors),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// All errors reported on exactly `field`.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// First error reported on `field`, if any.
    pub fn first_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn has_kind(&self, field: &str, kind: ErrorKind) -> bool {
        self.errors_for(field).any(|e| e.kind == kind)
    }

    /// Per-field messages for inline display; the first error of each field wins.
    pub fn messages(&self, locale: Locale) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for error in &self.errors {
            out.entry(error.field.clone())
                .or_insert_with(|| error.message(locale));
        }
        out
    }

    /// Collapse into a [`FactureError::Validation`] when anything failed.
    pub fn into_result(self) -> Result<(), FactureError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl From<Validation> for FactureError {
    fn from(validation: Validation) -> Self {
        let msg = validation
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        FactureError::Validation(msg)
    }
}

impl From<Vec<ValidationError>> for Validation {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for Validation {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
