use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::{ErrorKind, MessageCode, Validation, ValidationError};
use super::types::DocumentKind;

/// Parse a form date: `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp. Only the calendar date is kept.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Per-date outcome of [`validate_dates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValidation {
    pub issue_error: Option<ValidationError>,
    pub due_error: Option<ValidationError>,
    pub execution_error: Option<ValidationError>,
}

impl DateValidation {
    pub fn is_valid(&self) -> bool {
        self.issue_error.is_none() && self.due_error.is_none() && self.execution_error.is_none()
    }

    pub fn into_validation(self) -> Validation {
        [self.issue_error, self.due_error, self.execution_error]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .into()
    }
}

/// Validate the issue / due / execution dates of an invoice.
///
/// Equal dates are valid: only a due or execution date strictly before the
/// issue date is an ordering violation.
pub fn validate_dates(issue_date: &str, due_date: &str, execution_date: Option<&str>) -> DateValidation {
    validate_dates_for(DocumentKind::Invoice, issue_date, due_date, execution_date)
}

/// Like [`validate_dates`], reporting the second date as `valid_until` for quotes.
pub fn validate_dates_for(
    kind: DocumentKind,
    issue_date: &str,
    due_date: &str,
    execution_date: Option<&str>,
) -> DateValidation {
    let mut result = DateValidation::default();

    let issue = parse_date(issue_date);
    if issue.is_none() {
        result.issue_error = Some(ValidationError::new(
            "issue_date",
            ErrorKind::RequiredField,
            MessageCode::IssueDateRequired,
        ));
    }

    let (due_required, due_before_issue) = match kind {
        DocumentKind::Invoice => (MessageCode::DueDateRequired, MessageCode::DueBeforeIssue),
        DocumentKind::Quote => (
            MessageCode::ValidUntilRequired,
            MessageCode::ValidUntilBeforeIssue,
        ),
    };

    match parse_date(due_date) {
        None => {
            result.due_error = Some(ValidationError::new(
                kind.due_field(),
                ErrorKind::RequiredField,
                due_required,
            ));
        }
        Some(due) => {
            if issue.is_some_and(|issue| due < issue) {
                result.due_error = Some(ValidationError::new(
                    kind.due_field(),
                    ErrorKind::OrderingViolation,
                    due_before_issue,
                ));
            }
        }
    }

    let execution_date = execution_date.filter(|raw| !raw.trim().is_empty());
    if let Some(raw) = execution_date {
        match parse_date(raw) {
            None => {
                result.execution_error = Some(ValidationError::new(
                    "execution_date",
                    ErrorKind::PatternMismatch,
                    MessageCode::InvalidDate,
                ));
            }
            Some(execution) => {
                if issue.is_some_and(|issue| execution < issue) {
                    result.execution_error = Some(ValidationError::new(
                        "execution_date",
                        ErrorKind::OrderingViolation,
                        MessageCode::ExecutionBeforeIssue,
                    ));
                }
            }
        }
    }

    if !result.is_valid() {
        tracing::trace!(?kind, issue_date, due_date, "date validation failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(parse_date("2024-01-10"), Some(expected));
        assert_eq!(parse_date(" 2024-01-10 "), Some(expected));
        assert_eq!(parse_date("2024-01-10T23:30:00Z"), Some(expected));
        assert_eq!(parse_date("2024-01-10T08:00:00+02:00"), Some(expected));
        assert_eq!(parse_date("2024-01-10T08:00:00"), Some(expected));
        assert_eq!(parse_date("2024-01-10T08:00:00.250"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("10/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("demain"), None);
    }

    #[test]
    fn due_before_issue() {
        let result = validate_dates("2024-01-10", "2024-01-05", None);
        assert!(!result.is_valid());
        assert!(result.issue_error.is_none());
        let due = result.due_error.unwrap();
        assert_eq!(due.kind, ErrorKind::OrderingViolation);
        assert_eq!(due.field, "due_date");
    }

    #[test]
    fn same_day_is_valid() {
        assert!(validate_dates("2024-01-10", "2024-01-10", Some("2024-01-10")).is_valid());
    }

    #[test]
    fn missing_issue_date_skips_ordering() {
        let result = validate_dates("", "2024-01-05", Some("2023-01-01"));
        assert_eq!(
            result.issue_error.as_ref().map(|e| e.code),
            Some(MessageCode::IssueDateRequired)
        );
        assert!(result.due_error.is_none());
        assert!(result.execution_error.is_none());
    }

    #[test]
    fn missing_due_date() {
        let result = validate_dates("2024-01-10", "  ", None);
        assert_eq!(
            result.due_error.map(|e| e.kind),
            Some(ErrorKind::RequiredField)
        );
    }

    #[test]
    fn execution_date_rules() {
        let before = validate_dates("2024-01-10", "2024-02-10", Some("2024-01-09"));
        assert_eq!(
            before.execution_error.map(|e| e.code),
            Some(MessageCode::ExecutionBeforeIssue)
        );

        let blank = validate_dates("2024-01-10", "2024-02-10", Some(""));
        assert!(blank.is_valid());

        let garbage = validate_dates("2024-01-10", "2024-02-10", Some("bientôt"));
        assert_eq!(
            garbage.execution_error.map(|e| e.kind),
            Some(ErrorKind::PatternMismatch)
        );
    }

    #[test]
    fn quote_reports_valid_until() {
        let result = validate_dates_for(DocumentKind::Quote, "2024-03-01", "2024-02-01", None);
        let err = result.due_error.unwrap();
        assert_eq!(err.field, "valid_until");
        assert_eq!(err.code, MessageCode::ValidUntilBeforeIssue);
    }
}
