use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FactureError;

/// A prefix / number pair as stored in a document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNumber {
    pub prefix: String,
    pub number: String,
}

impl DocumentNumber {
    /// Printed reference, e.g. "FAC-2024-007".
    pub fn reference(&self) -> String {
        format!("{}-{}", self.prefix, self.number)
    }
}

/// Chronological, gapless numbering within a yearly series.
///
/// French invoices must carry a unique number "basé sur une séquence
/// chronologique et continue" (art. 242 nonies A, annexe II CGI). A new
/// series may start each year. Numbers are rendered as
/// `{year}-{counter}`, the prefix staying a separate header field.
#[derive(Debug, Clone)]
pub struct DocumentNumberSequence {
    prefix: String,
    year: i32,
    next: u64,
    width: usize,
}

impl DocumentNumberSequence {
    /// Start a series at 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next: 1,
            width: 3,
        }
    }

    /// Continue a series from the last number issued in `year`.
    ///
    /// A last number belonging to another year starts a fresh series.
    pub fn resume_after(
        prefix: impl Into<String>,
        year: i32,
        last_number: &str,
    ) -> Result<Self, FactureError> {
        let (stem, counter) = split_counter(last_number).ok_or_else(|| {
            FactureError::Numbering(format!(
                "last number '{last_number}' does not end with a counter"
            ))
        })?;
        let mut seq = Self::new(prefix, year);
        if stem == format!("{year}-") {
            seq.next = counter.checked_add(1).ok_or_else(|| {
                FactureError::Numbering(format!("series {year} is exhausted after '{last_number}'"))
            })?;
            seq.width = last_number.len() - stem.len();
        }
        Ok(seq)
    }

    /// Set zero-padding width of the counter (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> DocumentNumber {
        DocumentNumber {
            prefix: self.prefix.clone(),
            number: format!("{}-{:0>width$}", self.year, self.next, width = self.width),
        }
    }

    /// Issue the next number. Fails once the counter cannot advance.
    pub fn issue(&mut self) -> Result<DocumentNumber, FactureError> {
        let number = self.peek();
        self.next = self.next.checked_add(1).ok_or_else(|| {
            FactureError::Numbering(format!("series {} is exhausted", self.year))
        })?;
        Ok(number)
    }

    /// Align the series with a document date: a later year opens a new
    /// series at 1, an earlier year is refused.
    pub fn roll_to(&mut self, date: NaiveDate) -> Result<(), FactureError> {
        let year = date.year();
        if year < self.year {
            return Err(FactureError::Numbering(format!(
                "document dated {date} cannot be numbered in the {} series",
                self.year
            )));
        }
        if year > self.year {
            self.year = year;
            self.next = 1;
        }
        Ok(())
    }
}

/// How a candidate number relates to the last one issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuity {
    /// Candidate immediately follows the previous number.
    Next,
    /// Candidate opens a new series (different stem, counter 1).
    NewSeries,
    /// Numbers were skipped.
    Gap { expected: String, missing: u64 },
    /// Candidate repeats the previous number.
    Duplicate,
    /// Candidate is lower than the previous number.
    Backwards,
    /// Numbers cannot be compared (different stems, no counter).
    Unrelated,
}

impl Continuity {
    /// Whether the candidate keeps the numbering continuous.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Next | Self::NewSeries)
    }
}

/// Compare a candidate document number with the last number issued.
///
/// Only the trailing counter is compared; everything before it must match
/// for the two numbers to belong to the same series.
///
/// ```
/// use facture::core::{check_continuity, Continuity};
///
/// assert_eq!(check_continuity("2024-041", "2024-042"), Continuity::Next);
/// assert!(matches!(check_continuity("2024-041", "2024-044"), Continuity::Gap { missing: 2, .. }));
/// ```
pub fn check_continuity(previous: &str, candidate: &str) -> Continuity {
    let (Some((prev_stem, prev)), Some((cand_stem, cand))) =
        (split_counter(previous.trim()), split_counter(candidate.trim()))
    else {
        return Continuity::Unrelated;
    };

    if prev_stem != cand_stem {
        return if cand == 1 {
            Continuity::NewSeries
        } else {
            Continuity::Unrelated
        };
    }

    match cand.cmp(&prev) {
        std::cmp::Ordering::Equal => Continuity::Duplicate,
        std::cmp::Ordering::Less => Continuity::Backwards,
        std::cmp::Ordering::Greater if cand == prev + 1 => Continuity::Next,
        std::cmp::Ordering::Greater => {
            let width = previous.trim().len() - prev_stem.len();
            Continuity::Gap {
                expected: format!("{prev_stem}{:0>width$}", prev + 1),
                missing: cand - prev - 1,
            }
        }
    }
}

/// Split "2024-007" into ("2024-", 7). `None` without a trailing counter.
fn split_counter(number: &str) -> Option<(&str, u64)> {
    let digits = number
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let (stem, counter) = number.split_at(number.len() - digits);
    counter.parse().ok().map(|n| (stem, n))
}
