use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::dates::{parse_date, validate_dates_for};
use super::error::{ErrorKind, MessageCode, Validation, ValidationError};
use super::patterns::{self, *};
use super::settings::Settings;
use super::totals::compute_document_totals_with;
use super::types::*;

/// Parse a number as typed in a French form.
///
/// Surrounding whitespace and digit-group spaces (including non-breaking
/// ones) are ignored and a decimal comma is accepted: `"1 234,50"` parses
/// as `1234.50`. Returns `None` for empty or non-numeric text.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// A numeric form value after parsing.
enum NumberInput {
    /// Absent or blank.
    Missing,
    /// Present but not a number.
    NaN,
    Value(Decimal),
}

fn read_number(raw: Option<&str>) -> NumberInput {
    match raw {
        None => NumberInput::Missing,
        Some(raw) if raw.trim().is_empty() => NumberInput::Missing,
        Some(raw) => match parse_amount(raw) {
            Some(value) => NumberInput::Value(value),
            None => NumberInput::NaN,
        },
    }
}

/// Validate one line item with default [`Settings`].
///
/// Every rule runs independently and all failures are reported.
pub fn validate_item(draft: &LineItemDraft) -> Validation {
    validate_item_with(draft, &Settings::default())
}

/// Validate one line item.
pub fn validate_item_with(draft: &LineItemDraft, settings: &Settings) -> Validation {
    let mut errors = Validation::new();

    if draft.description.trim().is_empty() {
        errors.push(ValidationError::required("description"));
    } else if !DESCRIPTION.is_match(&draft.description) {
        errors.push(ValidationError::new(
            "description",
            ErrorKind::PatternMismatch,
            MessageCode::DescriptionInvalid,
        ));
    }

    match read_number(draft.quantity.as_deref()) {
        NumberInput::Missing => errors.push(ValidationError::required("quantity")),
        NumberInput::NaN => errors.push(range("quantity", MessageCode::NotANumber)),
        NumberInput::Value(q) if q <= Decimal::ZERO => {
            errors.push(range("quantity", MessageCode::QuantityNotPositive))
        }
        NumberInput::Value(_) => {}
    }

    match read_number(draft.unit_price.as_deref()) {
        NumberInput::Missing => errors.push(ValidationError::required("unit_price")),
        NumberInput::NaN => errors.push(range("unit_price", MessageCode::NotANumber)),
        NumberInput::Value(p) => {
            if settings.allow_zero_unit_price {
                if p < Decimal::ZERO {
                    errors.push(range("unit_price", MessageCode::UnitPriceNegative));
                }
            } else if p <= Decimal::ZERO {
                errors.push(range("unit_price", MessageCode::UnitPriceNotPositive));
            }
        }
    }

    // A 0% rate is checked for its exemption mention and never range-checked.
    match read_number(draft.vat_rate.as_deref()) {
        NumberInput::Value(rate) if rate.is_zero() => {
            let has_mention = draft
                .vat_exemption_text
                .as_deref()
                .is_some_and(|text| !text.trim().is_empty());
            if !has_mention {
                errors.push(ValidationError::new(
                    "vat_exemption_text",
                    ErrorKind::MissingExemptionMention,
                    MessageCode::ExemptionMentionRequired,
                ));
            }
        }
        NumberInput::Value(rate) if rate > Decimal::ZERO && rate <= dec!(100) => {}
        _ => errors.push(range("vat_rate", MessageCode::VatRateOutOfRange)),
    }

    if draft.unit.trim().is_empty() {
        errors.push(ValidationError::required("unit"));
    } else if !UNIT.is_match(&draft.unit) {
        errors.push(ValidationError::new(
            "unit",
            ErrorKind::PatternMismatch,
            MessageCode::UnitInvalid,
        ));
    }

    check_discount(
        &mut errors,
        "discount",
        draft.discount.as_deref(),
        draft.discount_type,
    );

    if !errors.is_valid() {
        tracing::trace!(errors = errors.errors().len(), "line item rejected");
    }
    errors
}

/// Validate and convert a line draft with default [`Settings`].
pub fn parse_item(draft: &LineItemDraft) -> Result<LineItem, Validation> {
    parse_item_with(draft, &Settings::default())
}

/// Validate and convert a line draft into a typed [`LineItem`].
pub fn parse_item_with(draft: &LineItemDraft, settings: &Settings) -> Result<LineItem, Validation> {
    let errors = validate_item_with(draft, settings);
    if !errors.is_valid() {
        return Err(errors);
    }
    let mut item = draft.to_item_lenient();
    item.vat_exemption_text = non_blank(&item.vat_exemption_text);
    Ok(item)
}

/// Validate the header fields of an invoice or quote: reference, dates,
/// purchase order, notes, terms, link, discount, and custom fields.
pub fn validate_header(draft: &DocumentDraft) -> Validation {
    let mut errors = Validation::new();

    check_text(
        &mut errors,
        "prefix",
        &draft.prefix,
        true,
        PREFIX_MAX,
        &REFERENCE,
    );
    check_text(
        &mut errors,
        "number",
        &draft.number,
        true,
        NUMBER_MAX,
        &REFERENCE,
    );

    let execution = draft.execution_date.as_deref();
    errors.merge(
        validate_dates_for(draft.kind, &draft.issue_date, &draft.due_date, execution)
            .into_validation(),
        None,
    );

    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    check_text(
        &mut errors,
        "purchase_order_number",
        &optional(&draft.purchase_order_number),
        false,
        PURCHASE_ORDER_MAX,
        &PURCHASE_ORDER,
    );
    check_text(
        &mut errors,
        "header_notes",
        &optional(&draft.header_notes),
        false,
        NOTES_MAX,
        &FREE_TEXT,
    );
    check_text(
        &mut errors,
        "footer_notes",
        &optional(&draft.footer_notes),
        false,
        NOTES_MAX,
        &FREE_TEXT,
    );
    check_text(
        &mut errors,
        "terms_and_conditions",
        &optional(&draft.terms_and_conditions),
        false,
        TERMS_MAX,
        &FREE_TEXT,
    );

    if let Some(link) = &draft.terms_link {
        check_link(&mut errors, link);
    }

    check_discount(
        &mut errors,
        "discount",
        draft.discount.as_deref(),
        draft.discount_type,
    );

    for (i, field) in draft.custom_fields.iter().enumerate() {
        if field.key.trim().is_empty() && field.value.trim().is_empty() {
            continue;
        }
        let prefix = format!("custom_fields[{i}]");
        check_text(
            &mut errors,
            &format!("{prefix}.key"),
            &field.key,
            true,
            CUSTOM_FIELD_MAX,
            &FREE_TEXT,
        );
        check_text(
            &mut errors,
            &format!("{prefix}.value"),
            &field.value,
            true,
            CUSTOM_FIELD_MAX,
            &FREE_TEXT,
        );
    }

    errors
}

/// Validate a whole document with default [`Settings`].
pub fn validate_document(draft: &DocumentDraft) -> Validation {
    validate_document_with(draft, &Settings::default())
}

/// Validate header and every line; item errors are reported under `items[i].`.
pub fn validate_document_with(draft: &DocumentDraft, settings: &Settings) -> Validation {
    let mut errors = validate_header(draft);

    if draft.items.is_empty() {
        errors.push(ValidationError::required("items"));
    } else if draft.items.len() > settings.max_items {
        errors.push(range(
            "items",
            MessageCode::TooManyItems {
                max: settings.max_items,
            },
        ));
    }

    for (i, item) in draft.items.iter().enumerate() {
        errors.merge(
            validate_item_with(item, settings),
            Some(&format!("items[{i}]")),
        );
    }

    tracing::trace!(
        kind = ?draft.kind,
        items = draft.items.len(),
        errors = errors.errors().len(),
        "document validated"
    );
    errors
}

impl DocumentDraft {
    /// Validate and convert into a [`Document`] with default [`Settings`].
    pub fn parse(&self) -> Result<Document, Validation> {
        self.parse_with(&Settings::default())
    }

    /// Validate and convert into a [`Document`], computing its totals.
    pub fn parse_with(&self, settings: &Settings) -> Result<Document, Validation> {
        let errors = validate_document_with(self, settings);
        if !errors.is_valid() {
            return Err(errors);
        }
        let (Some(issue_date), Some(due_date)) =
            (parse_date(&self.issue_date), parse_date(&self.due_date))
        else {
            return Err(errors);
        };

        let items: Vec<LineItem> = self
            .items
            .iter()
            .map(|draft| {
                let mut item = draft.to_item_lenient();
                item.vat_exemption_text = non_blank(&item.vat_exemption_text);
                item
            })
            .collect();
        let discount = self
            .discount
            .as_deref()
            .and_then(parse_amount)
            .map(|value| Discount::new(value, self.discount_type));
        let totals = compute_document_totals_with(&items, discount, settings);

        Ok(Document {
            kind: self.kind,
            prefix: self.prefix.trim().to_string(),
            number: self.number.trim().to_string(),
            issue_date,
            due_date,
            execution_date: self.execution_date.as_deref().and_then(parse_date),
            purchase_order_number: non_blank(&self.purchase_order_number),
            header_notes: non_blank(&self.header_notes),
            footer_notes: non_blank(&self.footer_notes),
            terms_and_conditions: non_blank(&self.terms_and_conditions),
            terms_link: self
                .terms_link
                .clone()
                .filter(|link| !link.url.trim().is_empty()),
            discount,
            custom_fields: self
                .custom_fields
                .iter()
                .filter(|f| !f.key.trim().is_empty())
                .cloned()
                .collect(),
            items,
            totals,
        })
    }
}

fn range(field: &str, code: MessageCode) -> ValidationError {
    ValidationError::new(field, ErrorKind::RangeError, code)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Shared discount rule for lines and documents. An absent discount is valid.
fn check_discount(errors: &mut Validation, field: &str, raw: Option<&str>, kind: DiscountType) {
    match read_number(raw) {
        NumberInput::Missing => {}
        NumberInput::NaN => errors.push(range(field, MessageCode::NotANumber)),
        NumberInput::Value(d) if d < Decimal::ZERO => {
            errors.push(range(field, MessageCode::DiscountNegative))
        }
        NumberInput::Value(d) if kind == DiscountType::Percentage && d > dec!(100) => {
            errors.push(range(field, MessageCode::PercentageAbove100))
        }
        NumberInput::Value(_) => {}
    }
}

/// Required / length / charset check for a text field. Surrounding
/// whitespace is ignored; length is counted in characters, not bytes.
fn check_text(
    errors: &mut Validation,
    field: &str,
    value: &str,
    required: bool,
    max: usize,
    pattern: &Regex,
) {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.push(ValidationError::required(field));
        }
        return;
    }
    if value.chars().count() > max {
        errors.push(ValidationError::new(
            field,
            ErrorKind::PatternMismatch,
            MessageCode::TooLong { max },
        ));
    } else if !pattern.is_match(value) {
        errors.push(ValidationError::new(
            field,
            ErrorKind::PatternMismatch,
            MessageCode::InvalidCharacters,
        ));
    }
}

fn check_link(errors: &mut Validation, link: &Link) {
    let has_url = !link.url.trim().is_empty();
    let has_title = !link.title.trim().is_empty();

    if has_url {
        let url = link.url.trim();
        if url.chars().count() > LINK_URL_MAX {
            errors.push(ValidationError::new(
                "terms_link.url",
                ErrorKind::PatternMismatch,
                MessageCode::TooLong { max: LINK_URL_MAX },
            ));
        } else if !patterns::URL.is_match(url) {
            errors.push(ValidationError::new(
                "terms_link.url",
                ErrorKind::PatternMismatch,
                MessageCode::InvalidUrl,
            ));
        }
        if !has_title {
            errors.push(ValidationError::new(
                "terms_link.title",
                ErrorKind::RequiredField,
                MessageCode::LinkTitleRequired,
            ));
        }
    } else if has_title {
        errors.push(ValidationError::required("terms_link.url"));
    }

    if has_title {
        check_text(
            errors,
            "terms_link.title",
            &link.title,
            false,
            LINK_TITLE_MAX,
            &FREE_TEXT,
        );
    }
}
