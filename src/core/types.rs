use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::parse_amount;

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Value is a percentage (0–100) of the amount it applies to.
    #[default]
    Percentage,
    /// Value is an absolute amount in the document currency.
    Fixed,
}

/// A line-level or document-level discount (remise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub value: Decimal,
    pub kind: DiscountType,
}

impl Discount {
    pub fn new(value: Decimal, kind: DiscountType) -> Self {
        Self { value, kind }
    }

    pub fn percentage(value: Decimal) -> Self {
        Self::new(value, DiscountType::Percentage)
    }

    pub fn fixed(value: Decimal) -> Self {
        Self::new(value, DiscountType::Fixed)
    }
}

/// A validated invoice or quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Designation, 1–200 characters.
    pub description: String,
    /// Invoiced quantity, strictly positive.
    pub quantity: Decimal,
    /// Unit of measure as typed by the user ("heure", "jour", "pièce"...).
    pub unit: String,
    /// Price per unit, excluding VAT.
    pub unit_price: Decimal,
    /// TVA rate in percent, 0–100.
    pub vat_rate: Decimal,
    /// Line discount, if any.
    pub discount: Option<Discount>,
    /// Legal exemption mention; mandatory when `vat_rate` is 0.
    pub vat_exemption_text: Option<String>,
}

/// Raw form state of a line, before validation.
///
/// Numeric fields hold the text as typed. `None` or blank text means the
/// field was left empty; text that does not parse as a number is treated
/// as NaN by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub vat_rate: Option<String>,
    pub unit: String,
    pub discount: Option<String>,
    pub discount_type: DiscountType,
    pub vat_exemption_text: Option<String>,
}

impl LineItemDraft {
    /// Best-effort conversion for previews: unparseable or missing numbers
    /// become zero and an unparseable discount is dropped.
    pub fn to_item_lenient(&self) -> LineItem {
        let number = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(parse_amount)
                .unwrap_or(Decimal::ZERO)
        };
        LineItem {
            description: self.description.clone(),
            quantity: number(&self.quantity),
            unit: self.unit.clone(),
            unit_price: number(&self.unit_price),
            vat_rate: number(&self.vat_rate),
            discount: self
                .discount
                .as_deref()
                .and_then(parse_amount)
                .map(|value| Discount::new(value, self.discount_type)),
            vat_exemption_text: self.vat_exemption_text.clone(),
        }
    }
}

impl From<&LineItem> for LineItemDraft {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: Some(item.quantity.to_string()),
            unit_price: Some(item.unit_price.to_string()),
            vat_rate: Some(item.vat_rate.to_string()),
            unit: item.unit.clone(),
            discount: item.discount.map(|d| d.value.to_string()),
            discount_type: item.discount.map(|d| d.kind).unwrap_or_default(),
            vat_exemption_text: item.vat_exemption_text.clone(),
        }
    }
}

/// Derived amounts of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// quantity × unit price.
    pub line_total: Decimal,
    /// Amount removed by the line discount.
    pub discount_amount: Decimal,
    /// line_total − discount_amount.
    pub line_total_after_discount: Decimal,
}

/// VAT breakdown entry for one distinct rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatRateTotal {
    /// Rate in percent.
    pub rate: Decimal,
    /// Taxable base after line discounts and the allocated document discount.
    pub base_amount: Decimal,
    /// base_amount × rate / 100.
    pub amount: Decimal,
}

/// Totals of a document. Field names match the persistence schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line totals after line discounts.
    #[serde(rename = "totalHT")]
    pub total_ht: Decimal,
    /// Document-level discount amount.
    #[serde(rename = "discountAmount")]
    pub discount_amount: Decimal,
    /// total_ht − discount_amount.
    #[serde(rename = "finalTotalHT")]
    pub final_total_ht: Decimal,
    /// One entry per distinct rate, ascending.
    #[serde(rename = "vatRates")]
    pub vat_rates: Vec<VatRateTotal>,
    /// Sum of `vat_rates[].amount`.
    #[serde(rename = "totalVAT")]
    pub total_vat: Decimal,
    /// Gross total before the document discount.
    #[serde(rename = "totalTTC")]
    pub total_ttc: Decimal,
    /// final_total_ht + total_vat.
    #[serde(rename = "finalTotalTTC")]
    pub final_total_ttc: Decimal,
}

/// Invoice (facture) or quote (devis).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    #[default]
    Invoice,
    Quote,
}

impl DocumentKind {
    /// Field name under which the due / validity date is reported.
    pub fn due_field(&self) -> &'static str {
        match self {
            Self::Invoice => "due_date",
            Self::Quote => "valid_until",
        }
    }
}

/// Link to the general terms and conditions (CGV).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// Free key/value pair printed on the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub key: String,
    pub value: String,
}

/// Raw form state of a whole invoice or quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentDraft {
    pub kind: DocumentKind,
    pub prefix: String,
    pub number: String,
    pub issue_date: String,
    /// Due date for invoices, validity date for quotes.
    pub due_date: String,
    pub execution_date: Option<String>,
    pub purchase_order_number: Option<String>,
    pub header_notes: Option<String>,
    pub footer_notes: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub terms_link: Option<Link>,
    pub discount: Option<String>,
    pub discount_type: DiscountType,
    pub custom_fields: Vec<CustomField>,
    pub items: Vec<LineItemDraft>,
}

/// A validated invoice or quote with computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub kind: DocumentKind,
    pub prefix: String,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub execution_date: Option<NaiveDate>,
    pub purchase_order_number: Option<String>,
    pub header_notes: Option<String>,
    pub footer_notes: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub terms_link: Option<Link>,
    pub discount: Option<Discount>,
    pub custom_fields: Vec<CustomField>,
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
}

impl Document {
    /// Printed reference, e.g. "FAC-2024-001".
    pub fn reference(&self) -> String {
        format!("{}-{}", self.prefix, self.number)
    }
}
