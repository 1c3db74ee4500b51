use rust_decimal::Decimal;

use super::error::FactureError;
use super::settings::Settings;
use super::types::*;

/// Builder for typed line items.
///
/// ```
/// use facture::core::*;
/// use rust_decimal_macros::dec;
///
/// let line = LineItemBuilder::new("Formation Rust", dec!(3), "jour", dec!(800))
///     .vat_rate(dec!(20))
///     .discount(Discount::percentage(dec!(5)))
///     .build();
/// assert_eq!(line.totals().line_total_after_discount, dec!(2280));
/// ```
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    unit: String,
    unit_price: Decimal,
    vat_rate: Decimal,
    discount: Option<Discount>,
    vat_exemption_text: Option<String>,
}

impl LineItemBuilder {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            vat_rate: Decimal::new(20, 0),
            discount: None,
            vat_exemption_text: None,
        }
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Zero-rate the line with its legal exemption mention.
    pub fn exempt(mut self, mention: impl Into<String>) -> Self {
        self.vat_rate = Decimal::ZERO;
        self.vat_exemption_text = Some(mention.into());
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            unit_price: self.unit_price,
            vat_rate: self.vat_rate,
            discount: self.discount,
            vat_exemption_text: self.vat_exemption_text,
        }
    }
}

/// Builder for document drafts, mostly for hosts that assemble form state
/// programmatically (imports, duplication of an existing invoice).
///
/// ```
/// use facture::core::*;
/// use rust_decimal_macros::dec;
///
/// let doc = DocumentDraftBuilder::invoice("FAC", "2024-001", "2024-06-15", "2024-07-15")
///     .add_item(&LineItemBuilder::new("Audit", dec!(1), "forfait", dec!(1500)).build())
///     .build()
///     .unwrap();
/// assert_eq!(doc.totals.final_total_ttc, dec!(1800));
/// ```
pub struct DocumentDraftBuilder {
    draft: DocumentDraft,
    settings: Settings,
}

impl DocumentDraftBuilder {
    pub fn new(
        kind: DocumentKind,
        prefix: impl Into<String>,
        number: impl Into<String>,
        issue_date: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            draft: DocumentDraft {
                kind,
                prefix: prefix.into(),
                number: number.into(),
                issue_date: issue_date.into(),
                due_date: due_date.into(),
                ..Default::default()
            },
            settings: Settings::default(),
        }
    }

    pub fn invoice(
        prefix: impl Into<String>,
        number: impl Into<String>,
        issue_date: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self::new(DocumentKind::Invoice, prefix, number, issue_date, due_date)
    }

    pub fn quote(
        prefix: impl Into<String>,
        number: impl Into<String>,
        issue_date: impl Into<String>,
        valid_until: impl Into<String>,
    ) -> Self {
        Self::new(DocumentKind::Quote, prefix, number, issue_date, valid_until)
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn execution_date(mut self, date: impl Into<String>) -> Self {
        self.draft.execution_date = Some(date.into());
        self
    }

    pub fn purchase_order_number(mut self, reference: impl Into<String>) -> Self {
        self.draft.purchase_order_number = Some(reference.into());
        self
    }

    pub fn header_notes(mut self, notes: impl Into<String>) -> Self {
        self.draft.header_notes = Some(notes.into());
        self
    }

    pub fn footer_notes(mut self, notes: impl Into<String>) -> Self {
        self.draft.footer_notes = Some(notes.into());
        self
    }

    pub fn terms_and_conditions(mut self, terms: impl Into<String>) -> Self {
        self.draft.terms_and_conditions = Some(terms.into());
        self
    }

    pub fn terms_link(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.draft.terms_link = Some(Link {
            title: title.into(),
            url: url.into(),
        });
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.draft.discount = Some(discount.value.to_string());
        self.draft.discount_type = discount.kind;
        self
    }

    pub fn custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.draft.custom_fields.push(CustomField {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn add_item(mut self, item: &LineItem) -> Self {
        self.draft.items.push(LineItemDraft::from(item));
        self
    }

    pub fn add_item_draft(mut self, draft: LineItemDraft) -> Self {
        self.draft.items.push(draft);
        self
    }

    /// The assembled draft, without validation.
    pub fn into_draft(self) -> DocumentDraft {
        self.draft
    }

    /// Validate and compute totals. Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Document, FactureError> {
        Ok(self.draft.parse_with(&self.settings)?)
    }
}
