use facture::core::*;
use rust_decimal_macros::dec;

fn line(quantity: &str, price: &str, rate: &str) -> LineItemDraft {
    LineItemDraft {
        description: "Prestation de service".into(),
        quantity: Some(quantity.into()),
        unit_price: Some(price.into()),
        vat_rate: Some(rate.into()),
        unit: "heure".into(),
        ..Default::default()
    }
}

fn invoice_draft(items: Vec<LineItemDraft>) -> DocumentDraft {
    DocumentDraft {
        kind: DocumentKind::Invoice,
        prefix: "FAC".into(),
        number: "2024-001".into(),
        issue_date: "2024-06-15".into(),
        due_date: "2024-07-15".into(),
        items,
        ..Default::default()
    }
}

// --- Scenarios ---

#[test]
fn scenario_a_single_line() {
    let items = vec![
        LineItemBuilder::new("Conseil", dec!(2), "jour", dec!(100))
            .vat_rate(dec!(20))
            .build(),
    ];
    let totals = compute_document_totals(&items, None);
    assert_eq!(totals.total_ht, dec!(200));
    assert_eq!(totals.total_vat, dec!(40));
    assert_eq!(totals.final_total_ttc, dec!(240));
    assert_eq!(totals.discount_amount, dec!(0));
    assert_eq!(totals.vat_rates.len(), 1);
}

#[test]
fn scenario_b_line_percentage_discount() {
    let item = LineItemBuilder::new("Conseil", dec!(1), "jour", dec!(100))
        .vat_rate(dec!(20))
        .discount(Discount::percentage(dec!(10)))
        .build();
    assert_eq!(item.totals().discount_amount, dec!(10));

    let totals = compute_document_totals(&[item], None);
    assert_eq!(totals.total_ht, dec!(90));
    assert_eq!(totals.total_vat, dec!(18));
    assert_eq!(totals.final_total_ttc, dec!(108));
}

#[test]
fn scenario_c_zero_rate_without_mention() {
    let mut draft = line("1", "100", "0");
    draft.vat_exemption_text = Some(String::new());
    let result = validate_item(&draft);
    assert!(!result.is_valid());
    let err = result.first_for("vat_exemption_text").unwrap();
    assert_eq!(err.kind, ErrorKind::MissingExemptionMention);
}

#[test]
fn scenario_d_document_fixed_discount() {
    let items = vec![
        LineItemBuilder::new("Licence A", dec!(1), "u", dec!(100))
            .vat_rate(dec!(20))
            .build(),
        LineItemBuilder::new("Licence B", dec!(1), "u", dec!(100))
            .vat_rate(dec!(20))
            .build(),
    ];
    let totals = compute_document_totals(&items, Some(Discount::fixed(dec!(50))));
    assert_eq!(totals.total_ht, dec!(200));
    assert_eq!(totals.discount_amount, dec!(50));
    assert_eq!(totals.final_total_ht, dec!(150));
    // 200 × 0.75
    assert_eq!(totals.vat_rates[0].base_amount, dec!(150));
    assert_eq!(totals.total_vat, dec!(30));
    assert_eq!(totals.final_total_ttc, dec!(180));
}

#[test]
fn scenario_d_scaling_per_rate() {
    let items = vec![
        LineItemBuilder::new("Livre", dec!(1), "u", dec!(100))
            .vat_rate(dec!(5.5))
            .build(),
        LineItemBuilder::new("Reliure", dec!(1), "u", dec!(100))
            .vat_rate(dec!(20))
            .build(),
    ];
    let totals = compute_document_totals(&items, Some(Discount::fixed(dec!(50))));
    assert_eq!(totals.vat_rates[0].rate, dec!(5.5));
    assert_eq!(totals.vat_rates[0].base_amount, dec!(75));
    assert_eq!(totals.vat_rates[1].base_amount, dec!(75));
    assert_eq!(totals.vat_rates[0].amount, dec!(4.125));
    assert_eq!(totals.vat_rates[1].amount, dec!(15));
    assert!(totals.has_multiple_vat_rates());
}

#[test]
fn scenario_e_due_before_issue() {
    let result = validate_dates("2024-01-10", "2024-01-05", None);
    assert!(!result.is_valid());
    assert!(result.due_error.is_some());
    assert!(result.issue_error.is_none());
    assert!(result.execution_error.is_none());
}

// --- Documents ---

#[test]
fn parse_full_invoice() {
    let mut draft = invoice_draft(vec![line("10", "150", "20"), line("1", "49,90", "10")]);
    draft.discount = Some("5".into());
    draft.discount_type = DiscountType::Percentage;
    draft.execution_date = Some("2024-06-20T09:00:00Z".into());
    draft.header_notes = Some("  ".into());
    draft.custom_fields = vec![
        CustomField {
            key: "Chantier".into(),
            value: "Lyon 3e".into(),
        },
        CustomField::default(),
    ];

    let doc = draft.parse().unwrap();
    assert_eq!(doc.reference(), "FAC-2024-001");
    assert_eq!(doc.items.len(), 2);
    assert_eq!(doc.header_notes, None);
    assert_eq!(doc.custom_fields.len(), 1);
    assert_eq!(
        doc.execution_date,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 20)
    );

    let totals = &doc.totals;
    // 1500 + 49.90
    assert_eq!(totals.total_ht, dec!(1549.90));
    assert_eq!(totals.discount_amount, dec!(77.495));
    assert_eq!(totals.final_total_ht, dec!(1472.405));
    check_totals(totals).unwrap();
    check_totals(&totals.rounded(2)).unwrap();
}

#[test]
fn document_errors_are_prefixed_per_item() {
    let mut bad = line("0", "100", "20");
    bad.unit = String::new();
    let draft = invoice_draft(vec![line("1", "10", "20"), bad]);

    let errors = draft.parse().unwrap_err();
    assert!(errors.has_kind("items[1].quantity", ErrorKind::RangeError));
    assert!(errors.has_kind("items[1].unit", ErrorKind::RequiredField));
    assert!(errors.first_for("items[0].quantity").is_none());
}

#[test]
fn document_requires_items() {
    let errors = validate_document(&invoice_draft(Vec::new()));
    assert!(errors.has_kind("items", ErrorKind::RequiredField));
}

#[test]
fn document_item_limit_from_settings() {
    let draft = invoice_draft(vec![line("1", "1", "20"); 3]);
    let settings = Settings::default().max_items(2);
    let errors = validate_document_with(&draft, &settings);
    assert_eq!(
        errors.first_for("items").map(|e| e.code),
        Some(MessageCode::TooManyItems { max: 2 })
    );
}

#[test]
fn quote_uses_valid_until() {
    let mut draft = invoice_draft(vec![line("1", "10", "20")]);
    draft.kind = DocumentKind::Quote;
    draft.prefix = "DEV".into();
    draft.due_date = "2024-05-01".into();

    let errors = draft.parse().unwrap_err();
    let err = errors.first_for("valid_until").unwrap();
    assert_eq!(err.kind, ErrorKind::OrderingViolation);
    assert_eq!(err.code, MessageCode::ValidUntilBeforeIssue);
}

#[test]
fn builder_reports_every_error() {
    let err = DocumentDraftBuilder::invoice("FAC 1", "", "2024-06-15", "2024-06-01")
        .add_item_draft(line("abc", "10", "20"))
        .build()
        .unwrap_err()
        .to_string();
    assert!(err.starts_with("validation failed: "));
    assert!(err.contains("prefix:"));
    assert!(err.contains("number:"));
    assert!(err.contains("due_date:"));
    assert!(err.contains("items[0].quantity:"));
}

#[test]
fn builder_with_settings() {
    let doc = DocumentDraftBuilder::quote("DEV", "2024-010", "2024-06-15", "2024-07-15")
        .settings(Settings::default().allow_zero_unit_price(true))
        .add_item(
            &LineItemBuilder::new("Échantillon offert", dec!(1), "u", dec!(0))
                .vat_rate(dec!(20))
                .build(),
        )
        .add_item(
            &LineItemBuilder::new("Formation", dec!(2), "jour", dec!(900))
                .vat_rate(dec!(20))
                .build(),
        )
        .terms_link("Conditions générales", "https://exemple.fr/cgv")
        .purchase_order_number("BC-2024/118")
        .build()
        .unwrap();
    assert_eq!(doc.kind, DocumentKind::Quote);
    assert_eq!(doc.totals.total_ht, dec!(1800));
    assert_eq!(doc.totals.final_total_ttc, dec!(2160));
    assert!(doc.terms_link.is_some());
}

// --- Persistence shape ---

#[test]
fn totals_serialize_with_schema_names() {
    let items = vec![
        LineItemBuilder::new("A", dec!(1), "u", dec!(100))
            .vat_rate(dec!(20))
            .build(),
    ];
    let totals = compute_document_totals(&items, None);
    let json = serde_json::to_value(&totals).unwrap();
    let obj = json.as_object().unwrap();
    for key in [
        "totalHT",
        "totalVAT",
        "totalTTC",
        "finalTotalHT",
        "finalTotalTTC",
        "discountAmount",
        "vatRates",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj.len(), 7);
    let rate = &json["vatRates"][0];
    assert!(rate.get("baseAmount").is_some());
    assert!(rate.get("amount").is_some());
    assert!(rate.get("rate").is_some());
}

#[test]
fn drafts_deserialize_from_form_state() {
    let json = r#"{
        "description": "Pose de parquet",
        "quantity": "12,5",
        "unitPrice": "38",
        "vatRate": "10",
        "unit": "m²",
        "discount": "15",
        "discountType": "FIXED"
    }"#;
    let draft: LineItemDraft = serde_json::from_str(json).unwrap();
    let item = parse_item(&draft).unwrap();
    assert_eq!(item.discount, Some(Discount::fixed(dec!(15))));
    assert_eq!(item.totals().line_total, dec!(475));
    assert_eq!(item.totals().line_total_after_discount, dec!(460));
}

#[test]
fn settings_deserialize_partially() {
    let settings: Settings =
        serde_json::from_str(r#"{"allow_zero_unit_price": true, "locale": "en"}"#).unwrap();
    assert!(settings.allow_zero_unit_price);
    assert_eq!(settings.locale, Locale::En);
    assert_eq!(settings.max_items, DEFAULT_MAX_ITEMS);
    assert!(!settings.cap_fixed_discounts);
}

// --- Numbering ---

#[test]
fn sequence_feeds_valid_headers() {
    let mut seq = DocumentNumberSequence::new("FAC", 2024);
    let first = seq.issue().unwrap();
    let second = seq.issue().unwrap();
    assert_eq!(check_continuity(&first.number, &second.number), Continuity::Next);

    let mut draft = invoice_draft(vec![line("1", "10", "20")]);
    draft.prefix = second.prefix.clone();
    draft.number = second.number.clone();
    assert!(validate_header(&draft).is_valid());
}

#[test]
fn reference_is_trimmed_on_parse() {
    let mut draft = invoice_draft(vec![line("1", "10", "20")]);
    draft.prefix = " FAC ".into();
    draft.number = "2024-001 ".into();
    let doc = draft.parse().unwrap();
    assert_eq!(doc.prefix, "FAC");
    assert_eq!(doc.reference(), "FAC-2024-001");
}

#[test]
fn builder_failures_are_validation_errors() {
    let err = DocumentDraftBuilder::invoice("FAC", "2024-002", "2024-06-15", "2024-07-15")
        .build()
        .unwrap_err();
    assert!(matches!(err, FactureError::Validation(_)));
    assert!(err.to_string().contains("items"));
}
