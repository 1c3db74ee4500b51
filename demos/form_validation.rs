use facture::core::*;

fn main() {
    // A quote as submitted by a half-filled form
    let draft = DocumentDraft {
        kind: DocumentKind::Quote,
        prefix: "DEV".into(),
        number: "2024 17".into(),
        issue_date: "2024-06-15".into(),
        due_date: "2024-06-01".into(),
        items: vec![
            LineItemDraft {
                description: "Formation en intra".into(),
                quantity: Some("2".into()),
                unit_price: Some("1 200,00".into()),
                vat_rate: Some("0".into()),
                unit: "jour".into(),
                ..Default::default()
            },
            LineItemDraft {
                description: "Support de cours".into(),
                quantity: Some("douze".into()),
                unit_price: Some("15".into()),
                vat_rate: Some("20".into()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    match draft.parse() {
        Ok(doc) => println!("{} is valid", doc.reference()),
        Err(errors) => {
            println!("{} errors", errors.errors().len());
            for (locale, label) in [(Locale::Fr, "fr"), (Locale::En, "en")] {
                println!("\n[{label}]");
                for (field, message) in errors.messages(locale) {
                    println!("  {field}: {message}");
                }
            }
        }
    }

    // The preview stays renderable while the form is invalid
    let preview: Vec<LineItem> = draft.items.iter().map(LineItemDraft::to_item_lenient).collect();
    let totals = compute_document_totals(&preview, None).rounded(2);
    println!("\nPreview: {} HT, {} TTC", totals.total_ht, totals.final_total_ttc);
}
