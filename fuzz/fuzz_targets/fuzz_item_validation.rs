#![no_main]

use facture::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Fields separated by '|', as a form would submit them.
        let mut fields = s.split('|');
        let mut next = || fields.next().map(String::from);
        let draft = LineItemDraft {
            description: next().unwrap_or_default(),
            quantity: next(),
            unit_price: next(),
            vat_rate: next(),
            unit: next().unwrap_or_default(),
            discount: next(),
            discount_type: if s.len() % 2 == 0 {
                DiscountType::Percentage
            } else {
                DiscountType::Fixed
            },
            vat_exemption_text: next(),
        };

        // Validation and previews must not panic on any input.
        let valid = validate_item(&draft).is_valid();
        let preview = draft.to_item_lenient();
        let _ = compute_document_totals(&[preview], None).rounded(2);
        assert_eq!(valid, parse_item(&draft).is_ok());
    }
});
