#![no_main]

use facture::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Serialized form state: errors are fine, panics are bugs.
        if let Ok(draft) = serde_json::from_str::<DocumentDraft>(s) {
            let settings = Settings::default().max_items(64);
            if let Ok(doc) = draft.parse_with(&settings) {
                assert!(check_totals(&doc.totals).is_ok());
                let _ = check_totals(&doc.totals.rounded(2));
            }
        }
    }
});
