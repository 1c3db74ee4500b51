#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = facture::siren::validate_siren(s);
        let _ = facture::siren::validate_siret(s);
        let _ = facture::siren::validate_vat_number(s);
        let _ = facture::siren::ExemptionReason::detect(s);
    }
});
