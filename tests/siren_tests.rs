//! Company identifiers and exemption mentions on real documents.
//!
//! Run with: `cargo test --features siren --test siren_tests`

#![cfg(feature = "siren")]

use facture::core::*;
use facture::siren::*;
use rust_decimal_macros::dec;

#[test]
fn seller_identifiers_are_consistent() {
    let siret = validate_siret("443 061 841 00047").unwrap();
    let siren = siren_of_siret(&siret).unwrap();
    assert_eq!(siren, "443061841");

    let vat = vat_number_from_siren(&siren).unwrap();
    assert_eq!(vat, "FR64443061841");
    assert_eq!(validate_vat_number(&vat).unwrap(), vat);
}

#[test]
fn identifier_errors_name_the_identifier() {
    let err = validate_siret("44306184100048").unwrap_err();
    assert_eq!(err.kind, "SIRET");
    assert_eq!(err.to_string(), "invalid SIRET '44306184100048': checksum mismatch");

    let err = validate_vat_number("FR00443061841").unwrap_err();
    assert_eq!(err.kind, "VAT number");
}

#[test]
fn every_exemption_mention_satisfies_zero_rate_lines() {
    for reason in ExemptionReason::ALL {
        let line = LineItemBuilder::new("Prestation intracommunautaire", dec!(1), "forfait", dec!(1000))
            .exempt(reason.mention())
            .build();
        let draft = LineItemDraft::from(&line);
        assert!(validate_item(&draft).is_valid(), "{reason:?}");
        assert_eq!(
            line.vat_exemption_text
                .as_deref()
                .and_then(ExemptionReason::detect),
            Some(reason)
        );
    }
}

#[test]
fn franchise_invoice_has_no_vat() {
    let mention = ExemptionReason::Franchise.mention();
    let doc = DocumentDraftBuilder::invoice("FAC", "2024-007", "2024-09-02", "2024-10-02")
        .add_item(
            &LineItemBuilder::new("Création de site vitrine", dec!(1), "forfait", dec!(1200))
                .exempt(mention)
                .build(),
        )
        .add_item(
            &LineItemBuilder::new("Hébergement", dec!(12), "mois", dec!(15))
                .exempt(mention)
                .build(),
        )
        .footer_notes(mention)
        .build()
        .unwrap();

    assert_eq!(doc.totals.total_ht, dec!(1380));
    assert_eq!(doc.totals.total_vat, dec!(0));
    assert_eq!(doc.totals.final_total_ttc, dec!(1380));
    assert!(!doc.totals.has_multiple_vat_rates());
}
