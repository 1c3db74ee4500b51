use facture::siren::*;

fn main() {
    for siret in ["732 829 320 00074", "356 000 000 49837", "123 456 789 00012"] {
        match validate_siret(siret) {
            Ok(valid) => {
                let siren = &valid[..9];
                match vat_number_from_siren(siren) {
                    Ok(vat) => println!("{valid}: OK, TVA {vat}"),
                    Err(e) => println!("{valid}: OK, no VAT number ({e})"),
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    for vat in ["FR44732829320", "FR45732829320", "DE123456789", "XX1234"] {
        match validate_vat_number(vat) {
            Ok(v) => println!("{v}: valid format"),
            Err(e) => println!("{e}"),
        }
    }

    println!("\nExemption mentions:");
    for reason in ExemptionReason::ALL {
        println!("  {:<22} art. {:<10} {}", format!("{reason:?}"), reason.article(), reason.mention());
    }
}
