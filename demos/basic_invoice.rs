use facture::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Two rates and a commercial discount on the whole invoice
    let doc = DocumentDraftBuilder::invoice("FAC", "2024-118", "2024-06-15", "2024-07-15")
        .execution_date("2024-06-20")
        .purchase_order_number("BC-2024/042")
        .add_item(
            &LineItemBuilder::new("Développement application", dec!(12), "jour", dec!(550))
                .vat_rate(dec!(20))
                .build(),
        )
        .add_item(
            &LineItemBuilder::new("Ouvrage technique", dec!(3), "pièce", dec!(42))
                .vat_rate(dec!(5.5))
                .discount(Discount::percentage(dec!(10)))
                .build(),
        )
        .discount(Discount::fixed(dec!(200)))
        .footer_notes("Pénalités de retard : 3 fois le taux d'intérêt légal.")
        .build()
        .expect("invoice should be valid");

    println!("Facture {}", doc.reference());
    for item in &doc.items {
        let totals = item.totals();
        println!(
            "  {:<30} {:>8} x {:>8}  = {:>10}",
            item.description, item.quantity, item.unit_price, totals.line_total_after_discount
        );
    }

    let totals = doc.totals.rounded(2);
    println!("Total HT           {:>10}", totals.total_ht);
    println!("Remise             {:>10}", totals.discount_amount);
    println!("Total HT net       {:>10}", totals.final_total_ht);
    for vat in &totals.vat_rates {
        println!("TVA {:>5} % sur {:>10}  {:>10}", vat.rate, vat.base_amount, vat.amount);
    }
    println!("Total TTC          {:>10}", totals.final_total_ttc);
}
