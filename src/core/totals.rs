use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::FactureError;
use super::settings::Settings;
use super::types::*;

/// Tolerance when re-checking a rounded VAT amount against its base.
const VAT_TOLERANCE: Decimal = dec!(0.02);

/// Amount removed from `base` by `discount`.
///
/// Absent or non-positive discounts remove nothing. A FIXED discount is
/// taken as-is unless `cap` is set, in which case it never exceeds a
/// positive base.
pub fn discount_amount(base: Decimal, discount: Option<Discount>, cap: bool) -> Decimal {
    let Some(discount) = discount else {
        return Decimal::ZERO;
    };
    if discount.value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match discount.kind {
        DiscountType::Percentage => base.saturating_mul(discount.value) / dec!(100),
        DiscountType::Fixed if cap => discount.value.min(base.max(Decimal::ZERO)),
        DiscountType::Fixed => discount.value,
    }
}

/// Compute one line's totals.
///
/// Never fails: a FIXED discount larger than the line total yields a
/// negative `line_total_after_discount`.
pub fn compute_line_total(
    quantity: Decimal,
    unit_price: Decimal,
    discount: Option<Discount>,
) -> LineTotals {
    line_total(quantity, unit_price, discount, false)
}

fn line_total(
    quantity: Decimal,
    unit_price: Decimal,
    discount: Option<Discount>,
    cap: bool,
) -> LineTotals {
    let line_total = quantity.saturating_mul(unit_price);
    let discount_amount = discount_amount(line_total, discount, cap);
    LineTotals {
        line_total,
        discount_amount,
        line_total_after_discount: line_total.saturating_sub(discount_amount),
    }
}

impl LineItem {
    /// Totals of this line.
    pub fn totals(&self) -> LineTotals {
        compute_line_total(self.quantity, self.unit_price, self.discount)
    }
}

/// Compute the document breakdown with default [`Settings`].
///
/// ```
/// use facture::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = vec![
///     LineItemBuilder::new("Licence", dec!(1), "an", dec!(100)).vat_rate(dec!(20)).build(),
///     LineItemBuilder::new("Support", dec!(1), "an", dec!(100)).vat_rate(dec!(20)).build(),
/// ];
/// let totals = compute_document_totals(&items, Some(Discount::fixed(dec!(50))));
/// assert_eq!(totals.final_total_ht, dec!(150));
/// assert_eq!(totals.vat_rates[0].base_amount, dec!(150));
/// ```
pub fn compute_document_totals(items: &[LineItem], discount: Option<Discount>) -> DocumentTotals {
    compute_document_totals_with(items, discount, &Settings::default())
}

/// Compute the HT / TVA / TTC breakdown of a document.
///
/// Lines are grouped by exact rate value. A document discount is spread
/// over the rate groups in proportion to their share of `total_ht`.
pub fn compute_document_totals_with(
    items: &[LineItem],
    discount: Option<Discount>,
    settings: &Settings,
) -> DocumentTotals {
    let cap = settings.cap_fixed_discounts;

    let mut groups: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    let mut total_ht = Decimal::ZERO;
    for item in items {
        let line = line_total(item.quantity, item.unit_price, item.discount, cap);
        total_ht = total_ht.saturating_add(line.line_total_after_discount);
        let base = groups.entry(item.vat_rate).or_insert(Decimal::ZERO);
        *base = base.saturating_add(line.line_total_after_discount);
    }

    let discount_amount = discount_amount(total_ht, discount, cap);
    let final_total_ht = total_ht.saturating_sub(discount_amount);
    let scale = !discount_amount.is_zero() && !total_ht.is_zero();

    let mut vat_rates = Vec::with_capacity(groups.len());
    let mut total_vat = Decimal::ZERO;
    let mut undiscounted_vat = Decimal::ZERO;
    for (rate, base) in groups {
        let base_amount = if scale {
            base.saturating_mul(final_total_ht)
                .checked_div(total_ht)
                .unwrap_or(base)
        } else {
            base
        };
        let amount = base_amount.saturating_mul(rate) / dec!(100);
        total_vat = total_vat.saturating_add(amount);
        undiscounted_vat = undiscounted_vat.saturating_add(base.saturating_mul(rate) / dec!(100));
        vat_rates.push(VatRateTotal {
            rate,
            base_amount,
            amount,
        });
    }

    let totals = DocumentTotals {
        total_ht,
        discount_amount,
        final_total_ht,
        vat_rates,
        total_vat,
        total_ttc: total_ht.saturating_add(undiscounted_vat),
        final_total_ttc: final_total_ht.saturating_add(total_vat),
    };

    tracing::debug!(
        items = items.len(),
        rates = totals.vat_rates.len(),
        total_ht = %totals.total_ht,
        discount = %totals.discount_amount,
        total_vat = %totals.total_vat,
        final_total_ttc = %totals.final_total_ttc,
        "document totals computed"
    );
    totals
}

impl DocumentTotals {
    /// Whether the VAT breakdown should be itemized per rate rather than
    /// shown as a single line.
    pub fn has_multiple_vat_rates(&self) -> bool {
        self.vat_rates.len() > 1
    }

    /// Copy rounded half-up to `dp` decimals, for display and persistence.
    ///
    /// Each VAT amount is rounded first and `total_vat` is the sum of the
    /// rounded amounts, so the breakdown always adds up.
    pub fn rounded(&self, dp: u32) -> DocumentTotals {
        let vat_rates: Vec<VatRateTotal> = self
            .vat_rates
            .iter()
            .map(|v| VatRateTotal {
                rate: v.rate,
                base_amount: round_half_up(v.base_amount, dp),
                amount: round_half_up(v.amount, dp),
            })
            .collect();
        let total_ht = round_half_up(self.total_ht, dp);
        let discount_amount = round_half_up(self.discount_amount, dp);
        let final_total_ht = total_ht.saturating_sub(discount_amount);
        let total_vat = sum_amounts(&vat_rates);
        DocumentTotals {
            total_ht,
            discount_amount,
            final_total_ht,
            vat_rates,
            total_vat,
            total_ttc: round_half_up(self.total_ttc, dp),
            final_total_ttc: final_total_ht.saturating_add(total_vat),
        }
    }
}

/// Re-check the arithmetic of a totals record, e.g. one loaded back from
/// storage. Reports every mismatch in a single error.
pub fn check_totals(totals: &DocumentTotals) -> Result<(), FactureError> {
    let mut problems = Vec::new();

    let expected_final_ht = totals.total_ht.saturating_sub(totals.discount_amount);
    if totals.final_total_ht != expected_final_ht {
        problems.push(format!(
            "final HT {} does not match HT {} - discount {}",
            totals.final_total_ht, totals.total_ht, totals.discount_amount
        ));
    }

    let breakdown_vat = sum_amounts(&totals.vat_rates);
    if totals.total_vat != breakdown_vat {
        problems.push(format!(
            "VAT total {} does not match sum of rate amounts {}",
            totals.total_vat, breakdown_vat
        ));
    }

    let expected_ttc = totals.final_total_ht.saturating_add(totals.total_vat);
    if totals.final_total_ttc != expected_ttc {
        problems.push(format!(
            "final TTC {} does not match final HT {} + VAT {}",
            totals.final_total_ttc, totals.final_total_ht, totals.total_vat
        ));
    }

    for (i, v) in totals.vat_rates.iter().enumerate() {
        if totals.vat_rates[..i].iter().any(|other| other.rate == v.rate) {
            problems.push(format!("rate {}% appears more than once", v.rate));
        }
        let expected = v.base_amount.saturating_mul(v.rate) / dec!(100);
        if v.amount.saturating_sub(expected).abs() > VAT_TOLERANCE {
            problems.push(format!(
                "VAT amount {} does not match base {} × {}% = {}",
                v.amount, v.base_amount, v.rate, expected
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(FactureError::Arithmetic(problems.join("; ")))
    }
}

fn sum_amounts(rates: &[VatRateTotal]) -> Decimal {
    rates
        .iter()
        .fold(Decimal::ZERO, |sum, v| sum.saturating_add(v.amount))
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
