//! Line and invoice-wide money math.
//!
//! Line amounts are summed at full precision; rounding to 2 decimal places
//! happens once per displayed figure. All arithmetic is checked, an overflow
//! degrades to zero instead of panicking.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::number::{parse_lenient, round2};
use super::types::{Invoice, LineItem};

/// Derived amounts of an invoice snapshot. Never stored on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Unrounded sum of all line amounts.
    pub subtotal_exact: Decimal,
    /// Subtotal rounded to 2 decimal places.
    pub subtotal: Decimal,
    /// Percentage extracted from the tax label.
    pub tax_rate: Decimal,
    /// Tax on the rounded subtotal, rounded to 2 decimal places.
    pub tax: Decimal,
    /// `subtotal + tax`, exactly.
    pub total: Decimal,
}

impl Totals {
    pub const ZERO: Totals = Totals {
        subtotal_exact: Decimal::ZERO,
        subtotal: Decimal::ZERO,
        tax_rate: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

/// Quantity times rate, or zero unless both parse to non-zero numbers.
pub fn line_amount(quantity: &str, rate: &str) -> Decimal {
    let q = parse_lenient(quantity);
    let r = parse_lenient(rate);
    if q.is_zero() || r.is_zero() {
        return Decimal::ZERO;
    }
    q.checked_mul(r).unwrap_or_else(|| {
        tracing::trace!(quantity, rate, "line amount overflow, counting as zero");
        Decimal::ZERO
    })
}

/// Full-precision sum of line amounts, in iteration order.
pub fn subtotal<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Decimal {
    items.into_iter().fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.amount()).unwrap_or(acc)
    })
}

/// First `<digits>%` token of a free-text label as a percentage.
///
/// "VAT 19%" yields 19, "7% off, 19% VAT" yields 7. `None` if the label has
/// no such token (or the digit run is too long to be a number).
pub fn find_rate_percent(label: &str) -> Option<Decimal> {
    let mut run_start: Option<usize> = None;
    for (i, c) in label.char_indices() {
        if c.is_ascii_digit() {
            run_start.get_or_insert(i);
            continue;
        }
        if c == '%' {
            if let Some(start) = run_start {
                if let Ok(rate) = label[start..i].parse::<Decimal>() {
                    return Some(rate);
                }
            }
        }
        run_start = None;
    }
    None
}

/// [`find_rate_percent`], degrading to zero.
pub fn extract_rate_percent(label: &str) -> Decimal {
    find_rate_percent(label).unwrap_or(Decimal::ZERO)
}

/// `subtotal * rate / 100`, rounded to 2 decimal places.
pub fn tax_amount(subtotal: Decimal, rate_percent: Decimal) -> Decimal {
    subtotal
        .checked_mul(rate_percent)
        .and_then(|v| v.checked_div(dec!(100)))
        .map(round2)
        .unwrap_or(Decimal::ZERO)
}

/// Compute subtotal, tax and total over every line of every page.
///
/// Page boundaries have no influence on the result.
pub fn calculate_totals(invoice: &Invoice) -> Totals {
    let subtotal_exact = subtotal(invoice.line_items());
    let subtotal = round2(subtotal_exact);
    let tax_rate = extract_rate_percent(&invoice.tax_label);
    let tax = tax_amount(subtotal, tax_rate);
    let total = subtotal.checked_add(tax).unwrap_or(subtotal);

    Totals {
        subtotal_exact,
        subtotal,
        tax_rate,
        tax,
        total,
    }
}
