//! Decimal field parsing and locale formatting.
//!
//! User-facing numbers use a comma as decimal separator. Arithmetic always
//! happens on [`Decimal`]; the comma only appears at formatting time.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Result of normalizing a quantity or rate field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedField {
    /// Text to store and show in the field.
    pub display: String,
    /// Best-effort numeric value for downstream math.
    pub value: Decimal,
}

/// Normalize raw numeric input typed by the user.
///
/// Never fails: text without a number yields zero. While the user is still
/// typing a fraction ("12." or "12,0") the raw text is kept verbatim so the
/// field is not snapped back to "12"; the numeric value is computed anyway.
pub fn normalize(raw: &str) -> NormalizedField {
    let value = parse_lenient(raw);
    if is_mid_edit(raw) {
        return NormalizedField {
            display: raw.to_string(),
            value,
        };
    }
    NormalizedField {
        display: to_locale_string(value),
        value,
    }
}

/// True if `raw` ends in a decimal separator, or in a zero directly after one.
pub fn is_mid_edit(raw: &str) -> bool {
    let mut tail = raw.chars().rev();
    match tail.next() {
        Some(c) if is_separator(c) => true,
        Some('0') => tail.next().is_some_and(is_separator),
        _ => false,
    }
}

/// Parse the longest numeric prefix of `raw`, or `None` if it has no digits.
///
/// Accepts an optional sign, integer digits, and a fraction introduced by
/// either `.` or `,`. Trailing garbage is ignored ("12abc" reads as 12).
pub fn parse_field(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let mut chars = s.chars().peekable();
    let mut out = String::with_capacity(s.len() + 1);

    if let Some(&c) = chars.peek() {
        if c == '-' || c == '+' {
            if c == '-' {
                out.push('-');
            }
            chars.next();
        }
    }

    let mut int_digits = 0usize;
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        out.push(c);
        int_digits += 1;
        chars.next();
    }
    if int_digits == 0 {
        out.push('0');
    }

    let mut frac = String::new();
    if chars.peek().copied().is_some_and(is_separator) {
        chars.next();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            frac.push(c);
            chars.next();
        }
    }

    if int_digits == 0 && frac.is_empty() {
        return None;
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }

    // Too many digits for a Decimal counts as no number at all.
    let value = Decimal::from_str(&out).ok()?;
    Some(if value.is_zero() { Decimal::ZERO } else { value })
}

/// [`parse_field`], degrading to zero.
pub fn parse_lenient(raw: &str) -> Decimal {
    parse_field(raw).unwrap_or(Decimal::ZERO)
}

/// Whether `raw` holds no number although it is not blank.
pub fn is_invalid_numeric(raw: &str) -> bool {
    !raw.trim().is_empty() && parse_field(raw).is_none()
}

/// Shortest locale text for a value: trailing zeros dropped, comma separator.
pub fn to_locale_string(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

/// Round to 2 decimal places, half away from zero (commercial rounding).
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount: 2 decimal places, comma separator.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round2(value)).replace('.', ",")
}

/// Format a monetary amount followed by the currency symbol, e.g. "119,00 €".
pub fn format_money(value: Decimal, currency: &str) -> String {
    let amount = format_amount(value);
    if currency.is_empty() {
        amount
    } else {
        format!("{amount} {currency}")
    }
}

fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn normalize_plain_numbers() {
        assert_eq!(normalize("12").display, "12");
        assert_eq!(normalize("12").value, dec!(12));
        assert_eq!(normalize("12,5").display, "12,5");
        assert_eq!(normalize("12.5").display, "12,5");
        assert_eq!(normalize("12,50").display, "12,5");
        assert_eq!(normalize("12,50").value, dec!(12.5));
    }

    #[test]
    fn normalize_keeps_mid_edit_text() {
        let n = normalize("12.");
        assert_eq!(n.display, "12.");
        assert_eq!(n.value, dec!(12));

        let n = normalize("12,");
        assert_eq!(n.display, "12,");
        assert_eq!(n.value, dec!(12));

        let n = normalize("12,0");
        assert_eq!(n.display, "12,0");
        assert_eq!(n.value, dec!(12));
    }

    #[test]
    fn normalize_invalid_degrades_to_zero() {
        assert_eq!(normalize("abc").display, "0");
        assert_eq!(normalize("abc").value, Decimal::ZERO);
        assert_eq!(normalize("").display, "0");
        assert_eq!(normalize("-").value, Decimal::ZERO);
    }

    #[test]
    fn separator_alone_is_mid_edit() {
        let n = normalize(",");
        assert_eq!(n.display, ",");
        assert_eq!(n.value, Decimal::ZERO);
    }

    #[test]
    fn two_trailing_zeros_are_not_mid_edit() {
        assert!(!is_mid_edit("12,00"));
        assert_eq!(normalize("12,00").display, "12");
    }

    #[test]
    fn parse_prefix() {
        assert_eq!(parse_field("12abc"), Some(dec!(12)));
        assert_eq!(parse_field("  7,25 Stk"), Some(dec!(7.25)));
        assert_eq!(parse_field(",5"), Some(dec!(0.5)));
        assert_eq!(parse_field("-3"), Some(dec!(-3)));
        assert_eq!(parse_field("+3"), Some(dec!(3)));
        assert_eq!(parse_field("x12"), None);
        assert_eq!(parse_field(""), None);
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(normalize("-0").display, "0");
    }

    #[test]
    fn oversized_input_degrades() {
        let huge = "9".repeat(60);
        assert_eq!(parse_field(&huge), None);
        assert_eq!(parse_lenient(&huge), Decimal::ZERO);
    }

    #[test]
    fn invalid_numeric_flag() {
        assert!(is_invalid_numeric("abc"));
        assert!(!is_invalid_numeric(""));
        assert!(!is_invalid_numeric("  "));
        assert!(!is_invalid_numeric("3"));
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn format_amounts() {
        assert_eq!(format_amount(dec!(1190)), "1190,00");
        assert_eq!(format_amount(dec!(24.95)), "24,95");
        assert_eq!(format_amount(dec!(123.456)), "123,46");
        assert_eq!(format_amount(dec!(0.125)), "0,13");
        assert_eq!(format_money(dec!(119), "€"), "119,00 €");
        assert_eq!(format_money(dec!(119), ""), "119,00");
    }
}
