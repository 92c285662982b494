//! Display formatting for calculator results.
//!
//! Amounts are rounded the same way the calculators round them, then
//! rendered with the currency symbol in front and comma thousands grouping.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money, Percent, RoundingPrecision};

/// Format an amount for display, e.g. `$2,939.10`, `¥250,000`, `-£12.50`.
pub fn format_currency(amount: Money, currency: &Currency, precision: RoundingPrecision) -> String {
    let dp = precision.decimal_places(currency) as usize;
    let rounded = precision.round(amount, currency);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", dp, rounded.abs());
    format!("{sign}{}{}", currency.symbol(), group_thousands(&digits))
}

/// Format a percentage rate with two decimals, e.g. `6.50%`.
pub fn format_percent(rate_percent: Percent) -> String {
    let rounded = rate_percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// Insert a comma every three digits of the integer part.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Read an amount typed into a form field (`$350,000`, `-£12.50`, `$-12.50`).
///
/// Anything before the first digit is treated as the currency symbol, and a
/// `-` there makes the amount negative. After that only digits, one decimal
/// point, commas and spaces are accepted; anything else gives `None`.
pub fn parse_currency(display: &str) -> Option<Money> {
    let display = display.trim();
    let start = display.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let (prefix, number) = display.split_at(start);

    let negative = match prefix.matches('-').count() {
        0 => false,
        1 => true,
        _ => return None,
    };

    let mut cleaned = String::with_capacity(number.len());
    for c in number.chars() {
        match c {
            '0'..='9' | '.' => cleaned.push(c),
            ',' | ' ' => {}
            _ => return None,
        }
    }
    let value: Decimal = cleaned.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd_cents() {
        let s = format_currency(dec!(2939.1006), &Currency::USD, RoundingPrecision::MinorUnits);
        assert_eq!(s, "$2,939.10");
    }

    #[test]
    fn test_format_pads_missing_cents() {
        let s = format_currency(dec!(1000), &Currency::USD, RoundingPrecision::MinorUnits);
        assert_eq!(s, "$1,000.00");
    }

    #[test]
    fn test_format_whole_units() {
        let s = format_currency(dec!(529038.11), &Currency::USD, RoundingPrecision::WholeUnits);
        assert_eq!(s, "$529,038");
    }

    #[test]
    fn test_format_yen_has_no_minor_unit() {
        let s = format_currency(dec!(250000.4), &Currency::JPY, RoundingPrecision::MinorUnits);
        assert_eq!(s, "¥250,000");
    }

    #[test]
    fn test_format_negative() {
        let s = format_currency(dec!(-12.5), &Currency::GBP, RoundingPrecision::MinorUnits);
        assert_eq!(s, "-£12.50");
    }

    #[test]
    fn test_format_small_and_zero() {
        assert_eq!(
            format_currency(dec!(999), &Currency::EUR, RoundingPrecision::WholeUnits),
            "€999"
        );
        assert_eq!(
            format_currency(dec!(-0.001), &Currency::USD, RoundingPrecision::MinorUnits),
            "$0.00"
        );
    }

    #[test]
    fn test_format_millions() {
        let s = format_currency(dec!(1234567.891), &Currency::Other("NZD".into()), RoundingPrecision::MinorUnits);
        assert_eq!(s, "NZD 1,234,567.89");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(6.5)), "6.50%");
        assert_eq!(format_percent(dec!(4.125)), "4.13%");
    }

    #[test]
    fn test_parse_currency_reverses_format() {
        assert_eq!(parse_currency("$2,939.10"), Some(dec!(2939.10)));
        assert_eq!(parse_currency("-£12.50"), Some(dec!(-12.50)));
        assert_eq!(parse_currency("n/a"), None);
    }

    #[test]
    fn test_parse_currency_sign_after_symbol() {
        assert_eq!(parse_currency("$-12.50"), Some(dec!(-12.50)));
        assert_eq!(parse_currency("CHF 1 250.75"), Some(dec!(1250.75)));
        assert_eq!(parse_currency("--5"), None);
    }

    #[test]
    fn test_parse_currency_rejects_trailing_garbage() {
        assert_eq!(parse_currency("1e5"), None);
        assert_eq!(parse_currency("$12.50abc"), None);
        assert_eq!(parse_currency("1.2.3"), None);
    }
}
