//! Number formatting for price display.
//!
//! Prices always render with exactly two decimal places and comma thousands
//! separators (`1234.5` → `1,234.50`). Rounding goes through `Decimal` so the
//! half-cent case rounds away from zero instead of following the binary
//! representation of the `f64`.

use rust_decimal::prelude::*;

/// Inserts comma thousands separators into the integer part of a plain
/// decimal string. The fractional part is left untouched.
pub fn group_thousands(formatted: &str) -> String {
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted, None),
    };

    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a price with exactly two decimals and thousands separators.
pub fn display_price(amount: f64) -> String {
    display_with_decimals(amount, 2)
}

/// Format an f64 with a fixed number of decimals and thousands separators.
pub fn display_with_decimals(amount: f64, decimals: u32) -> String {
    let fixed = match Decimal::from_f64(amount) {
        Some(d) => {
            let mut rounded =
                d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        // Outside Decimal's range (or not finite): plain float formatting.
        None => format!("{:.1$}", amount, decimals as usize),
    };
    group_thousands(&fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands_integers() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567890"), "1,234,567,890");
    }

    #[test]
    fn test_group_thousands_keeps_fraction() {
        assert_eq!(group_thousands("1234.50"), "1,234.50");
        assert_eq!(group_thousands("999.999"), "999.999");
    }

    #[test]
    fn test_group_thousands_negative() {
        assert_eq!(group_thousands("-1"), "-1");
        assert_eq!(group_thousands("-1000"), "-1,000");
        assert_eq!(group_thousands("-123456.78"), "-123,456.78");
    }

    #[test]
    fn test_display_price_two_decimals() {
        assert_eq!(display_price(1234.5), "1,234.50");
        assert_eq!(display_price(0.5), "0.50");
        assert_eq!(display_price(0.0), "0.00");
        assert_eq!(display_price(65432.1), "65,432.10");
        assert_eq!(display_price(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn test_display_price_rounds_half_away_from_zero() {
        assert_eq!(display_price(0.125), "0.13");
        assert_eq!(display_price(2.375), "2.38");
        assert_eq!(display_price(0.004), "0.00");
        assert_eq!(display_price(99.999), "100.00");
    }

    #[test]
    fn test_display_with_decimals_explicit() {
        assert_eq!(display_with_decimals(1.0, 0), "1");
        assert_eq!(display_with_decimals(1234.5678, 3), "1,234.568");
    }
}
