//! Decimal rounding and rendering of `f64` values.
//!
//! Rounding works on the shortest decimal expansion that round-trips to the
//! same `f64`, so `9.85` rounds to `9.9` even though the nearest binary
//! value sits just below 9.85.

use rust_decimal::{Decimal, RoundingStrategy};

/// Significant digits kept when echoing a value back to the user
const ECHO_SIGNIFICANT_DIGITS: u32 = 15;

/// A rounded value and its rendering with a fixed number of places
#[derive(Debug, Clone, PartialEq)]
pub struct Rounded {
    pub value: f64,
    pub text: String,
}

/// Round half away from zero to `places` decimal places
pub fn round_half_away(value: f64, places: u32) -> Rounded {
    if !value.is_finite() {
        return Rounded {
            value,
            text: value.to_string(),
        };
    }

    let text = match to_decimal(value) {
        Some(decimal) => {
            let rounded = unsigned_zero(
                decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero),
            );
            pad_places(rounded.to_string(), rounded.scale(), places)
        }
        None => fixed_outside_decimal_range(value, places),
    };

    let value = text.parse().unwrap_or(value);
    Rounded { value, text }
}

/// Render a value the way a person would have typed it: at most 15
/// significant digits, no trailing zeros, no exponent
pub fn echo(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    to_decimal(value)
        .and_then(|d| {
            d.round_sf_with_strategy(
                ECHO_SIGNIFICANT_DIGITS,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
        .map(|d| unsigned_zero(d.normalize()).to_string())
        .unwrap_or_else(|| {
            // f64 Display never uses an exponent; cut to 15 digits first
            let cut: f64 = format!("{:.*e}", ECHO_SIGNIFICANT_DIGITS as usize - 1, value)
                .parse()
                .unwrap_or(value);
            strip_negative_zero(cut.to_string())
        })
}

/// Exact decimal for the shortest round-trip digits of `value`.
/// `None` when they do not fit a `Decimal` (beyond ~7.9e28 or more than 28 places).
fn to_decimal(value: f64) -> Option<Decimal> {
    // `{:e}` yields the shortest round-trip digits, e.g. "-9.85e0"
    Decimal::from_scientific(&format!("{:e}", value)).ok()
}

fn unsigned_zero(decimal: Decimal) -> Decimal {
    if decimal.is_zero() {
        Decimal::ZERO
    } else {
        decimal
    }
}

/// Append zeros so `text`, which shows `scale` places, shows exactly `places`
fn pad_places(mut text: String, scale: u32, places: u32) -> String {
    if places > scale {
        if scale == 0 {
            text.push('.');
        }
        text.push_str(&"0".repeat((places - scale) as usize));
    }
    text
}

/// Magnitudes past `Decimal::MAX` are whole numbers in `f64`; tiny ones with
/// too many digits are left to the float formatter
fn fixed_outside_decimal_range(value: f64, places: u32) -> String {
    let places = places as usize;
    let text = if value.abs() >= 1.0 {
        let mut text = value.to_string();
        if places > 0 {
            text.push('.');
            text.push_str(&"0".repeat(places));
        }
        text
    } else {
        format!("{:.*}", places, value)
    };
    strip_negative_zero(text)
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64, places: u32) -> String {
        round_half_away(value, places).text
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(fixed(9.85, 1), "9.9");
        assert_eq!(fixed(-9.85, 1), "-9.9");
        assert_eq!(fixed(9.84, 1), "9.8");
        assert_eq!(fixed(9.86, 1), "9.9");
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(-0.5, 0), "-1");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(1.005, 2), "1.01");
        assert_eq!(fixed(0.95, 0), "1");
    }

    #[test]
    fn test_fixed_places_are_padded() {
        assert_eq!(fixed(1.0, 2), "1.00");
        assert_eq!(fixed(1.0, 0), "1");
        assert_eq!(fixed(2.12, 2), "2.12");
        assert_eq!(fixed(212.0, 1), "212.0");
        assert_eq!(fixed(0.001, 1), "0.0");
        assert_eq!(fixed(0.0, 3), "0.000");
        assert_eq!(fixed(1.5, 4), "1.5000");
    }

    #[test]
    fn test_carry_propagates() {
        assert_eq!(fixed(9.96, 1), "10.0");
        assert_eq!(fixed(99.5, 0), "100");
        assert_eq!(fixed(0.999, 2), "1.00");
        assert_eq!(fixed(0.06, 1), "0.1");
        assert_eq!(fixed(0.05, 1), "0.1");
        assert_eq!(fixed(0.04, 1), "0.0");
    }

    #[test]
    fn test_repeating_fractions() {
        assert_eq!(fixed(5.0 / 3.0, 1), "1.7");
        assert_eq!(fixed(5.0 / 3.0, 2), "1.67");
        assert_eq!(fixed(2.0 / 3.0, 0), "1");
        assert_eq!(fixed(1.0 / 3.0, 0), "0");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(fixed(-0.01, 1), "0.0");
        assert_eq!(fixed(-0.0, 0), "0");
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(round_half_away(-0.01, 1).value, 0.0);
    }

    #[test]
    fn test_rounded_value_matches_text() {
        let rounded = round_half_away(0.99996, 1);
        assert_eq!(rounded.text, "1.0");
        assert_eq!(rounded.value, 1.0);

        let rounded = round_half_away(-59.96 / 60.0, 1);
        assert_eq!(rounded.value, -1.0);
    }

    #[test]
    fn test_large_and_small_magnitudes() {
        assert_eq!(fixed(31_536_000.0, 1), "31536000.0");
        assert_eq!(fixed(1e21, 0), "1000000000000000000000");
        assert_eq!(fixed(1.5e-7, 3), "0.000");
    }

    #[test]
    fn test_magnitudes_beyond_decimal_range() {
        assert_eq!(fixed(1e30, 1), "1000000000000000000000000000000.0");
        assert_eq!(fixed(-1e30, 0), "-1000000000000000000000000000000");
        assert_eq!(fixed(1.2345678901234567e-20, 2), "0.00");
        assert_eq!(fixed(-1.2345678901234567e-20, 2), "0.00");
    }

    #[test]
    fn test_many_places() {
        let text = fixed(1.25, 100);
        assert_eq!(text.len(), 102);
        assert!(text.starts_with("1.25000"));
        assert_eq!(round_half_away(1.25, 100).value, 1.25);
    }

    #[test]
    fn test_echo() {
        assert_eq!(echo(0.1 + 0.2), "0.3");
        assert_eq!(echo(3.001), "3.001");
        assert_eq!(echo(1e3), "1000");
        assert_eq!(echo(212000.0), "212000");
        assert_eq!(echo(-60.0), "-60");
        assert_eq!(echo(56.9), "56.9");
        assert_eq!(echo(0.0), "0");
        assert_eq!(echo(-0.0), "0");
        assert_eq!(echo(0.001), "0.001");
        assert_eq!(echo(1.0 / 3.0), "0.333333333333333");
        assert_eq!(echo(2.0 / 3.0), "0.666666666666667");
        assert_eq!(echo(1e21), "1000000000000000000000");
        assert_eq!(echo(1.5e-7), "0.00000015");
        assert_eq!(echo(0.9999999999999999), "1");
    }

    #[test]
    fn test_echo_beyond_decimal_range() {
        assert_eq!(echo(1e30), "1000000000000000000000000000000");
        assert_eq!(echo(1.2345678901234567e30), "1234567890123460000000000000000");
    }
}
