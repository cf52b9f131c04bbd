//! Integer-scaled decimal value model.
//!
//! Every monetary and rate number crosses the wire as an integer scaled by a
//! per-currency exponent. This module provides the conversions between scaled
//! integers, display floats and user-entered strings, plus the `div` snapping
//! used by the rate calculator.

use rust_decimal::Decimal as RustDecimal;
use std::str::FromStr;
use thiserror::Error;

/// Scale used for wallet-side values and commission percents.
pub const DEFAULT_DECIMAL: u32 = 2;

/// Rounding direction for the final integer snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceil,
    /// Round to nearest, halves away from zero.
    NearestHalfUp,
}

/// Errors from parsing user-entered amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("not a number: {0}")]
    NotANumber(String),
    #[error("too many decimal places: at most {max} allowed")]
    TooManyDecimalPlaces { max: u32 },
    #[error("value must be positive")]
    NotPositive,
}

/// Convert a scaled integer to its real value: `i * 10^(-d)`.
pub fn to_float(i: i64, d: u32) -> f64 {
    i as f64 / 10f64.powi(d as i32)
}

/// Convert a real value to a scaled integer: `round(x * 10^d)`.
///
/// Precision loss is permitted only here, in the final snap. The scaled
/// intermediate is rounded to six fractional digits first so that double
/// representation error (e.g. `150.00000000000003`) cannot push a `Ceil`
/// across an integer boundary.
pub fn to_int(x: f64, d: u32, mode: RoundMode) -> i64 {
    let scaled = x * 10f64.powi(d as i32);
    let scaled = (scaled * 1e6).round() / 1e6;
    let snapped = match mode {
        RoundMode::Floor => scaled.floor(),
        RoundMode::Ceil => scaled.ceil(),
        RoundMode::NearestHalfUp => {
            if scaled >= 0.0 {
                (scaled + 0.5).floor()
            } else {
                (scaled - 0.5).ceil()
            }
        }
    };
    snapped as i64
}

/// Parse a user-entered amount string into a scaled integer.
///
/// Commas are accepted as decimal separators. More than `d` fractional
/// digits is rejected rather than silently rounded: the user typed a value
/// the currency cannot represent.
pub fn parse_scaled(s: &str, d: u32) -> Result<i64, DecimalError> {
    let normalized = s.trim().replace(',', ".");
    let parsed = RustDecimal::from_str(&normalized)
        .map_err(|_| DecimalError::NotANumber(s.to_string()))?;
    if parsed.normalize().scale() > d {
        return Err(DecimalError::TooManyDecimalPlaces { max: d });
    }
    let scaled = (parsed * RustDecimal::from(10i64.pow(d))).normalize();
    scaled
        .try_into()
        .map_err(|_| DecimalError::NotANumber(s.to_string()))
}

/// Snap a scaled value down to a multiple of `div`.
pub fn snap_down(v: i64, div: i64) -> i64 {
    if div <= 1 {
        return v;
    }
    v.div_euclid(div) * div
}

/// Snap a scaled value up to a multiple of `div`.
pub fn snap_up(v: i64, div: i64) -> i64 {
    if div <= 1 {
        return v;
    }
    let down = v.div_euclid(div) * div;
    if down == v {
        v
    } else {
        down + div
    }
}

/// Format a scaled integer for display at `d` fractional digits.
pub fn format_value(i: i64, d: u32) -> String {
    if d == 0 {
        return i.to_string();
    }
    let p = 10i64.pow(d);
    let sign = if i < 0 { "-" } else { "" };
    let abs = i.abs();
    format!("{}{}.{:0width$}", sign, abs / p, abs % p, width = d as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(100_00, 2), 100.0);
        assert_eq!(to_float(50, 2), 0.5);
        assert_eq!(to_float(7, 0), 7.0);
        assert_eq!(to_float(-1234, 2), -12.34);
    }

    #[test]
    fn test_to_int_modes() {
        assert_eq!(to_int(1.234, 2, RoundMode::Floor), 123);
        assert_eq!(to_int(1.234, 2, RoundMode::Ceil), 124);
        assert_eq!(to_int(1.235, 2, RoundMode::NearestHalfUp), 124);
        assert_eq!(to_int(1.234, 2, RoundMode::NearestHalfUp), 123);
        assert_eq!(to_int(-1.235, 2, RoundMode::NearestHalfUp), -124);
    }

    #[test]
    fn test_to_int_absorbs_representation_error() {
        // 1.15 is not representable exactly; a naive floor would yield 114.
        assert_eq!(to_int(1.15, 2, RoundMode::Floor), 115);
        // 0.1 + 0.2 != 0.3 in doubles.
        assert_eq!(to_int(0.1 + 0.2, 2, RoundMode::Ceil), 30);
    }

    #[test]
    fn test_roundtrip_property() {
        for d in 0..=4u32 {
            for i in [0i64, 1, 99, 100, 12345, 999_999_999, 10i64.pow(12)] {
                assert_eq!(to_int(to_float(i, d), d, RoundMode::NearestHalfUp), i);
            }
        }
    }

    #[test]
    fn test_parse_scaled() {
        assert_eq!(parse_scaled("12.34", 2), Ok(1234));
        assert_eq!(parse_scaled("12,34", 2), Ok(1234));
        assert_eq!(parse_scaled("12", 2), Ok(1200));
        assert_eq!(parse_scaled("0.5", 2), Ok(50));
        assert_eq!(
            parse_scaled("12.345", 2),
            Err(DecimalError::TooManyDecimalPlaces { max: 2 })
        );
        assert!(matches!(
            parse_scaled("abc", 2),
            Err(DecimalError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_scaled_trailing_zeros() {
        // "12.340" carries three digits but represents a 2-place value.
        assert_eq!(parse_scaled("12.340", 2), Ok(1234));
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap_down(4925, 100), 4900);
        assert_eq!(snap_up(4925, 100), 5000);
        assert_eq!(snap_down(4900, 100), 4900);
        assert_eq!(snap_up(4900, 100), 4900);
        assert_eq!(snap_down(57, 1), 57);
        assert_eq!(snap_up(57, 1), 57);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4900, 2), "49.00");
        assert_eq!(format_value(7, 2), "0.07");
        assert_eq!(format_value(-1234, 2), "-12.34");
        assert_eq!(format_value(42, 0), "42");
    }
}
