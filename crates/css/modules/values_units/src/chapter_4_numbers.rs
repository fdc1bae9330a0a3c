//! CSS Values & Units Level 3 — §4 Numbers
//! See <https://www.w3.org/TR/css-values-3/#numeric-types>

/// Round `value` to `precision` decimal places, half away from zero.
///
/// The magnitude is scaled to one extra digit and floored before the final
/// rounding step, so `0.24 * 2` at precision 1 gives `0.5`. The sign is put
/// back afterwards, which keeps `round(-x) == -round(x)`.
#[inline]
#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let exponent = i32::try_from(precision.saturating_add(1)).unwrap_or(i32::MAX);
    let multiplier = 10_f64.powi(exponent);
    if !multiplier.is_finite() {
        return value;
    }
    let whole = (value.abs() * multiplier).floor();
    ((whole / 10.0).round() * 10.0 / multiplier).copysign(value)
}

/// Serialize a number the way CSS authors write it: no trailing zeros,
/// no exponent, `-0` printed as `0`.
#[inline]
#[must_use]
pub fn serialize_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::{round_to_precision, serialize_number};

    #[test]
    fn rounds_to_requested_precision() {
        assert_eq!(round_to_precision(0.48, 1), 0.5);
        assert_eq!(round_to_precision(40.0, 5), 40.0);
        assert_eq!(round_to_precision(1.234_567, 2), 1.23);
        assert_eq!(round_to_precision(1.235_1, 2), 1.24);
        assert_eq!(round_to_precision(3.7, 0), 4.0);
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(round_to_precision(-0.4, 5), -0.4);
        assert_eq!(round_to_precision(-0.2, 1), -0.2);
        assert!(round_to_precision(-0.2, 5) < 0.0);
    }

    #[test]
    fn rounding_is_symmetric_around_zero() {
        for (value, precision) in [(0.2402, 1), (1.45, 1), (0.123_456, 3), (2.5, 0)] {
            assert_eq!(
                round_to_precision(-value, precision),
                -round_to_precision(value, precision)
            );
        }
        assert_eq!(round_to_precision(-0.2402, 1), -0.2);
        assert_eq!(round_to_precision(-1.45, 1), -1.5);
    }

    #[test]
    fn tiny_values_collapse_to_zero() {
        assert_eq!(round_to_precision(0.000_001, 5), 0.0);
    }

    #[test]
    fn huge_precision_leaves_value_alone() {
        assert_eq!(round_to_precision(1.5, u32::MAX), 1.5);
    }

    #[test]
    fn serializes_without_noise() {
        assert_eq!(serialize_number(40.0), "40");
        assert_eq!(serialize_number(0.5), "0.5");
        assert_eq!(serialize_number(-0.4), "-0.4");
        assert_eq!(serialize_number(-0.0), "0");
    }
}
