//! Pixel-to-unit conversion of a single matched token.

use log::trace;

use crate::chapter_4_numbers::{round_to_precision, serialize_number};
use crate::chapter_6_dimensions::PxToken;

/// Converts matched pixel tokens into the configured output unit.
#[derive(Clone, Copy)]
pub struct PxFormatter<'conf> {
    /// Unit appended to converted numbers, e.g. `rpx`.
    pub unit: &'conf str,
    /// Decimal places kept after conversion.
    pub precision: u32,
    /// Tokens whose pixel value is strictly below this stay untouched.
    pub min_pixel_value: f64,
    /// Maps the pixel value to the output value before rounding.
    pub transform: &'conf dyn Fn(f64) -> f64,
}

impl PxFormatter<'_> {
    /// Produce the replacement text for `token`.
    ///
    /// The minimum, the transform and the rounding all see the unsigned
    /// magnitude; a leading `-` is applied to the result. Returns the token
    /// unchanged when its number does not parse, when the magnitude is below
    /// the minimum, or when the transform yields a non-finite value. A result
    /// that rounds to zero is written unit-less as `0`.
    #[must_use]
    pub fn format(&self, token: PxToken<'_>) -> String {
        let (negative, digits) = match token.number.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, token.number.strip_prefix('+').unwrap_or(token.number)),
        };
        let Ok(pixels) = digits.parse::<f64>() else {
            return token.text.to_owned();
        };
        if pixels < self.min_pixel_value {
            trace!("{} is below the minimum of {}px", token.text, self.min_pixel_value);
            return token.text.to_owned();
        }
        let magnitude = round_to_precision((self.transform)(pixels), self.precision);
        let converted = if negative { -magnitude } else { magnitude };
        if !converted.is_finite() {
            trace!("transform of {} is not finite", token.text);
            return token.text.to_owned();
        }
        if converted == 0.0 {
            return "0".to_owned();
        }
        [serialize_number(converted).as_str(), self.unit].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::PxFormatter;
    use crate::chapter_6_dimensions::PxToken;

    fn double(value: f64) -> f64 {
        value * 2.0
    }

    fn token<'text>(text: &'text str, number: &'text str) -> PxToken<'text> {
        PxToken { text, number }
    }

    fn formatter(min_pixel_value: f64) -> PxFormatter<'static> {
        PxFormatter {
            unit: "rpx",
            precision: 5,
            min_pixel_value,
            transform: &double,
        }
    }

    #[test]
    fn converts_with_transform_and_unit() {
        let conv = formatter(0.0);
        assert_eq!(conv.format(token("20px", "20")), "40rpx");
        assert_eq!(conv.format(token(".5px", ".5")), "1rpx");
        assert_eq!(conv.format(token("-0.2px", "-0.2")), "-0.4rpx");
    }

    #[test]
    fn sign_does_not_take_part_in_the_minimum() {
        let conv = formatter(2.0);
        assert_eq!(conv.format(token("-1px", "-1")), "-1px");
        assert_eq!(conv.format(token("-3px", "-3")), "-6rpx");
        assert_eq!(conv.format(token("+3px", "+3")), "6rpx");
    }

    #[test]
    fn negative_values_round_like_positive_ones() {
        let identity = |value: f64| value;
        let conv = PxFormatter {
            unit: "rpx",
            precision: 1,
            min_pixel_value: 0.0,
            transform: &identity,
        };
        assert_eq!(conv.format(token("0.2402px", "0.2402")), "0.2rpx");
        assert_eq!(conv.format(token("-0.2402px", "-0.2402")), "-0.2rpx");
    }

    #[test]
    fn zero_is_unitless() {
        let conv = formatter(0.0);
        assert_eq!(conv.format(token("0px", "0")), "0");
        assert_eq!(conv.format(token("0.000001px", "0.000001")), "0");
        assert_eq!(conv.format(token("-0.000001px", "-0.000001")), "0");
    }

    #[test]
    fn below_minimum_is_untouched() {
        let conv = formatter(2.0);
        assert_eq!(conv.format(token("1px", "1")), "1px");
        assert_eq!(conv.format(token("2px", "2")), "4rpx");
    }

    #[test]
    fn unparsable_or_non_finite_is_untouched() {
        let conv = formatter(0.0);
        assert_eq!(conv.format(token("px", "")), "px");
        let infinite = |_value: f64| f64::INFINITY;
        let broken = PxFormatter {
            transform: &infinite,
            ..conv
        };
        assert_eq!(broken.format(token("3px", "3")), "3px");
    }

    #[test]
    fn honours_precision_and_unit() {
        let identity = |value: f64| value;
        let conv = PxFormatter {
            unit: "rem",
            precision: 1,
            min_pixel_value: 0.0,
            transform: &identity,
        };
        assert_eq!(conv.format(token("0.48px", "0.48")), "0.5rem");
    }
}
