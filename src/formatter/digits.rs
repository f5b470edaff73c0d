use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::RoundingMode;

/// Largest number of fraction digits a formatter renders
pub const MAX_FRACTION_DIGITS: u32 = 100;

/// Digits of a finite value after rounding, without sign or separators
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Digits {
    pub integer: String,
    pub fraction: String,
    pub negative: bool,
}

fn strategy(mode: RoundingMode) -> RoundingStrategy {
    match mode {
        RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
        RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
        RoundingMode::Down => RoundingStrategy::ToZero,
        RoundingMode::Up => RoundingStrategy::AwayFromZero,
        RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
        RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
    }
}

impl Digits {
    /// Round `value` to at most `max_fraction` digits, keeping at least `min_fraction`
    ///
    /// The value is rounded on its shortest decimal representation, so `0.125`
    /// is a real tie and `1.005` rounds up under half-up. Returns `None` for
    /// NaN and infinities. Both counts are capped at [`MAX_FRACTION_DIGITS`].
    pub fn round(
        value: f64,
        min_fraction: u32,
        max_fraction: u32,
        mode: RoundingMode,
    ) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let max_fraction = max_fraction.min(MAX_FRACTION_DIGITS);

        let (negative, text) = match Decimal::from_str(&value.to_string()) {
            Ok(decimal) => {
                let rounded = decimal.round_dp_with_strategy(max_fraction, strategy(mode));
                (
                    rounded.is_sign_negative() && !rounded.is_zero(),
                    rounded.abs().to_string(),
                )
            }
            // Outside the 96-bit decimal range; such values have no fraction worth rounding
            Err(_) => (
                value < 0.0,
                format!("{:.*}", max_fraction as usize, value.abs()),
            ),
        };

        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
            None => (text, String::new()),
        };

        let mut fraction = fraction;
        let min_fraction = min_fraction.min(max_fraction) as usize;
        while fraction.len() > min_fraction && fraction.ends_with('0') {
            fraction.pop();
        }
        while fraction.len() < min_fraction {
            fraction.push('0');
        }

        Some(Self {
            integer,
            fraction,
            negative,
        })
    }
}

/// Insert `separator` between digit groups, counting from the right
///
/// The group nearest the decimal point has `primary` digits, the rest
/// `secondary` digits (Indian style `12,34,567`) or `primary` when unset.
pub(crate) fn group_integer(
    integer: &str,
    separator: &str,
    primary: usize,
    secondary: Option<usize>,
) -> String {
    let len = integer.len();
    if separator.is_empty() || primary == 0 || len <= primary {
        return integer.to_string();
    }

    let secondary = secondary.unwrap_or(primary).max(1);
    let mut groups: Vec<&str> = Vec::with_capacity(len / secondary + 1);
    let mut end = len - primary;
    groups.push(&integer[end..]);
    while end > 0 {
        let start = end.saturating_sub(secondary);
        groups.push(&integer[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded(value: f64, digits: u32, mode: RoundingMode) -> (String, String, bool) {
        let d = Digits::round(value, digits, digits, mode).unwrap();
        (d.integer, d.fraction, d.negative)
    }

    #[test]
    fn test_half_up_and_half_even_ties() {
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfUp).0, "3");
        assert_eq!(rounded(2.5, 0, RoundingMode::HalfEven).0, "2");
        assert_eq!(rounded(3.5, 0, RoundingMode::HalfEven).0, "4");
        assert_eq!(rounded(-2.5, 0, RoundingMode::HalfUp), ("3".into(), "".into(), true));
        assert_eq!(rounded(0.125, 2, RoundingMode::HalfUp).1, "13");
        assert_eq!(rounded(0.125, 2, RoundingMode::HalfEven).1, "12");
        assert_eq!(rounded(0.125, 2, RoundingMode::HalfDown).1, "12");
        assert_eq!(rounded(1.005, 2, RoundingMode::HalfUp), ("1".into(), "01".into(), false));
    }

    #[test]
    fn test_directed_modes() {
        assert_eq!(rounded(1.21, 1, RoundingMode::Ceiling).1, "3");
        assert_eq!(rounded(-1.21, 1, RoundingMode::Ceiling).1, "2");
        assert_eq!(rounded(-1.21, 1, RoundingMode::Floor).1, "3");
        assert_eq!(rounded(1.29, 1, RoundingMode::Down).1, "2");
        assert_eq!(rounded(1.21, 1, RoundingMode::Up).1, "3");
    }

    #[test]
    fn test_negative_zero_drops_sign() {
        assert_eq!(rounded(-0.001, 2, RoundingMode::HalfUp), ("0".into(), "00".into(), false));
        assert_eq!(rounded(-0.0, 0, RoundingMode::HalfUp), ("0".into(), "".into(), false));
    }

    #[test]
    fn test_fraction_range() {
        let d = Digits::round(1.5, 0, 3, RoundingMode::HalfEven).unwrap();
        assert_eq!(d.fraction, "5");
        let d = Digits::round(2.0, 0, 3, RoundingMode::HalfEven).unwrap();
        assert_eq!(d.fraction, "");
        let d = Digits::round(2.0, 2, 2, RoundingMode::HalfEven).unwrap();
        assert_eq!(d.fraction, "00");
        let d = Digits::round(1.23456, 0, 3, RoundingMode::HalfEven).unwrap();
        assert_eq!(d.fraction, "235");
    }

    #[test]
    fn test_huge_and_non_finite_values() {
        let d = Digits::round(1e30, 0, 0, RoundingMode::HalfUp).unwrap();
        assert_eq!(d.integer.len(), 31);
        assert!(Digits::round(f64::NAN, 0, 0, RoundingMode::HalfUp).is_none());
        assert!(Digits::round(f64::INFINITY, 0, 0, RoundingMode::HalfUp).is_none());
    }

    #[test]
    fn test_fraction_digits_are_capped() {
        let d = Digits::round(1.0, u32::MAX, u32::MAX, RoundingMode::HalfUp).unwrap();
        assert_eq!(d.fraction.len(), MAX_FRACTION_DIGITS as usize);
        assert!(d.fraction.chars().all(|c| c == '0'));
        let d = Digits::round(1e30, 150, 150, RoundingMode::HalfUp).unwrap();
        assert_eq!(d.fraction.len(), MAX_FRACTION_DIGITS as usize);
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_integer("1234567", ",", 3, None), "1,234,567");
        assert_eq!(group_integer("123", ",", 3, None), "123");
        assert_eq!(group_integer("1234", "", 3, None), "1234");
        assert_eq!(group_integer("12345678", ",", 3, Some(2)), "1,23,45,678");
        assert_eq!(group_integer("1234567", "\u{a0}", 3, None), "1\u{a0}234\u{a0}567");
        assert_eq!(group_integer("1234567", "--", 3, None), "1--234--567");
    }
}
