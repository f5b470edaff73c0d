//! Plain number formatting with explicit separators
//!
//! This is the template host's classic `number_format`: a fixed number of
//! decimals, rounding half away from zero, and caller-chosen separators
//! (which may be empty or longer than one character). It ignores the locale.

use super::digits::{Digits, group_integer};
use crate::types::RoundingMode;

/// Format a number with fixed decimals and the given separators
///
/// # Examples
/// ```
/// use number_format_filters::formatter::format_number;
///
/// assert_eq!(format_number(1234.567, 2, ".", ","), "1,234.57");
/// assert_eq!(format_number(1234.567, 0, ",", " "), "1 235");
/// ```
pub fn format_number(
    value: f64,
    decimals: u32,
    decimal_point: &str,
    thousands_separator: &str,
) -> String {
    let Some(digits) = Digits::round(value, decimals, decimals, RoundingMode::HalfUp) else {
        return non_finite(value);
    };

    let mut result = String::new();
    if digits.negative {
        result.push('-');
    }
    result.push_str(&group_integer(&digits.integer, thousands_separator, 3, None));
    if !digits.fraction.is_empty() {
        result.push_str(decimal_point);
        result.push_str(&digits.fraction);
    }
    result
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}
