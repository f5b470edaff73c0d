use winnow::Parser;

use crate::error::{Error, Result};
use crate::parser::sections::{DigitLayout, parse_subpattern};
use crate::types::NumberPattern;

/// Parse an ICU-style number pattern
///
/// A pattern has a positive subpattern and an optional negative subpattern
/// separated by `;`. Only the affixes of the negative subpattern are used;
/// its digit part is ignored.
///
/// # Arguments
/// * `pattern` - The pattern string, e.g. `¤#,##0.00` or `#,##0.00 ¤;-#,##0.00 ¤`
///
/// # Examples
/// ```
/// use number_format_filters::parser::parse_number_pattern;
///
/// let pattern = parse_number_pattern("#,##0.00").unwrap();
/// assert_eq!(pattern.min_fraction_digits, 2);
/// assert_eq!(pattern.primary_grouping, Some(3));
/// ```
pub fn parse_number_pattern(pattern: &str) -> Result<NumberPattern> {
    let mut input = pattern;

    let make_err = |message: String| Error::Pattern {
        pattern: pattern.to_string(),
        message,
    };

    let (positive, digits) = parse_subpattern
        .parse_next(&mut input)
        .map_err(|e| make_err(format!("{e:?} at remaining input '{input}'")))?;

    let mut negative = None;
    if let Some(rest) = input.strip_prefix(';') {
        input = rest;
        let (affixes, _) = parse_subpattern
            .parse_next(&mut input)
            .map_err(|e| make_err(format!("{e:?} at remaining input '{input}'")))?;
        negative = Some(affixes);
    }

    if !input.is_empty() {
        return Err(make_err(format!("trailing characters '{input}'")));
    }

    let layout = digit_layout(&digits).map_err(make_err)?;

    Ok(NumberPattern {
        positive,
        negative,
        ..layout
    })
}

fn digit_layout(digits: &DigitLayout<'_>) -> std::result::Result<NumberPattern, String> {
    let integer_digits = digits.integer.replace(',', "");
    if integer_digits.is_empty() {
        return Err("no integer digit placeholder".to_string());
    }
    if integer_digits.contains("0#") {
        return Err("'#' cannot follow '0' in the integer part".to_string());
    }

    let fraction = digits.fraction.unwrap_or_default();
    if fraction.contains("#0") {
        return Err("'0' cannot follow '#' in the fraction part".to_string());
    }

    let (primary_grouping, secondary_grouping) = grouping_sizes(digits.integer);

    Ok(NumberPattern {
        positive: Default::default(),
        negative: None,
        min_integer_digits: integer_digits.matches('0').count(),
        min_fraction_digits: fraction.matches('0').count(),
        max_fraction_digits: fraction.len(),
        primary_grouping,
        secondary_grouping,
    })
}

/// Group sizes of the integer placeholders: `#,##,##0` gives (3, 2)
fn grouping_sizes(integer: &str) -> (Option<usize>, Option<usize>) {
    let groups: Vec<&str> = integer.split(',').collect();
    if groups.len() < 2 {
        return (None, None);
    }

    let primary = groups[groups.len() - 1].len();
    if primary == 0 {
        return (None, None);
    }

    let secondary = groups[groups.len() - 2].len();
    let secondary = (groups.len() > 2 && secondary > 0 && secondary != primary).then_some(secondary);

    (Some(primary), secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AffixToken;

    #[test]
    fn test_currency_prefix() {
        let pattern = parse_number_pattern("¤#,##0.00").unwrap();
        assert_eq!(pattern.positive.prefix, vec![AffixToken::Currency]);
        assert!(pattern.positive.suffix.is_empty());
        assert_eq!(pattern.min_integer_digits, 1);
        assert_eq!(pattern.min_fraction_digits, 2);
        assert_eq!(pattern.max_fraction_digits, 2);
        assert_eq!(pattern.primary_grouping, Some(3));
        assert_eq!(pattern.secondary_grouping, None);
        assert!(pattern.has_currency());
        assert!(!pattern.is_percent());
    }

    #[test]
    fn test_currency_suffix_with_space() {
        let pattern = parse_number_pattern("#,##0.00\u{a0}¤").unwrap();
        assert!(pattern.positive.prefix.is_empty());
        assert_eq!(
            pattern.positive.suffix,
            vec![
                AffixToken::Literal("\u{a0}".to_string()),
                AffixToken::Currency
            ]
        );
    }

    #[test]
    fn test_indian_grouping() {
        let pattern = parse_number_pattern("#,##,##0.###").unwrap();
        assert_eq!(pattern.primary_grouping, Some(3));
        assert_eq!(pattern.secondary_grouping, Some(2));
        assert_eq!(pattern.min_fraction_digits, 0);
        assert_eq!(pattern.max_fraction_digits, 3);
    }

    #[test]
    fn test_percent_pattern() {
        let pattern = parse_number_pattern("#,##0\u{a0}%").unwrap();
        assert!(pattern.is_percent());
        assert_eq!(pattern.max_fraction_digits, 0);
    }

    #[test]
    fn test_negative_subpattern() {
        let pattern = parse_number_pattern("¤#,##0.00;(¤#,##0.00)").unwrap();
        let negative = pattern.negative.unwrap();
        assert_eq!(
            negative.prefix,
            vec![AffixToken::Literal("(".to_string()), AffixToken::Currency]
        );
        assert_eq!(negative.suffix, vec![AffixToken::Literal(")".to_string())]);
    }

    #[test]
    fn test_quoted_literal() {
        let pattern = parse_number_pattern("'Total: '#,##0").unwrap();
        assert_eq!(
            pattern.positive.prefix,
            vec![AffixToken::Literal("Total: ".to_string())]
        );
        let pattern = parse_number_pattern("0'' ").unwrap();
        assert_eq!(
            pattern.positive.suffix,
            vec![AffixToken::Literal("' ".to_string())]
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(parse_number_pattern("").is_err());
        assert!(parse_number_pattern("¤").is_err());
        assert!(parse_number_pattern("0.#0").is_err());
        assert!(parse_number_pattern("0#").is_err());
        assert!(parse_number_pattern("0.00;-0.00;0").is_err());
    }
}
