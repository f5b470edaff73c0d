//! Currency symbol extraction from formatted amounts

use std::sync::LazyLock;

use regex::Regex;

// Optional non-digit run, the number (digits, separators, whitespace), optional non-digit run
static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\D*)\s*([\d,.\s]+)\s*(\D*)$").expect("symbol pattern is a valid regex")
});

/// Get the currency symbol out of a formatted monetary string
///
/// The symbol is the non-digit run before the number, or the one after it
/// when nothing precedes the number, trimmed of whitespace. Returns an empty
/// string when the text does not have that shape.
///
/// This assumes the symbol sits next to the digits. Locales whose separators
/// are not in `[,.\s]` (e.g. `’` in de_CH) do not match, and the minus sign of
/// a negative amount ends up in the leading run.
///
/// # Examples
/// ```
/// use number_format_filters::formatter::extract_symbol;
///
/// assert_eq!(extract_symbol("$1,234.56"), "$");
/// assert_eq!(extract_symbol("1.234,56 €"), "€");
/// assert_eq!(extract_symbol("1234"), "");
/// ```
pub fn extract_symbol(formatted: &str) -> String {
    SYMBOL_PATTERN
        .captures(formatted)
        .map(|caps| {
            let leading = caps.get(1).map_or("", |m| m.as_str());
            let trailing = caps.get(3).map_or("", |m| m.as_str());
            let symbol = if leading.is_empty() { trailing } else { leading };
            symbol.trim().to_string()
        })
        .unwrap_or_default()
}
