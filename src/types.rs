//! Type definitions for locale-aware number formatting
//!
//! This module defines the types shared by the pattern parser, the locale
//! data manager and the formatters: parsed number patterns, locale settings,
//! currency information and the attributes a formatter can be configured with.

use std::collections::HashMap;
use std::fmt;

/// A single element of a pattern prefix or suffix
#[derive(Debug, Clone, PartialEq)]
pub enum AffixToken {
    /// Currency placeholder (¤), replaced by the currency symbol
    Currency,
    /// Percent placeholder (%), replaced by the locale percent symbol
    Percent,
    /// Minus placeholder (-) in an explicit negative subpattern
    Minus,
    /// Literal text, unquoted or taken from a 'quoted' run
    Literal(String),
}

/// Prefix and suffix surrounding the digits of a subpattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Affixes {
    /// Tokens rendered before the digits
    pub prefix: Vec<AffixToken>,
    /// Tokens rendered after the digits
    pub suffix: Vec<AffixToken>,
}

impl Affixes {
    fn contains(&self, wanted: &AffixToken) -> bool {
        self.prefix.iter().chain(self.suffix.iter()).any(|t| t == wanted)
    }
}

/// A parsed ICU-style number pattern such as `¤#,##0.00` or `#,##0 %`
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPattern {
    /// Affixes used for positive values and zero
    pub positive: Affixes,
    /// Affixes of an explicit negative subpattern (after `;`), if any
    pub negative: Option<Affixes>,
    /// Minimum number of integer digits (count of `0` before the decimal point)
    pub min_integer_digits: usize,
    /// Minimum number of fraction digits (count of `0` after the decimal point)
    pub min_fraction_digits: usize,
    /// Maximum number of fraction digits (`0` and `#` after the decimal point)
    pub max_fraction_digits: usize,
    /// Size of the group closest to the decimal point
    pub primary_grouping: Option<usize>,
    /// Size of the remaining groups, when it differs from the primary one
    pub secondary_grouping: Option<usize>,
}

impl NumberPattern {
    /// Checks if the pattern renders a percent sign, meaning values are scaled by 100
    pub fn is_percent(&self) -> bool {
        self.positive.contains(&AffixToken::Percent)
    }

    /// Checks if the pattern renders a currency symbol
    pub fn has_currency(&self) -> bool {
        self.positive.contains(&AffixToken::Currency)
    }
}

/// Formatting style selected when building a locale formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// Plain decimal numbers (`#,##0.###`)
    Decimal,
    /// Monetary amounts (`¤#,##0.00`)
    Currency,
    /// Percentages (`#,##0%`); values are multiplied by 100
    Percent,
}

/// Symbols that can be looked up on a locale formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// ISO 4217 code of the locale currency, e.g. `USD`
    IntlCurrency,
    /// Local glyph of the locale currency, e.g. `$`
    Currency,
    /// Percent sign
    Percent,
    /// Decimal separator
    DecimalSeparator,
    /// Grouping separator
    GroupingSeparator,
    /// Minus sign
    MinusSign,
}

/// Rounding applied when a value has more fraction digits than allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Towards zero
    Down,
    /// Away from zero
    Up,
    /// Ties to the even neighbour
    #[default]
    HalfEven,
    /// Ties towards zero
    HalfDown,
    /// Ties away from zero
    HalfUp,
}

/// Currency information keyed by ISO 4217 code
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyInfo {
    /// Symbol used when the locale defines no override
    pub symbol: String,
    /// Number of fraction digits shown by default
    pub fraction_digits: u32,
}

impl Default for CurrencyInfo {
    fn default() -> Self {
        Self {
            symbol: "¤".to_string(),
            fraction_digits: 2,
        }
    }
}

/// Locale-specific settings for number formatting
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleSettings {
    /// Decimal separator
    pub decimal_separator: String,
    /// Grouping (thousands) separator
    pub grouping_separator: String,
    /// Percent sign
    pub percent_symbol: String,
    /// Minus sign
    pub minus_sign: String,
    /// Pattern for the decimal style
    pub decimal_pattern: String,
    /// Pattern for the currency style
    pub currency_pattern: String,
    /// Pattern for the percent style
    pub percent_pattern: String,
    /// ISO 4217 code of the currency used in the locale's region
    pub currency: String,
    /// Currency symbols that differ from the global currency table in this locale
    pub currency_symbols: HashMap<String, String>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            grouping_separator: ",".to_string(),
            percent_symbol: "%".to_string(),
            minus_sign: "-".to_string(),
            decimal_pattern: "#,##0.###".to_string(),
            currency_pattern: "¤\u{a0}#,##0.00".to_string(),
            percent_pattern: "#,##0%".to_string(),
            currency: "XXX".to_string(),
            currency_symbols: HashMap::new(),
        }
    }
}

impl LocaleSettings {
    /// Pattern string for the given style
    pub fn pattern(&self, style: FormatStyle) -> &str {
        match style {
            FormatStyle::Decimal => &self.decimal_pattern,
            FormatStyle::Currency => &self.currency_pattern,
            FormatStyle::Percent => &self.percent_pattern,
        }
    }
}

/// A parsed locale identifier such as `en_US` or `zh_Hant_TW`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId {
    /// Lower-case language subtag
    pub language: String,
    /// Title-case script subtag
    pub script: Option<String>,
    /// Upper-case region subtag (two letters or three digits)
    pub region: Option<String>,
}

impl LocaleId {
    /// Identifiers to try in order, most specific first
    pub fn fallbacks(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        if self.script.is_some() {
            if let Some(region) = &self.region {
                chain.push(format!("{}_{}", self.language, region));
            }
            chain.push(format!(
                "{}_{}",
                self.language,
                self.script.as_deref().unwrap_or_default()
            ));
        }
        if self.script.is_some() || self.region.is_some() {
            chain.push(self.language.clone());
        }
        chain
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "_{region}")?;
        }
        Ok(())
    }
}
