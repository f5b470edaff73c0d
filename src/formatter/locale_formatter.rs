//! Locale-aware decimal, currency and percent formatting
//!
//! A [`LocaleFormatter`] is built for one locale and one [`FormatStyle`], then
//! tuned through attribute setters before formatting values, the same way a
//! platform number formatter is used.

use tracing::debug;

use super::digits::{Digits, group_integer};
use crate::error::Result;
use crate::locale::{get_currency_info, get_locale_settings};
use crate::parser::parse_number_pattern;
use crate::types::{
    AffixToken, Affixes, FormatStyle, LocaleSettings, NumberPattern, RoundingMode, SymbolKind,
};

const NBSP: char = '\u{a0}';

/// Formatter bound to a locale and a style
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    locale: String,
    style: FormatStyle,
    settings: LocaleSettings,
    pattern: NumberPattern,
    fraction_digits: Option<u32>,
    decimal_separator: Option<String>,
    grouping_separator: Option<String>,
    rounding_mode: RoundingMode,
}

impl LocaleFormatter {
    /// Create a formatter for `locale` using the locale's pattern for `style`
    ///
    /// Unknown locales fall back to their language and then to the root settings.
    pub fn new(locale: &str, style: FormatStyle) -> Result<Self> {
        let settings = get_locale_settings(locale);
        let pattern = parse_number_pattern(settings.pattern(style))?;
        Ok(Self {
            locale: locale.to_string(),
            style,
            settings,
            pattern,
            fraction_digits: None,
            decimal_separator: None,
            grouping_separator: None,
            rounding_mode: RoundingMode::default(),
        })
    }

    /// Locale this formatter was built for
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Style this formatter was built for
    pub fn style(&self) -> FormatStyle {
        self.style
    }

    /// Show exactly `digits` fraction digits
    pub fn set_fraction_digits(&mut self, digits: u32) -> &mut Self {
        self.fraction_digits = Some(digits);
        self
    }

    /// Override the decimal separator
    pub fn set_decimal_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.decimal_separator = Some(separator.into());
        self
    }

    /// Override the grouping separator, including the monetary one
    pub fn set_grouping_separator(&mut self, separator: impl Into<String>) -> &mut Self {
        self.grouping_separator = Some(separator.into());
        self
    }

    /// Select how values are rounded; the default is half-even
    pub fn set_rounding_mode(&mut self, mode: RoundingMode) -> &mut Self {
        self.rounding_mode = mode;
        self
    }

    /// Look up one of the locale symbols
    pub fn symbol(&self, kind: SymbolKind) -> String {
        match kind {
            SymbolKind::IntlCurrency => self.settings.currency.clone(),
            SymbolKind::Currency => self.currency_symbol(&self.settings.currency),
            SymbolKind::Percent => self.settings.percent_symbol.clone(),
            SymbolKind::DecimalSeparator => self.decimal_separator().to_string(),
            SymbolKind::GroupingSeparator => self.grouping_separator().to_string(),
            SymbolKind::MinusSign => self.settings.minus_sign.clone(),
        }
    }

    /// Format a value in the formatter's style
    ///
    /// The currency style uses the locale's own currency.
    pub fn format(&self, value: f64) -> String {
        let currency = self.settings.currency.clone();
        self.render(value, &currency)
    }

    /// Format a monetary amount in the given ISO 4217 currency
    ///
    /// An empty code means the locale's own currency. Codes missing from the
    /// currency table are shown as the code itself.
    pub fn format_currency(&self, value: f64, currency: &str) -> String {
        let currency = currency.trim();
        let currency = if currency.is_empty() {
            self.settings.currency.clone()
        } else {
            currency.to_uppercase()
        };
        self.render(value, &currency)
    }

    fn decimal_separator(&self) -> &str {
        self.decimal_separator
            .as_deref()
            .unwrap_or(&self.settings.decimal_separator)
    }

    fn grouping_separator(&self) -> &str {
        self.grouping_separator
            .as_deref()
            .unwrap_or(&self.settings.grouping_separator)
    }

    fn currency_symbol(&self, code: &str) -> String {
        if let Some(symbol) = self.settings.currency_symbols.get(code) {
            return symbol.clone();
        }
        match get_currency_info(code) {
            Some(info) => info.symbol,
            None => {
                debug!(currency = %code, "unknown currency, showing its code");
                code.to_string()
            }
        }
    }

    fn fraction_range(&self, currency: &str) -> (u32, u32) {
        if let Some(digits) = self.fraction_digits {
            return (digits, digits);
        }
        if self.pattern.has_currency() {
            let digits = get_currency_info(currency).map_or(2, |info| info.fraction_digits);
            return (digits, digits);
        }
        (
            self.pattern.min_fraction_digits as u32,
            self.pattern.max_fraction_digits as u32,
        )
    }

    fn render(&self, value: f64, currency: &str) -> String {
        let value = if self.pattern.is_percent() {
            value * 100.0
        } else {
            value
        };
        if value.is_nan() {
            return "NaN".to_string();
        }

        let (min_fraction, max_fraction) = self.fraction_range(currency);
        let (body, negative) = match Digits::round(value, min_fraction, max_fraction, self.rounding_mode)
        {
            Some(digits) => (self.render_digits(&digits), digits.negative),
            None => ("∞".to_string(), value < 0.0),
        };

        let implicit_negative;
        let affixes = if negative {
            match &self.pattern.negative {
                Some(affixes) => affixes,
                None => {
                    let mut prefix = vec![AffixToken::Minus];
                    prefix.extend(self.pattern.positive.prefix.iter().cloned());
                    implicit_negative = Affixes {
                        prefix,
                        suffix: self.pattern.positive.suffix.clone(),
                    };
                    &implicit_negative
                }
            }
        } else {
            &self.pattern.positive
        };

        let symbol = self.currency_symbol(currency);
        let mut result = String::new();
        for token in &affixes.prefix {
            result.push_str(&self.render_token(token, &symbol));
        }
        // Keep an alphabetic symbol such as "CHF" apart from the digits
        if affixes.prefix.last() == Some(&AffixToken::Currency)
            && symbol.chars().last().is_some_and(char::is_alphabetic)
        {
            result.push(NBSP);
        }
        result.push_str(&body);
        if affixes.suffix.first() == Some(&AffixToken::Currency)
            && symbol.chars().next().is_some_and(char::is_alphabetic)
        {
            result.push(NBSP);
        }
        for token in &affixes.suffix {
            result.push_str(&self.render_token(token, &symbol));
        }
        result
    }

    fn render_digits(&self, digits: &Digits) -> String {
        let mut integer = digits.integer.clone();
        while integer.len() < self.pattern.min_integer_digits {
            integer.insert(0, '0');
        }
        if self.pattern.min_integer_digits == 0 && integer == "0" && !digits.fraction.is_empty() {
            integer.clear();
        }

        let mut body = match self.pattern.primary_grouping {
            Some(primary) => group_integer(
                &integer,
                self.grouping_separator(),
                primary,
                self.pattern.secondary_grouping,
            ),
            None => integer,
        };
        if !digits.fraction.is_empty() {
            body.push_str(self.decimal_separator());
            body.push_str(&digits.fraction);
        }
        body
    }

    fn render_token<'a>(&'a self, token: &'a AffixToken, symbol: &'a str) -> &'a str {
        match token {
            AffixToken::Currency => symbol,
            AffixToken::Percent => &self.settings.percent_symbol,
            AffixToken::Minus => &self.settings.minus_sign,
            AffixToken::Literal(text) => text,
        }
    }
}
