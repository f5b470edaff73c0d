//! Formatter configuration
//!
//! The configuration is built once at startup, in code or from a TOML file:
//!
//! ```toml
//! locale = "de_DE"
//! currency = "EUR"
//!
//! [number]
//! decimals = 1
//! decimal_point = ","
//! thousands_separator = "."
//! ```
//!
//! Every key is optional. A missing locale resolves to the platform locale, a
//! missing currency to the currency of the resolved locale.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::locale::{default_locale, get_locale_settings};

/// Defaults of the plain number formatter used by `number_human` and `percent_format`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NumberDefaults {
    /// Decimal places kept when a call does not ask for a count
    pub decimals: u32,
    /// Decimal point when a call does not provide one
    pub decimal_point: String,
    /// Thousands separator when a call does not provide one
    pub thousands_separator: String,
}

impl Default for NumberDefaults {
    fn default() -> Self {
        Self {
            decimals: 0,
            decimal_point: ".".to_string(),
            thousands_separator: ",".to_string(),
        }
    }
}

/// Locale, currency and number defaults of a formatter extension
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Locale identifier, e.g. `en_US`; `None` means the platform locale
    pub locale: Option<String>,
    /// ISO 4217 currency code; `None` means the currency of the locale
    pub currency: Option<String>,
    /// Defaults of the plain number formatter
    pub number: NumberDefaults,
}

impl FormatterConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_number_defaults(mut self, number: NumberDefaults) -> Self {
        self.number = number;
        self
    }

    /// The configured locale, else the platform default
    pub fn resolve_locale(&self) -> String {
        self.locale.clone().unwrap_or_else(default_locale)
    }

    /// The configured currency, else the international currency code of `locale`
    pub fn resolve_currency(&self, locale: &str) -> String {
        match &self.currency {
            Some(currency) => currency.clone(),
            None => get_locale_settings(locale).currency,
        }
    }
}
