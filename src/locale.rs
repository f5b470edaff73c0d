//! Locale support for number formatting
//!
//! This module loads the embedded locale and currency tables and resolves
//! locale identifiers to [`LocaleSettings`], falling back from the most
//! specific identifier to its language and finally to the root settings.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::{parse_locale_id, parse_number_pattern};
use crate::types::{CurrencyInfo, FormatStyle, LocaleSettings};

/// Locale used when neither the configuration nor the platform provide one
pub const FALLBACK_LOCALE: &str = "en_US";

/// Represents a locale manager that provides access to locale-specific settings
pub struct LocaleManager {
    root: LocaleSettings,
    locale_settings: HashMap<String, LocaleSettings>,
    currencies: HashMap<String, CurrencyInfo>,
}

// Global singleton for locale settings
static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

impl LocaleManager {
    /// Create a new locale manager with the embedded locale data
    fn new() -> Self {
        let mut manager = Self {
            root: LocaleSettings::default(),
            locale_settings: HashMap::new(),
            currencies: HashMap::new(),
        };

        if let Err(e) = manager.load_embedded_data() {
            // Keep going with whatever was loaded; lookups fall back to root
            warn!(error = %e, "failed to load embedded locale data");
        }

        manager
    }

    /// Load the embedded locale data from the TOML files
    fn load_embedded_data(&mut self) -> Result<()> {
        let currencies_toml = include_str!("locale/currencies.toml");
        self.parse_currencies(currencies_toml)?;

        let locale_settings_toml = include_str!("locale/locale_settings.toml");
        self.parse_locale_settings(locale_settings_toml)?;

        Ok(())
    }

    /// Parse the currency table
    fn parse_currencies(&mut self, toml_str: &str) -> Result<()> {
        let table: toml::Table =
            toml::from_str(toml_str).map_err(|e| Error::LocaleData(e.to_string()))?;

        for (code, value) in &table {
            let Some(entry) = value.as_table() else {
                warn!(%code, "currency entry is not a table, skipping");
                continue;
            };

            let mut info = CurrencyInfo::default();
            if let Some(symbol) = entry.get("symbol").and_then(|v| v.as_str()) {
                info.symbol = symbol.to_string();
            }
            if let Some(digits) = entry.get("digits").and_then(|v| v.as_integer()) {
                match u32::try_from(digits) {
                    Ok(digits) => info.fraction_digits = digits,
                    Err(_) => {
                        warn!(%code, digits, "negative fraction digits, skipping");
                        continue;
                    }
                }
            }

            self.currencies.insert(code.to_uppercase(), info);
        }

        Ok(())
    }

    /// Parse the locale settings TOML data
    fn parse_locale_settings(&mut self, toml_str: &str) -> Result<()> {
        let table: toml::Table =
            toml::from_str(toml_str).map_err(|e| Error::LocaleData(e.to_string()))?;

        // First load base settings if available
        if let Some(base) = table.get("base") {
            let mut root = LocaleSettings::default();
            apply_locale_specific_settings(&mut root, base)?;
            self.root = root;
        }

        for locale_id in table.keys().filter(|k| k.as_str() != "base") {
            match self.inherit_settings(&table, locale_id) {
                Ok(settings) => {
                    self.locale_settings.insert(locale_id.clone(), settings);
                }
                Err(e) => warn!(locale = %locale_id, error = %e, "skipping locale entry"),
            }
        }

        Ok(())
    }

    /// Layer the entries of `locale_id` and its parents over the root settings
    fn inherit_settings(&self, table: &toml::Table, locale_id: &str) -> Result<LocaleSettings> {
        let id = parse_locale_id(locale_id)
            .ok_or_else(|| Error::LocaleData(format!("invalid locale identifier '{locale_id}'")))?;

        let mut settings = self.root.clone();
        for ancestor in id.fallbacks().iter().rev() {
            if let Some(value) = table.get(ancestor) {
                apply_locale_specific_settings(&mut settings, value)?;
            }
        }

        for style in [FormatStyle::Decimal, FormatStyle::Currency, FormatStyle::Percent] {
            parse_number_pattern(settings.pattern(style))?;
        }

        Ok(settings)
    }

    /// Get the global locale manager instance
    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }

    /// Resolve a locale identifier through its fallback chain
    fn resolve(&self, locale: &str) -> &LocaleSettings {
        let Some(id) = parse_locale_id(locale) else {
            debug!(%locale, "unparseable locale, using root settings");
            return &self.root;
        };

        for candidate in id.fallbacks() {
            if let Some(settings) = self.locale_settings.get(&candidate) {
                if candidate != id.to_string() {
                    debug!(%locale, %candidate, "locale resolved through fallback");
                }
                return settings;
            }
        }

        debug!(%locale, "unknown locale, using root settings");
        &self.root
    }
}

/// Apply the keys of one TOML entry to a settings object
fn apply_locale_specific_settings(
    settings: &mut LocaleSettings,
    value: &toml::Value,
) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| Error::LocaleData("Locale setting is not a table".to_string()))?;

    let fields: [(&str, &mut String); 8] = [
        ("decimal", &mut settings.decimal_separator),
        ("group", &mut settings.grouping_separator),
        ("percent", &mut settings.percent_symbol),
        ("minus", &mut settings.minus_sign),
        ("decimal_pattern", &mut settings.decimal_pattern),
        ("currency_pattern", &mut settings.currency_pattern),
        ("percent_pattern", &mut settings.percent_pattern),
        ("currency", &mut settings.currency),
    ];
    for (key, target) in fields {
        if let Some(v) = table.get(key) {
            let text = v
                .as_str()
                .ok_or_else(|| Error::LocaleData(format!("'{key}' must be a string")))?;
            *target = text.to_string();
        }
    }

    if let Some(symbols) = table.get("symbols") {
        let symbols = symbols
            .as_table()
            .ok_or_else(|| Error::LocaleData("'symbols' must be a table".to_string()))?;
        for (code, symbol) in symbols {
            let symbol = symbol
                .as_str()
                .ok_or_else(|| Error::LocaleData(format!("symbol for {code} must be a string")))?;
            settings
                .currency_symbols
                .insert(code.to_uppercase(), symbol.to_string());
        }
    }

    Ok(())
}

/// Get locale settings by locale identifier (e.g., "en_US", "de-CH")
///
/// Unknown locales resolve to their language, then to the root settings.
pub fn get_locale_settings(locale_id: &str) -> LocaleSettings {
    LocaleManager::get().resolve(locale_id).clone()
}

/// Get the currency information for an ISO 4217 code
pub fn get_currency_info(code: &str) -> Option<CurrencyInfo> {
    LocaleManager::get()
        .currencies
        .get(&code.to_uppercase())
        .cloned()
}

/// List all available locale identifiers
pub fn list_available_locales() -> Vec<String> {
    let mut locales: Vec<String> = LocaleManager::get()
        .locale_settings
        .keys()
        .cloned()
        .collect();
    locales.sort();
    locales
}

/// The platform default locale, normalized to `ll_RR`
pub fn default_locale() -> String {
    let detected = sys_locale::get_locale().and_then(|raw| parse_locale_id(&raw));
    match detected {
        Some(id) => {
            debug!(locale = %id, "using platform locale");
            id.to_string()
        }
        None => {
            debug!(locale = FALLBACK_LOCALE, "platform locale unavailable");
            FALLBACK_LOCALE.to_string()
        }
    }
}
