pub mod config;
pub mod error;
pub mod extension;
pub mod formatter;
pub mod locale;
pub mod parser;
pub mod template;
pub mod types;

// Main API
pub use config::{FormatterConfig, NumberDefaults};
pub use error::{Error, Result};
pub use extension::{
    CurrencyOptions, HUMAN_READABLE_UNITS, HumanNumberOptions, NAME, NumberFormatterExtension,
    Operand, PercentOptions,
};
pub use formatter::{LocaleFormatter, extract_symbol, format_number};
pub use parser::parse_number_pattern;
pub use types::*;
