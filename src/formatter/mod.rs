//! Number formatting module
//!
//! Two formatters live here: `format_number`, the locale-independent
//! formatter with explicit separators, and [`LocaleFormatter`], which takes
//! symbols and patterns from the locale data. `extract_symbol` recovers the
//! currency symbol from a formatted amount.

mod digits;
mod locale_formatter;
mod number;
mod symbol;

pub use digits::MAX_FRACTION_DIGITS;
pub use locale_formatter::LocaleFormatter;
pub use number::format_number;
pub use symbol::extract_symbol;
