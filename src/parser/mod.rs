//! Pattern and locale identifier parsing
//!
//! This module turns ICU-style number patterns (`¤#,##0.00`) into
//! [`NumberPattern`](crate::types::NumberPattern) values and normalizes locale
//! identifiers. The main entry points are `parse_number_pattern` and
//! `parse_locale_id`.

mod locale_id;
mod pattern;
mod sections;
mod tokens;

pub use locale_id::parse_locale_id;
pub use pattern::parse_number_pattern;
