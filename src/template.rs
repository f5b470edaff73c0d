//! minijinja integration
//!
//! Registers the extension into an [`Environment`]:
//!
//! - `| number_human(decimals, decimal_point, thousands_sep, disable_units)`
//! - `| currency_format(decimals, decimal_point, thousands_sep, currency, locale, omit_symbol)`
//! - `| percent_format(divide_by_100, decimals, decimal_point, locale)`
//! - `currency_symbol(currency, locale, prefix_with_space)`
//! - `percent_symbol(locale, prefix_with_space)`
//!
//! Arguments are positional; pass `none` to keep a default.
//!
//! ```
//! use std::sync::Arc;
//! use minijinja::{Environment, context};
//! use number_format_filters::{FormatterConfig, NumberFormatterExtension, template};
//!
//! let mut env = Environment::new();
//! let ext = NumberFormatterExtension::new(FormatterConfig::default().with_locale("en_US"));
//! template::register(&mut env, Arc::new(ext));
//!
//! let out = env
//!     .render_str("{{ visits|number_human }} / {{ 9.5|currency_format(2, none, none, 'USD') }}", context! { visits => 25000 })
//!     .unwrap();
//! assert_eq!(out, "25 K / $9.50");
//! ```

use std::sync::Arc;

use minijinja::value::{Rest, ValueKind};
use minijinja::{Environment, Error, ErrorKind, Value};

use crate::extension::{
    CurrencyOptions, HumanNumberOptions, NumberFormatterExtension, Operand, PercentOptions,
    parse_numeric,
};
use crate::formatter::MAX_FRACTION_DIGITS;

type FilterFn = fn(&NumberFormatterExtension, Value, &[Value]) -> Result<Value, Error>;
type FunctionFn = fn(&NumberFormatterExtension, &[Value]) -> Result<Value, Error>;

/// Filters installed by [`register`]
pub const FILTERS: [(&str, FilterFn); 3] = [
    ("number_human", number_human),
    ("percent_format", percent_format),
    ("currency_format", currency_format),
];

/// Global functions installed by [`register`]
pub const FUNCTIONS: [(&str, FunctionFn); 2] = [
    ("currency_symbol", currency_symbol),
    ("percent_symbol", percent_symbol),
];

/// Install the filters and functions of `extension` into `env`
pub fn register(env: &mut Environment<'_>, extension: Arc<NumberFormatterExtension>) {
    for (name, filter) in FILTERS {
        let ext = Arc::clone(&extension);
        env.add_filter(name, move |value: Value, args: Rest<Value>| {
            filter(&ext, value, &args.0)
        });
    }
    for (name, function) in FUNCTIONS {
        let ext = Arc::clone(&extension);
        env.add_function(name, move |args: Rest<Value>| function(&ext, &args.0));
    }
    tracing::debug!(
        extension = extension.name(),
        filters = FILTERS.len(),
        functions = FUNCTIONS.len(),
        "registered number formatting extension"
    );
}

/// Positional arguments after the filtered value
struct Arguments<'a> {
    operation: &'static str,
    values: &'a [Value],
}

impl<'a> Arguments<'a> {
    fn new(operation: &'static str, values: &'a [Value], max: usize) -> Result<Self, Error> {
        if values.len() > max {
            return Err(Error::new(
                ErrorKind::TooManyArguments,
                format!("{operation} takes at most {max} arguments"),
            ));
        }
        Ok(Self { operation, values })
    }

    /// The argument at `index`, treating `none` and undefined as absent
    fn get(&self, index: usize) -> Option<&'a Value> {
        self.values
            .get(index)
            .filter(|v| !v.is_none() && !v.is_undefined())
    }

    fn invalid(&self, what: &str, value: &Value) -> Error {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("{}: {what}, got {value}", self.operation),
        )
    }

    fn count(&self, index: usize) -> Result<Option<u32>, Error> {
        let Some(value) = self.get(index) else {
            return Ok(None);
        };
        let number = f64::try_from(value.clone())
            .map_err(|_| self.invalid("decimal places must be a number", value))?;
        if number.fract() != 0.0 || number < 0.0 {
            return Err(self.invalid("decimal places must be a non-negative integer", value));
        }
        if number > f64::from(MAX_FRACTION_DIGITS) {
            return Err(self.invalid("too many decimal places", value));
        }
        Ok(Some(number as u32))
    }

    fn text(&self, index: usize) -> Result<Option<String>, Error> {
        match self.get(index) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.invalid("expected a string", value)),
        }
    }

    fn flag(&self, index: usize, default: bool) -> bool {
        self.get(index).map_or(default, Value::is_true)
    }
}

/// A value that must be numeric; `none` counts as zero
fn number(operation: &'static str, value: &Value) -> Result<f64, Error> {
    let parsed = match value.kind() {
        ValueKind::Undefined | ValueKind::None => Some(0.0),
        ValueKind::Number => f64::try_from(value.clone()).ok(),
        ValueKind::String => value.as_str().and_then(parse_numeric),
        _ => None,
    };
    parsed.ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, format!("{operation}: value is not numeric"))
            .with_source(crate::error::Error::NotNumeric(value.to_string()))
    })
}

fn formatting_error(operation: &'static str, err: crate::error::Error) -> Error {
    Error::new(ErrorKind::InvalidOperation, format!("{operation} failed")).with_source(err)
}

fn number_human(ext: &NumberFormatterExtension, value: Value, args: &[Value]) -> Result<Value, Error> {
    let args = Arguments::new("number_human", args, 4)?;
    let options = HumanNumberOptions {
        decimals: args.count(0)?,
        decimal_point: args.text(1)?,
        thousands_separator: args.text(2)?,
        disable_unit_scaling: args.flag(3, false),
    };

    let operand = match value.kind() {
        ValueKind::Undefined | ValueKind::None => Operand::Null,
        ValueKind::Number => match f64::try_from(value.clone()) {
            Ok(number) => Operand::Number(number),
            Err(_) => return Ok(value),
        },
        ValueKind::String => match value.as_str().and_then(parse_numeric) {
            Some(number) => Operand::Number(number),
            None => return Ok(value),
        },
        // Anything else is not a number and is left alone
        _ => return Ok(value),
    };

    Ok(Value::from(ext.number_human(operand, &options)))
}

fn currency_format(ext: &NumberFormatterExtension, value: Value, args: &[Value]) -> Result<Value, Error> {
    let args = Arguments::new("currency_format", args, 6)?;
    let amount = number("currency_format", &value)?;
    let options = CurrencyOptions {
        decimals: args.count(0)?,
        decimal_point: args.text(1)?,
        thousands_separator: args.text(2)?,
        currency: args.text(3)?,
        locale: args.text(4)?,
        omit_symbol: args.flag(5, false),
    };

    ext.currency_format(amount, &options)
        .map(Value::from)
        .map_err(|e| formatting_error("currency_format", e))
}

fn percent_format(ext: &NumberFormatterExtension, value: Value, args: &[Value]) -> Result<Value, Error> {
    let args = Arguments::new("percent_format", args, 4)?;
    let amount = number("percent_format", &value)?;
    let options = PercentOptions {
        divide_by_100: args.flag(0, false),
        decimals: args.count(1)?,
        decimal_point: args.text(2)?,
        locale: args.text(3)?,
    };

    ext.percent_format(amount, &options)
        .map(Value::from)
        .map_err(|e| formatting_error("percent_format", e))
}

fn currency_symbol(ext: &NumberFormatterExtension, args: &[Value]) -> Result<Value, Error> {
    let args = Arguments::new("currency_symbol", args, 3)?;
    let currency = args.text(0)?;
    let locale = args.text(1)?;

    ext.currency_symbol(currency.as_deref(), locale.as_deref(), args.flag(2, true))
        .map(Value::from)
        .map_err(|e| formatting_error("currency_symbol", e))
}

fn percent_symbol(ext: &NumberFormatterExtension, args: &[Value]) -> Result<Value, Error> {
    let args = Arguments::new("percent_symbol", args, 2)?;
    let locale = args.text(0)?;

    ext.percent_symbol(locale.as_deref(), args.flag(1, true))
        .map(Value::from)
        .map_err(|e| formatting_error("percent_symbol", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatterConfig;
    use minijinja::context;

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        let ext = NumberFormatterExtension::new(FormatterConfig::default().with_locale("en_US"));
        register(&mut env, Arc::new(ext));
        env
    }

    fn render(template: &str) -> String {
        env().render_str(template, context! {}).unwrap()
    }

    #[test]
    fn test_operation_table() {
        let names: Vec<&str> = FILTERS
            .iter()
            .map(|(name, _)| *name)
            .chain(FUNCTIONS.iter().map(|(name, _)| *name))
            .collect();
        assert_eq!(
            names,
            vec![
                "number_human",
                "percent_format",
                "currency_format",
                "currency_symbol",
                "percent_symbol"
            ]
        );
    }

    #[test]
    fn test_number_human_filter() {
        assert_eq!(render("{{ 1500|number_human }}"), "2 K");
        assert_eq!(render("{{ 1500|number_human(1) }}"), "1.5 K");
        assert_eq!(render("{{ 2500000|number_human(2, ',') }}"), "2,50 M");
        assert_eq!(render("{{ 1500|number_human(none, none, none, true) }}"), "1,500");
        assert_eq!(render("{{ none|number_human }}"), "0");
        assert_eq!(render("{{ 'n/a'|number_human }}"), "n/a");
        assert_eq!(render("{{ '12000'|number_human }}"), "12 K");
    }

    #[test]
    fn test_number_human_passes_non_numbers_through() {
        let ext = NumberFormatterExtension::new(FormatterConfig::default().with_locale("en_US"));
        let flag = number_human(&ext, Value::from(true), &[]).unwrap();
        assert_eq!(flag, Value::from(true));

        let items = Value::from(vec![1, 2]);
        assert_eq!(number_human(&ext, items.clone(), &[]).unwrap(), items);
    }

    #[test]
    fn test_currency_format_filter() {
        assert_eq!(
            render("{{ 100|currency_format(none, none, none, 'USD', 'en_US') }}"),
            "$100"
        );
        assert_eq!(
            render("{{ 100|currency_format(none, none, none, 'USD', 'en_US', true) }}"),
            "100"
        );
        assert_eq!(render("{{ 1234.56|currency_format }}"), "$1,235");
        assert_eq!(render("{{ 1234.56|currency_format(2) }}"), "$1,234.56");
        assert_eq!(render("{{ 1234.5|currency_format(0) }}"), "$1,235");
        assert_eq!(
            render("{{ '1234.5'|currency_format(2, ',', '.', 'EUR', 'de_DE') }}"),
            "1.234,50\u{a0}€"
        );
    }

    #[test]
    fn test_currency_format_rejects_text() {
        let err = env()
            .render_str("{{ 'abc'|currency_format }}", context! {})
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_too_many_arguments() {
        let err = env()
            .render_str("{{ 1|number_human(1, '.', ',', false, 5) }}", context! {})
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooManyArguments);
    }

    #[test]
    fn test_invalid_decimal_places() {
        let err = env()
            .render_str("{{ 1|number_human(-1) }}", context! {})
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        let err = env()
            .render_str("{{ 1|number_human('two') }}", context! {})
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_decimal_places_limit() {
        let out = render("{{ 1|number_human(100) }}");
        assert_eq!(out.len(), 102);
        for template in [
            "{{ 1|number_human(101) }}",
            "{{ 1|number_human(4294967295) }}",
            "{{ 1|currency_format(50000000) }}",
            "{{ 1|percent_format(false, 101) }}",
        ] {
            let err = env().render_str(template, context! {}).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOperation, "{template}");
        }
    }

    #[test]
    fn test_percent_filter_and_symbol() {
        assert_eq!(render("{{ 12.5|percent_format(false, 1) }}"), "12.5 %");
        assert_eq!(render("{{ 12345|percent_format }}"), "12345 %");
        assert_eq!(render("{{ 50|percent_format(true, 1) }}"), "0.5 %");
        assert_eq!(render("[{{ percent_symbol() }}]"), "[ %]");
        assert_eq!(render("[{{ percent_symbol('de_DE', false) }}]"), "[%]");
    }

    #[test]
    fn test_currency_symbol_function() {
        assert_eq!(render("[{{ currency_symbol() }}]"), "[ $]");
        assert_eq!(render("[{{ currency_symbol('EUR', 'en_US', false) }}]"), "[€]");
        assert_eq!(render("[{{ currency_symbol('GBP', none, true) }}]"), "[ £]");
        assert_eq!(render("[{{ currency_symbol('', 'ja_JP', false) }}]"), "[￥]");
    }
}
