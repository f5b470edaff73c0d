use std::sync::Arc;

use minijinja::{Environment, context};
use number_format_filters::{FormatterConfig, NumberFormatterExtension};

fn environment(config: FormatterConfig) -> Environment<'static> {
    let mut env = Environment::new();
    Arc::new(NumberFormatterExtension::new(config)).register(&mut env);
    env
}

#[test]
fn test_report_template() {
    let env = environment(FormatterConfig::default().with_locale("en_US"));
    let template = "\
{{ visits|number_human }} visits, \
{{ revenue|currency_format(2) }} revenue, \
{{ share|percent_format(false, 1) }} share";
    let out = env
        .render_str(
            template,
            context! { visits => 1_250_000, revenue => 9876.5, share => 12.34 },
        )
        .unwrap();
    assert_eq!(out, "1 M visits, $9,876.50 revenue, 12.3 % share");
}

#[test]
fn test_locale_from_configuration() {
    let env = environment(FormatterConfig::default().with_locale("de_DE"));
    let out = env
        .render_str(
            "{{ 1234.5|currency_format(2) }}|{{ 1234.5|currency_format(2, none, none, none, none, true) }}|{{ currency_symbol(none, none, false) }}",
            context! {},
        )
        .unwrap();
    assert_eq!(out, "1.234,50\u{a0}€|1.234,50|€");
}

#[test]
fn test_configured_currency() {
    let config = FormatterConfig::default()
        .with_locale("en_US")
        .with_currency("GBP");
    let env = environment(config);
    let out = env
        .render_str("{{ 5|currency_format }}", context! {})
        .unwrap();
    assert_eq!(out, "£5");
}

#[test]
fn test_templates_loaded_by_name() {
    let mut env = environment(FormatterConfig::default().with_locale("en_US"));
    env.add_template("price.txt", "{{ price|currency_format(0, none, none, 'JPY') }}")
        .unwrap();
    let out = env
        .get_template("price.txt")
        .unwrap()
        .render(context! { price => 1500 })
        .unwrap();
    assert_eq!(out, "¥1,500");
}

#[test]
fn test_percent_symbol_function() {
    let env = environment(FormatterConfig::default().with_locale("en_US"));
    let out = env
        .render_str("50{{ percent_symbol() }}", context! {})
        .unwrap();
    assert_eq!(out, "50 %");
}
