use winnow::combinator::{alt, opt, preceded};
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::types::LocaleId;

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn parse_language<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(2..=3, is_alpha).parse_next(input)
}

fn parse_script<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(one_of(['_', '-']), take_while(4, is_alpha)).parse_next(input)
}

fn parse_region<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(
        one_of(['_', '-']),
        alt((
            take_while(2, is_alpha),
            take_while(3, |c: char| c.is_ascii_digit()),
        )),
    )
    .parse_next(input)
}

fn title_case(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Parse a locale identifier as reported by the platform or written in templates
///
/// Accepts POSIX (`de_DE.UTF-8`, `de_DE@euro`) and BCP 47 (`de-DE`) spellings.
/// The encoding, modifier and any variant subtags are dropped. `C` and `POSIX`
/// map to `en_US`.
///
/// # Examples
/// ```
/// use number_format_filters::parser::parse_locale_id;
///
/// let id = parse_locale_id("pt-br").unwrap();
/// assert_eq!(id.to_string(), "pt_BR");
/// ```
pub fn parse_locale_id(locale: &str) -> Option<LocaleId> {
    let trimmed = locale.trim();
    let base = trimmed.split(['.', '@']).next().unwrap_or_default();
    if base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return Some(LocaleId {
            language: "en".to_string(),
            script: None,
            region: Some("US".to_string()),
        });
    }

    let mut input = base;
    let (language, script, region) = (parse_language, opt(parse_script), opt(parse_region))
        .parse_next(&mut input)
        .ok()?;

    // Anything left over must be a variant subtag, not the tail of a longer subtag
    if !(input.is_empty() || input.starts_with(['_', '-'])) {
        return None;
    }

    Some(LocaleId {
        language: language.to_ascii_lowercase(),
        script: script.map(title_case),
        region: region.map(|r| r.to_ascii_uppercase()),
    })
}
