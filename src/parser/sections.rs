use winnow::combinator::{opt, preceded, repeat};
use winnow::token::{literal, take_while};
use winnow::{ModalResult, Parser};

use crate::parser::tokens::{merge_literals, parse_affix_token};
use crate::types::{AffixToken, Affixes};

/// Digit part of a subpattern, split at the decimal point
#[derive(Debug, Clone, PartialEq)]
pub struct DigitLayout<'s> {
    pub integer: &'s str,
    pub fraction: Option<&'s str>,
}

fn parse_affix(input: &mut &str) -> ModalResult<Vec<AffixToken>> {
    repeat(0.., parse_affix_token)
        .map(merge_literals)
        .parse_next(input)
}

/// Parse the digit placeholders, e.g. `#,##0.00`
pub fn parse_digits<'s>(input: &mut &'s str) -> ModalResult<DigitLayout<'s>> {
    (
        take_while(1.., ['#', '0', ',']),
        opt(preceded(literal("."), take_while(0.., ['0', '#']))),
    )
        .map(|(integer, fraction)| DigitLayout { integer, fraction })
        .parse_next(input)
}

/// Parse one subpattern: prefix, digit placeholders, suffix
pub fn parse_subpattern<'s>(input: &mut &'s str) -> ModalResult<(Affixes, DigitLayout<'s>)> {
    (parse_affix, parse_digits, parse_affix)
        .map(|(prefix, digits, suffix)| (Affixes { prefix, suffix }, digits))
        .parse_next(input)
}
