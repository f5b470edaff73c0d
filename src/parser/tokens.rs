use winnow::combinator::{alt, delimited};
use winnow::token::{literal, take_till, take_while};
use winnow::{ModalResult, Parser};

use crate::types::AffixToken;

/// Characters with a meaning inside the digit part of a pattern or as affix placeholders
fn is_special(c: char) -> bool {
    c.is_ascii_digit() || "#,.;'¤%-".contains(c)
}

pub fn parse_currency(input: &mut &str) -> ModalResult<AffixToken> {
    literal("¤").value(AffixToken::Currency).parse_next(input)
}

pub fn parse_percent(input: &mut &str) -> ModalResult<AffixToken> {
    literal("%").value(AffixToken::Percent).parse_next(input)
}

pub fn parse_minus(input: &mut &str) -> ModalResult<AffixToken> {
    literal("-").value(AffixToken::Minus).parse_next(input)
}

/// `''` stands for a single apostrophe
pub fn parse_escaped_quote(input: &mut &str) -> ModalResult<AffixToken> {
    literal("''")
        .value(AffixToken::Literal("'".to_string()))
        .parse_next(input)
}

/// Quoted text, like 'EUR'
pub fn parse_quoted_text(input: &mut &str) -> ModalResult<AffixToken> {
    delimited(literal("'"), take_till(1.., '\''), literal("'"))
        .map(|text: &str| AffixToken::Literal(text.to_string()))
        .parse_next(input)
}

/// Any run of characters without a pattern meaning
pub fn parse_literal_run(input: &mut &str) -> ModalResult<AffixToken> {
    take_while(1.., |c: char| !is_special(c))
        .map(|text: &str| AffixToken::Literal(text.to_string()))
        .parse_next(input)
}

/// Parse a single prefix or suffix token
pub fn parse_affix_token(input: &mut &str) -> ModalResult<AffixToken> {
    alt((
        parse_currency,
        parse_percent,
        parse_minus,
        parse_escaped_quote,
        parse_quoted_text,
        parse_literal_run,
    ))
    .parse_next(input)
}

/// Join neighbouring literal tokens so that `'a''b'` becomes one literal
pub fn merge_literals(tokens: Vec<AffixToken>) -> Vec<AffixToken> {
    let mut merged: Vec<AffixToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let AffixToken::Literal(text) = &token {
            if let Some(AffixToken::Literal(previous)) = merged.last_mut() {
                previous.push_str(text);
                continue;
            }
        }
        merged.push(token);
    }
    merged
}
