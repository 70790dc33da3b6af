//! Marker grammar using chumsky
//!
//! Markers look like `{% name markup %}`. `{%-` and `-%}` request whitespace
//! trimming on the respective side. Anything that is not a marker is text,
//! a stray `%}` included.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse template source into segments
pub fn parse(input: &str) -> Result<Template, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    template_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

/// Join the spans of adjacent tokens
fn merge_spans(spans: &[Span]) -> Option<Span> {
    match (spans.first(), spans.last()) {
        (Some(first), Some(last)) => Some(first.start..last.end),
        _ => None,
    }
}

fn template_parser<'a, I>() -> impl Parser<'a, I, Template, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let open = choice((
        just(Token::TagOpen).to(false),
        just(Token::TagOpenTrim).to(true),
    ));

    let close = choice((
        just(Token::TagClose).to(false),
        just(Token::TagCloseTrim).to(true),
    ))
    .labelled("'%}'");

    let whitespace = just(Token::Whitespace).repeated();

    let name = select! {
        Token::Ident(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
    .labelled("tag name");

    // Everything up to the closing delimiter. A nested opener is an error.
    let markup = none_of([
        Token::TagOpen,
        Token::TagOpenTrim,
        Token::TagClose,
        Token::TagCloseTrim,
    ])
    .map_with(|_, e| span_range(&e.span()))
    .repeated()
    .collect::<Vec<_>>()
    .map(|spans| merge_spans(&spans));

    let tag = open
        .then_ignore(whitespace.clone())
        .then(name)
        .then_ignore(whitespace)
        .then(markup)
        .then(close)
        .map_with(|(((trim_before, name), markup), trim_after), e| {
            Segment::Tag(TagNode {
                name,
                markup,
                trim_before,
                trim_after,
                span: span_range(&e.span()),
            })
        });

    let text = none_of([Token::TagOpen, Token::TagOpenTrim])
        .repeated()
        .at_least(1)
        .map_with(|_, e| Segment::Text(span_range(&e.span())));

    choice((tag, text))
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|segments| Template { segments })
}
