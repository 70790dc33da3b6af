//! Lexer for template source using logos
//!
//! Every byte of the input belongs to exactly one token, so text segments
//! can be rebuilt from token spans.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Marker delimiters (trimming forms are longer, so logos prefers them)
    #[token("{%-")]
    TagOpenTrim,
    #[token("{%")]
    TagOpen,
    #[token("-%}")]
    TagCloseTrim,
    #[token("%}")]
    TagClose,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // Characters that may start a delimiter, on their own
    #[regex(r"[{%\-]")]
    Punct,

    // Any run of characters that cannot start an identifier, whitespace or delimiter
    #[regex(r"[^A-Za-z_ \t\r\n\f{%\-]+")]
    Other,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
