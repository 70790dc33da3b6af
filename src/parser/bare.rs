//! Bare-word marker syntax
//!
//! A word that equals a directive name is a marker when it stands alone
//! between whitespace (or the ends of the input). Whitespace is swallowed
//! only on the inner side of a pair: after an opener and before a closer.
//! So `notes Hello endnotes` renders the payload without padding while the
//! gaps around the pair survive. Other words are text.

use crate::parser::ast::{Segment, Span, Spanned, TagNode, Template};
use crate::parser::lexer::{lex, Token};

/// How a directive takes part in a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    /// Opens a pair; swallows the whitespace after it
    Open,
    /// Closes a pair; swallows the whitespace before it
    Close,
    /// Unpaired; leaves whitespace alone
    Single,
}

/// Parse template source, treating words `classify` knows as markers
///
/// Bare parsing cannot fail: anything that is not a marker is text.
pub fn parse_bare(input: &str, classify: impl Fn(&str) -> Option<MarkerRole>) -> Template {
    let tokens: Vec<(Token, Span)> = lex(input).collect();
    let mut segments = Vec::new();
    let mut text: Option<Span> = None;

    for (i, (tok, span)) in tokens.iter().enumerate() {
        let marker = match tok {
            Token::Ident(word) if stands_alone(&tokens, i) => {
                classify(word.as_str()).map(|role| (word, role))
            }
            _ => None,
        };

        match marker {
            Some((word, role)) => {
                if let Some(run) = text.take() {
                    segments.push(Segment::Text(run));
                }
                segments.push(Segment::Tag(TagNode {
                    name: Spanned::new(word.clone(), span.clone()),
                    markup: None,
                    trim_before: role == MarkerRole::Close,
                    trim_after: role == MarkerRole::Open,
                    span: span.clone(),
                }));
            }
            None => {
                text = Some(match text {
                    Some(run) => run.start..span.end,
                    None => span.clone(),
                });
            }
        }
    }

    if let Some(run) = text {
        segments.push(Segment::Text(run));
    }

    Template { segments }
}

fn stands_alone(tokens: &[(Token, Span)], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|j| tokens.get(j));
    let after = tokens.get(i + 1);
    [before, after]
        .into_iter()
        .all(|neighbour| matches!(neighbour, None | Some((Token::Whitespace, _))))
}
