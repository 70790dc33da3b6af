//! Balance checking for declared marker pairs
//!
//! Only directives that take part in a declared pair are considered; every
//! other marker is ignored. Pairs must nest: a closer has to match the
//! innermost open marker.

use thiserror::Error;

use crate::parser::{Span, TagNode, Template};
use crate::tags::TagRegistry;

/// Errors found while checking marker balance
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// Opener with no closer before end of input
    #[error("'{name}' at {span:?} is never closed, expected '{expected}'")]
    Unclosed {
        name: String,
        expected: String,
        span: Span,
    },

    /// Closer with nothing open
    #[error("'{name}' at {span:?} closes nothing")]
    UnexpectedClose { name: String, span: Span },

    /// Closer that belongs to a different opener
    #[error("'{found}' at {span:?} does not close '{open}', expected '{expected}'")]
    Mismatched {
        open: String,
        expected: String,
        found: String,
        span: Span,
        open_span: Span,
    },
}

impl BalanceError {
    /// Location the error should point at
    pub fn span(&self) -> &Span {
        match self {
            BalanceError::Unclosed { span, .. }
            | BalanceError::UnexpectedClose { span, .. }
            | BalanceError::Mismatched { span, .. } => span,
        }
    }
}

/// Verify that every declared pair in the template is balanced and nested
pub fn check_balance(template: &Template, registry: &TagRegistry) -> Result<(), BalanceError> {
    let mut open: Vec<(&TagNode, &str)> = Vec::new();

    for tag in template.tags() {
        if let Some(closer) = registry.closer_for(tag.name()) {
            open.push((tag, closer));
            continue;
        }
        if !registry.is_closer(tag.name()) {
            continue;
        }
        match open.pop() {
            Some((_, expected)) if expected == tag.name() => {}
            Some((opener, expected)) => {
                return Err(BalanceError::Mismatched {
                    open: opener.name().to_string(),
                    expected: expected.to_string(),
                    found: tag.name().to_string(),
                    span: tag.span.clone(),
                    open_span: opener.span.clone(),
                });
            }
            None => {
                return Err(BalanceError::UnexpectedClose {
                    name: tag.name().to_string(),
                    span: tag.span.clone(),
                });
            }
        }
    }

    match open.pop() {
        Some((opener, expected)) => Err(BalanceError::Unclosed {
            name: opener.name().to_string(),
            expected: expected.to_string(),
            span: opener.span.clone(),
        }),
        None => Ok(()),
    }
}
