//! Notes Tags - template directives for handwritten-style notes
//!
//! This library provides the `notes` / `endnotes` directive pair, a registry
//! the host uses to look directives up by name, and a small engine that
//! parses template source and splices directive output into it.
//!
//! # Example
//!
//! ```rust
//! use notes_tags::render;
//!
//! let html = render("{% notes %}Hello{% endnotes %}").unwrap();
//! assert_eq!(html, "<span style='font-family:Bradley Hand ITC'>Hello</span>");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod tags;

pub use config::{ConfigError, EngineConfig, Syntax};
pub use engine::{BalanceError, Engine};
pub use error::ParseError;
pub use parser::{parse, parse_bare, MarkerRole, Span, Template};
pub use tags::{render_close, render_open, MarkerPair, Tag, TagContext, TagError, TagRegistry};

use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Marker names a directive that is not registered
    #[error("unknown tag '{name}' at {span:?}")]
    UnknownTag { name: String, span: Span },

    /// Declared pairs are not balanced
    #[error("unbalanced markers: {0}")]
    Unbalanced(#[from] BalanceError),

    /// Template span does not fit the source it is rendered against
    #[error("template span {span:?} is outside the source")]
    SourceMismatch { span: Span },
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl RenderError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RenderError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RenderError::UnknownTag { name, span } => error::report(
                source,
                filename,
                span,
                &format!("Unknown tag '{}'", name),
                "no directive is registered under this name",
            ),
            RenderError::SourceMismatch { span } => format!(
                "{}: template span {:?} is outside the source ({} bytes)",
                filename,
                span,
                source.len()
            ),
            RenderError::Unbalanced(err) => {
                let label = match err {
                    BalanceError::Unclosed { expected, .. } => format!("never closed by '{}'", expected),
                    BalanceError::UnexpectedClose { .. } => "nothing is open here".to_string(),
                    BalanceError::Mismatched { open, expected, .. } => {
                        format!("'{}' is still open, expected '{}'", open, expected)
                    }
                };
                error::report(source, filename, err.span(), "Unbalanced markers", &label)
            }
        }
    }
}

/// Render template source with the built-in directives and default configuration
///
/// # Example
///
/// ```rust
/// use notes_tags::render;
///
/// let html = render("<p>{% notes %}remember this{% endnotes %}</p>").unwrap();
/// assert!(html.starts_with("<p><span"));
/// assert!(html.ends_with("</span></p>"));
/// ```
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, EngineConfig::default())
}

/// Render template source with the built-in directives and custom configuration
///
/// # Example
///
/// ```rust
/// use notes_tags::{render_with_config, EngineConfig, Syntax};
///
/// let config = EngineConfig::new().with_syntax(Syntax::Bare);
/// let html = render_with_config("notes Hello endnotes", config).unwrap();
/// assert_eq!(html, "<span style='font-family:Bradley Hand ITC'>Hello</span>");
/// ```
pub fn render_with_config(source: &str, config: EngineConfig) -> Result<String, RenderError> {
    Engine::new(TagRegistry::with_builtin(), config).render(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple_pair() {
        let html = render("{% notes %}Hi{% endnotes %}").unwrap();
        assert_eq!(html, "<span style='font-family:Bradley Hand ITC'>Hi</span>");
    }

    #[test]
    fn test_render_unknown_tag_error() {
        let result = render("{% sidenote %}");
        assert!(matches!(result, Err(RenderError::UnknownTag { .. })));
    }

    #[test]
    fn test_format_unknown_tag_report() {
        let source = "{% sidenote %}";
        let err = render(source).unwrap_err();
        let report = err.format(source, "index.html");
        assert!(report.contains("Unknown tag 'sidenote'"));
        assert!(report.contains("index.html"));
    }

    #[test]
    fn test_format_unbalanced_report() {
        let source = "{% endnotes %}";
        let config = EngineConfig::new().with_check_balance(true);
        let err = render_with_config(source, config).unwrap_err();
        assert!(err.to_string().starts_with("unbalanced markers"));
        let report = err.format(source, "index.html");
        assert!(report.contains("Unbalanced markers"));
        assert!(report.contains("nothing is open here"));
    }

    #[test]
    fn test_format_parse_errors_joined() {
        let err = render("{% notes").unwrap_err();
        assert!(err.to_string().starts_with("parse errors: Parse error at"));
    }
}
