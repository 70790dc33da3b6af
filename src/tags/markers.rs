//! Marker pairs: zero-argument directives that render fixed literals
//!
//! A [`MarkerPair`] is an opening and a closing directive whose output is a
//! constant string. The built-in pair is `notes` / `endnotes`, which wraps
//! the text between them in a span set in a handwriting font.

use super::registry::{Tag, TagContext, TagError, TagRegistry};

/// Output of the `notes` directive
pub const NOTES_OPEN: &str = "<span style='font-family:Bradley Hand ITC'>";

/// Output of the `endnotes` directive
pub const NOTES_CLOSE: &str = "</span>";

/// Render the opening half of the notes pair
pub fn render_open() -> &'static str {
    MarkerPair::NOTES.render_open()
}

/// Render the closing half of the notes pair
pub fn render_close() -> &'static str {
    MarkerPair::NOTES.render_close()
}

/// Register every built-in directive
pub fn register_builtin(registry: &mut TagRegistry) -> Result<(), TagError> {
    MarkerPair::NOTES.register(registry)
}

/// A tag that always renders the same string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal(pub &'static str);

impl Tag for Literal {
    fn render(&self, _ctx: &TagContext<'_>) -> String {
        self.0.to_string()
    }
}

/// Two named directives with fixed outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    pub open_name: &'static str,
    pub close_name: &'static str,
    pub open: &'static str,
    pub close: &'static str,
}

impl MarkerPair {
    /// `notes` ... `endnotes`
    pub const NOTES: MarkerPair = MarkerPair {
        open_name: "notes",
        close_name: "endnotes",
        open: NOTES_OPEN,
        close: NOTES_CLOSE,
    };

    pub const fn new(
        open_name: &'static str,
        close_name: &'static str,
        open: &'static str,
        close: &'static str,
    ) -> Self {
        Self {
            open_name,
            close_name,
            open,
            close,
        }
    }

    pub fn render_open(&self) -> &'static str {
        self.open
    }

    pub fn render_close(&self) -> &'static str {
        self.close
    }

    /// Surround a payload with the pair's outputs
    pub fn wrap(&self, payload: &str) -> String {
        let mut out = String::with_capacity(self.open.len() + payload.len() + self.close.len());
        out.push_str(self.open);
        out.push_str(payload);
        out.push_str(self.close);
        out
    }

    /// Register both directives and declare their pairing
    ///
    /// Nothing is registered if either name is already taken.
    pub fn register(&self, registry: &mut TagRegistry) -> Result<(), TagError> {
        for name in [self.open_name, self.close_name] {
            if registry.contains(name) {
                return Err(TagError::Duplicate {
                    name: name.to_string(),
                });
            }
        }
        registry.register(self.open_name, Literal(self.open))?;
        registry.register(self.close_name, Literal(self.close))?;
        registry.declare_pair(self.open_name, self.close_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_open_exact() {
        assert_eq!(render_open(), "<span style='font-family:Bradley Hand ITC'>");
    }

    #[test]
    fn test_render_close_exact() {
        assert_eq!(render_close(), "</span>");
    }

    #[test]
    fn test_repeated_calls_identical() {
        let first = (render_open(), render_close());
        for _ in 0..100 {
            assert_eq!((render_open(), render_close()), first);
        }
    }

    #[test]
    fn test_wrap_concatenates() {
        for payload in ["", "Hello", "a <b>bold</b> move", "multi\nline\n", "ünïcödé"] {
            assert_eq!(
                MarkerPair::NOTES.wrap(payload),
                format!("<span style='font-family:Bradley Hand ITC'>{payload}</span>")
            );
        }
    }

    #[test]
    fn test_literal_ignores_context() {
        let tag = Literal(NOTES_OPEN);
        assert_eq!(tag.render(&TagContext::new("notes", "")), NOTES_OPEN);
        assert_eq!(tag.render(&TagContext::new("other", "some args")), NOTES_OPEN);
    }

    #[test]
    fn test_register_installs_both_halves() {
        let mut registry = TagRegistry::new();
        MarkerPair::NOTES.register(&mut registry).unwrap();

        let ctx = TagContext::new("notes", "");
        assert_eq!(registry.get("notes").unwrap().render(&ctx), NOTES_OPEN);
        let ctx = TagContext::new("endnotes", "");
        assert_eq!(registry.get("endnotes").unwrap().render(&ctx), NOTES_CLOSE);
        assert_eq!(registry.closer_for("notes"), Some("endnotes"));
    }

    #[test]
    fn test_register_is_all_or_nothing() {
        let mut registry = TagRegistry::new();
        registry.register("endnotes", Literal("taken")).unwrap();

        let result = MarkerPair::NOTES.register(&mut registry);
        assert_eq!(
            result,
            Err(TagError::Duplicate {
                name: "endnotes".to_string()
            })
        );
        assert!(!registry.contains("notes"));
    }

    #[test]
    fn test_custom_pair() {
        let pair = MarkerPair::new("em", "endem", "<em>", "</em>");
        let mut registry = TagRegistry::with_builtin();
        pair.register(&mut registry).unwrap();
        assert_eq!(registry.names(), vec!["em", "endem", "endnotes", "notes"]);
        assert_eq!(pair.wrap("x"), "<em>x</em>");
    }
}
