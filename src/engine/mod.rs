//! Host template engine
//!
//! The engine owns a [`TagRegistry`], parses source in the configured
//! syntax and splices each directive's output into the text at the marker
//! position.

mod balance;

pub use balance::{check_balance, BalanceError};

use tracing::{debug, trace, warn};

use crate::config::{EngineConfig, Syntax};
use crate::parser::{self, MarkerRole, Segment, Template};
use crate::tags::{TagContext, TagRegistry};
use crate::RenderError;

/// A registry plus the settings used to render with it
///
/// Rendering only reads the engine, so one engine can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: TagRegistry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(TagRegistry::with_builtin(), EngineConfig::default())
    }
}

impl Engine {
    pub fn new(registry: TagRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pairing role of a registered directive, `None` if unknown
    fn marker_role(&self, name: &str) -> Option<MarkerRole> {
        if self.registry.closer_for(name).is_some() {
            Some(MarkerRole::Open)
        } else if self.registry.is_closer(name) {
            Some(MarkerRole::Close)
        } else if self.registry.contains(name) {
            Some(MarkerRole::Single)
        } else {
            None
        }
    }

    /// Parse source according to the configured syntax
    pub fn parse(&self, source: &str) -> Result<Template, RenderError> {
        match self.config.syntax {
            Syntax::Liquid => Ok(parser::parse(source)?),
            Syntax::Bare => Ok(parser::parse_bare(source, |word| self.marker_role(word))),
        }
    }

    /// Render template source to a string
    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        let template = self.parse(source)?;

        debug!(
            syntax = ?self.config.syntax,
            segments = template.segments.len(),
            tags = template.tags().count(),
            "rendering template"
        );

        if self.config.check_balance {
            check_balance(&template, &self.registry)?;
        }

        self.render_template(source, &template)
    }

    /// Render an already parsed template against its source
    ///
    /// Fails with [`RenderError::SourceMismatch`] if a text span does not fit `source`.
    pub fn render_template(&self, source: &str, template: &Template) -> Result<String, RenderError> {
        let segments = &template.segments;
        let mut out = String::with_capacity(source.len());
        let mut trim_start = false;

        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Text(span) => {
                    let mut text = source
                        .get(span.clone())
                        .ok_or_else(|| RenderError::SourceMismatch { span: span.clone() })?;
                    if trim_start {
                        text = text.trim_start();
                    }
                    if matches!(segments.get(i + 1), Some(Segment::Tag(next)) if next.trim_before)
                    {
                        text = text.trim_end();
                    }
                    out.push_str(text);
                }
                Segment::Tag(node) => match self.registry.get(node.name()) {
                    Some(tag) => {
                        let ctx = TagContext::new(node.name(), node.markup(source));
                        trace!(tag = ctx.name, markup = ctx.markup, "invoking tag");
                        out.push_str(&tag.render(&ctx));
                    }
                    None if self.config.strict_tags => {
                        return Err(RenderError::UnknownTag {
                            name: node.name().to_string(),
                            span: node.span.clone(),
                        });
                    }
                    None => {
                        warn!(tag = node.name(), span = ?node.span, "skipping unknown tag");
                    }
                },
            }

            trim_start = matches!(segment, Segment::Tag(node) if node.trim_after);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{MarkerPair, NOTES_CLOSE, NOTES_OPEN};
    use pretty_assertions::assert_eq;

    fn engine() -> Engine {
        Engine::default()
    }

    fn upper(ctx: &TagContext<'_>) -> String {
        ctx.markup.to_uppercase()
    }

    #[test]
    fn test_render_notes_pair() {
        let out = engine().render("{% notes %}Hello{% endnotes %}").unwrap();
        assert_eq!(out, "<span style='font-family:Bradley Hand ITC'>Hello</span>");
    }

    #[test]
    fn test_render_keeps_surrounding_text() {
        let out = engine()
            .render("<p>Remember: {% notes %}buy milk{% endnotes %}!</p>\n")
            .unwrap();
        assert_eq!(
            out,
            format!("<p>Remember: {NOTES_OPEN}buy milk{NOTES_CLOSE}!</p>\n")
        );
    }

    #[test]
    fn test_render_plain_text_unchanged() {
        let source = "No markers here.\n  50% off {curly} -dash-\n";
        assert_eq!(engine().render(source).unwrap(), source);
    }

    #[test]
    fn test_trim_markers() {
        let out = engine()
            .render("<li>\n  {%- notes -%}\n  Hello\n  {%- endnotes -%}\n</li>")
            .unwrap();
        assert_eq!(out, format!("<li>{NOTES_OPEN}Hello{NOTES_CLOSE}</li>"));
    }

    #[test]
    fn test_trim_only_requested_side() {
        let out = engine().render("a {%- notes %} b {% endnotes -%} c").unwrap();
        assert_eq!(out, format!("a{NOTES_OPEN} b {NOTES_CLOSE}c"));
    }

    #[test]
    fn test_markup_ignored_by_notes() {
        let out = engine().render("{% notes whatever you like %}x{% endnotes %}").unwrap();
        assert_eq!(out, MarkerPair::NOTES.wrap("x"));
    }

    #[test]
    fn test_markup_passed_to_tag() {
        let mut registry = TagRegistry::with_builtin();
        registry.register("upper", upper).unwrap();
        let engine = Engine::new(registry, EngineConfig::default());
        assert_eq!(engine.render("{% upper  shout this  %}!").unwrap(), "SHOUT THIS!");
    }

    #[test]
    fn test_unknown_tag_strict() {
        let err = engine().render("x {% footnote %} y").unwrap_err();
        match err {
            RenderError::UnknownTag { name, span } => {
                assert_eq!(name, "footnote");
                assert_eq!(span, 2..16);
            }
            other => panic!("Expected unknown tag, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_lenient() {
        let engine = Engine::new(
            TagRegistry::with_builtin(),
            EngineConfig::default().with_strict_tags(false),
        );
        assert_eq!(engine.render("x {% footnote %} y").unwrap(), "x  y");
    }

    #[test]
    fn test_unbalanced_renders_without_check() {
        let out = engine().render("{% notes %}open forever").unwrap();
        assert_eq!(out, format!("{NOTES_OPEN}open forever"));
        let out = engine().render("{% endnotes %}{% endnotes %}").unwrap();
        assert_eq!(out, "</span></span>");
    }

    #[test]
    fn test_unbalanced_rejected_with_check() {
        let engine = Engine::new(
            TagRegistry::with_builtin(),
            EngineConfig::default().with_check_balance(true),
        );
        let err = engine.render("{% notes %}open forever").unwrap_err();
        assert!(matches!(
            err,
            RenderError::Unbalanced(BalanceError::Unclosed { .. })
        ));
        assert!(engine.render("{% notes %}ok{% endnotes %}").is_ok());
    }

    #[test]
    fn test_bare_syntax() {
        let engine = Engine::new(
            TagRegistry::with_builtin(),
            EngineConfig::default().with_syntax(Syntax::Bare),
        );
        assert_eq!(
            engine.render("notes Hello endnotes").unwrap(),
            "<span style='font-family:Bradley Hand ITC'>Hello</span>"
        );
        assert_eq!(
            engine.render("see notes remember endnotes now").unwrap(),
            format!("see {NOTES_OPEN}remember{NOTES_CLOSE} now")
        );
    }

    #[test]
    fn test_bare_unpaired_tag_keeps_spacing() {
        let mut registry = TagRegistry::with_builtin();
        registry.register("upper", upper).unwrap();
        let engine = Engine::new(registry, EngineConfig::default().with_syntax(Syntax::Bare));
        assert_eq!(engine.render("a upper b").unwrap(), "a  b");
    }

    #[test]
    fn test_render_template_against_wrong_source() {
        let engine = engine();
        let template = engine.parse("hello world {% notes %}").unwrap();
        let err = engine.render_template("hi", &template).unwrap_err();
        assert!(matches!(err, RenderError::SourceMismatch { span } if span == (0..12)));
    }

    #[test]
    fn test_engine_accessors() {
        let engine = engine();
        assert_eq!(engine.config(), &EngineConfig::default());
        assert_eq!(engine.registry().closer_for("notes"), Some("endnotes"));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = engine().render("{% notes").unwrap_err();
        assert!(matches!(err, RenderError::Parse(ref errors) if !errors.is_empty()));
    }

    #[test]
    fn test_render_is_repeatable() {
        let engine = engine();
        let source = "{% notes %}same{% endnotes %}";
        let first = engine.render(source).unwrap();
        for _ in 0..10 {
            assert_eq!(engine.render(source).unwrap(), first);
        }
    }
}
