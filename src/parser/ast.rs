//! Syntax tree for template source

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed template: text interleaved with markers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over the markers only
    pub fn tags(&self) -> impl Iterator<Item = &TagNode> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Tag(tag) => Some(tag),
            Segment::Text(_) => None,
        })
    }
}

/// One piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied to the output
    Text(Span),
    /// A directive marker
    Tag(TagNode),
}

/// A directive marker such as `{% notes %}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    /// Directive name
    pub name: Spanned<String>,
    /// Text after the name inside the marker, if any
    pub markup: Option<Span>,
    /// Strip whitespace immediately before the marker
    pub trim_before: bool,
    /// Strip whitespace immediately after the marker
    pub trim_after: bool,
    /// The whole marker, delimiters included
    pub span: Span,
}

impl TagNode {
    pub fn name(&self) -> &str {
        &self.name.node
    }

    /// Markup text taken from the source, trimmed
    pub fn markup<'s>(&self, source: &'s str) -> &'s str {
        self.markup
            .as_ref()
            .and_then(|span| source.get(span.clone()))
            .map(str::trim)
            .unwrap_or("")
    }
}
