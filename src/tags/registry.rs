//! Tag registry for storing named directives and their pairings

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during tag registration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// Tag not found in registry
    #[error("tag not found: {name}")]
    NotFound { name: String },

    /// Duplicate tag registration
    #[error("duplicate tag registration: {name}")]
    Duplicate { name: String },

    /// Name is not a valid identifier
    #[error("invalid tag name '{name}': expected letters, digits or '_', not starting with a digit")]
    InvalidName { name: String },
}

/// What a tag sees when the engine invokes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagContext<'a> {
    /// Directive name as written in the source
    pub name: &'a str,
    /// Remaining text after the name inside the marker, trimmed
    pub markup: &'a str,
}

impl<'a> TagContext<'a> {
    pub fn new(name: &'a str, markup: &'a str) -> Self {
        Self { name, markup }
    }
}

/// A rendering function the host engine calls when it meets a directive
pub trait Tag: Send + Sync {
    fn render(&self, ctx: &TagContext<'_>) -> String;
}

impl<F> Tag for F
where
    F: Fn(&TagContext<'_>) -> String + Send + Sync,
{
    fn render(&self, ctx: &TagContext<'_>) -> String {
        self(ctx)
    }
}

/// Registry mapping directive names to tags
///
/// The registry is owned by the host. Tags are registered explicitly at
/// startup; nothing registers itself.
#[derive(Default, Clone)]
pub struct TagRegistry {
    tags: HashMap<String, Arc<dyn Tag>>,
    /// opener name -> closer name
    pairs: BTreeMap<String, String>,
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.names())
            .field("pairs", &self.pairs)
            .finish()
    }
}

impl TagRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in directives already registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        // Only fails on invalid or taken names; the built-in names are valid identifiers
        // and the registry is empty, so this cannot fail
        super::markers::register_builtin(&mut registry)
            .expect("Built-in tags should register into an empty registry");
        registry
    }

    /// Register a tag under a name
    pub fn register<T>(&mut self, name: &str, tag: T) -> Result<(), TagError>
    where
        T: Tag + 'static,
    {
        self.register_shared(name, Arc::new(tag))
    }

    /// Register an already shared tag under a name
    pub fn register_shared(&mut self, name: &str, tag: Arc<dyn Tag>) -> Result<(), TagError> {
        if !is_valid_name(name) {
            return Err(TagError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.tags.contains_key(name) {
            return Err(TagError::Duplicate {
                name: name.to_string(),
            });
        }
        tracing::trace!(tag = name, "registered tag");
        self.tags.insert(name.to_string(), tag);
        Ok(())
    }

    /// Declare that `open` is closed by `close`
    ///
    /// Both names must already be registered.
    pub fn declare_pair(&mut self, open: &str, close: &str) -> Result<(), TagError> {
        for name in [open, close] {
            if !self.contains(name) {
                return Err(TagError::NotFound {
                    name: name.to_string(),
                });
            }
        }
        self.pairs.insert(open.to_string(), close.to_string());
        Ok(())
    }

    /// Get a tag by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tag>> {
        self.tags.get(name)
    }

    /// Check if a tag exists
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// All registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The closer declared for an opener, if any
    pub fn closer_for(&self, open: &str) -> Option<&str> {
        self.pairs.get(open).map(|s| s.as_str())
    }

    /// Check if a name is declared as the closing half of some pair
    pub fn is_closer(&self, name: &str) -> bool {
        self.pairs.values().any(|c| c == name)
    }

    /// Declared pairs as (opener, closer), sorted by opener
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, c)| (o.as_str(), c.as_str()))
    }
}

/// Directive names follow the identifier rule of the marker lexer
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
