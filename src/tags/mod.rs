//! Directive system: the tags a template can call and the registry that holds them
//!
//! Tags are registered explicitly by the host at startup. The built-in
//! `notes` / `endnotes` pair wraps text in a handwriting-font span.
//!
//! # Example
//!
//! ```rust
//! use notes_tags::tags::{MarkerPair, TagRegistry};
//!
//! let mut registry = TagRegistry::new();
//! MarkerPair::NOTES.register(&mut registry).unwrap();
//! assert!(registry.contains("notes"));
//! assert_eq!(registry.closer_for("notes"), Some("endnotes"));
//! ```

mod markers;
mod registry;

pub use markers::{
    register_builtin, render_close, render_open, Literal, MarkerPair, NOTES_CLOSE, NOTES_OPEN,
};
pub use registry::{Tag, TagContext, TagError, TagRegistry};
