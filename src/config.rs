//! Engine configuration
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! [engine]
//! syntax = "bare"
//! strict_tags = false
//! check_balance = true
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How markers are written in template source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// `{% name %}`, with `{%-` / `-%}` whitespace trimming
    #[default]
    Liquid,
    /// A directive name standing alone as a word
    Bare,
}

impl FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "liquid" => Ok(Syntax::Liquid),
            "bare" => Ok(Syntax::Bare),
            other => Err(format!("unknown syntax '{}', expected 'liquid' or 'bare'", other)),
        }
    }
}

/// Configuration for the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Marker syntax
    pub syntax: Syntax,
    /// Fail on markers naming an unregistered directive
    pub strict_tags: bool,
    /// Require declared pairs to be balanced and properly nested
    pub check_balance: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            syntax: Syntax::Liquid,
            strict_tags: true,
            check_balance: false,
        }
    }
}

/// TOML structure for deserializing config files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    engine: Option<TomlEngine>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEngine {
    syntax: Option<Syntax>,
    strict_tags: Option<bool>,
    check_balance: Option<bool>,
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string, defaulting missing keys
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(match parsed.engine {
            Some(engine) => Self {
                syntax: engine.syntax.unwrap_or(defaults.syntax),
                strict_tags: engine.strict_tags.unwrap_or(defaults.strict_tags),
                check_balance: engine.check_balance.unwrap_or(defaults.check_balance),
            },
            None => defaults,
        })
    }

    /// Set the marker syntax
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Enable or disable errors for unknown directives
    pub fn with_strict_tags(mut self, strict: bool) -> Self {
        self.strict_tags = strict;
        self
    }

    /// Enable or disable balance checking
    pub fn with_check_balance(mut self, check: bool) -> Self {
        self.check_balance = check;
        self
    }
}
