//! Engine configuration.
//!
//! An [`EngineConfig`] describes a target database in data rather than
//! code, so tooling can point the generators at an engine this crate has no
//! preset for:
//!
//! ```json
//! {
//!   "name": "cockroach",
//!   "default_schema": "public",
//!   "identifier_quote": "double",
//!   "schema_case": "lower",
//!   "supports_initially_deferrable": true,
//!   "supports_sequences": true
//! }
//! ```
//!
//! Missing fields fall back to a conservative generic engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlGenError};

/// How an engine quotes identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Identifiers are emitted as written.
    #[default]
    None,
    /// `"name"` (SQL standard).
    Double,
    /// `` `name` `` (MySQL).
    Backtick,
    /// `[name]` (SQL Server).
    Bracket,
}

impl QuoteStyle {
    /// Quotes `name`, doubling any embedded closing quote.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        match self {
            Self::None => name.to_string(),
            Self::Double => format!("\"{}\"", name.replace('"', "\"\"")),
            Self::Backtick => format!("`{}`", name.replace('`', "``")),
            Self::Bracket => format!("[{}]", name.replace(']', "]]")),
        }
    }
}

/// How an engine folds unquoted schema names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    /// Keep names as requested.
    #[default]
    Preserve,
    /// Fold to upper case.
    Upper,
    /// Fold to lower case.
    Lower,
}

impl IdentifierCase {
    /// Applies the folding rule to `name`.
    #[must_use]
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
        }
    }
}

/// Capabilities and naming rules of a target database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Short engine name used for identity checks.
    pub name: String,
    /// Schema used when a change names none.
    pub default_schema: Option<String>,
    /// Identifier quoting.
    pub identifier_quote: QuoteStyle,
    /// Folding applied to requested schema names.
    pub schema_case: IdentifierCase,
    /// Whether foreign keys can be added or dropped after table creation.
    pub supports_foreign_keys: bool,
    /// Whether constraints may be `DEFERRABLE` / `INITIALLY DEFERRED`.
    pub supports_initially_deferrable: bool,
    /// Whether the engine has sequences.
    pub supports_sequences: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "generic".to_string(),
            default_schema: None,
            identifier_quote: QuoteStyle::None,
            schema_case: IdentifierCase::Preserve,
            supports_foreign_keys: true,
            supports_initially_deferrable: false,
            supports_sequences: false,
        }
    }
}

impl EngineConfig {
    /// Creates a generic configuration with the given engine name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the configuration for values no engine can have.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SqlGenError::Config("engine name must not be empty".into()));
        }
        if self
            .default_schema
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(SqlGenError::Config(format!(
                "engine '{}' has an empty default schema",
                self.name
            )));
        }
        Ok(())
    }
}
