//! Configurable database profile.
//!
//! A [`DatabaseProfile`] is a [`Database`] driven entirely by an
//! [`EngineConfig`]. The presets cover the engines the built-in generators
//! know about; anything else can be described in configuration.

use crate::config::{EngineConfig, IdentifierCase, QuoteStyle};
use crate::error::Result;

use super::Database;

/// Database capabilities backed by an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseProfile {
    config: EngineConfig,
}

impl DatabaseProfile {
    /// Creates a profile from a validated configuration.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a profile from a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(EngineConfig::from_json(json)?)
    }

    /// Returns the underlying configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A standard-SQL engine with no quoting, no default schema and no deferrable constraints.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// H2.
    #[must_use]
    pub fn h2() -> Self {
        Self {
            config: EngineConfig {
                default_schema: Some("PUBLIC".to_string()),
                schema_case: IdentifierCase::Upper,
                supports_sequences: true,
                ..EngineConfig::new("h2")
            },
        }
    }

    /// SQLite. Foreign keys can only be declared at table creation.
    #[must_use]
    pub fn sqlite() -> Self {
        Self {
            config: EngineConfig {
                default_schema: Some("main".to_string()),
                identifier_quote: QuoteStyle::Double,
                supports_foreign_keys: false,
                ..EngineConfig::new("sqlite")
            },
        }
    }

    /// Informix.
    #[must_use]
    pub fn informix() -> Self {
        Self {
            config: EngineConfig {
                schema_case: IdentifierCase::Lower,
                supports_sequences: true,
                ..EngineConfig::new("informix")
            },
        }
    }

    /// Oracle.
    #[must_use]
    pub fn oracle() -> Self {
        Self {
            config: EngineConfig {
                schema_case: IdentifierCase::Upper,
                supports_initially_deferrable: true,
                supports_sequences: true,
                ..EngineConfig::new("oracle")
            },
        }
    }

    /// PostgreSQL.
    #[must_use]
    pub fn postgresql() -> Self {
        Self {
            config: EngineConfig {
                default_schema: Some("public".to_string()),
                identifier_quote: QuoteStyle::Double,
                schema_case: IdentifierCase::Lower,
                supports_initially_deferrable: true,
                supports_sequences: true,
                ..EngineConfig::new("postgresql")
            },
        }
    }

    /// MySQL.
    #[must_use]
    pub fn mysql() -> Self {
        Self {
            config: EngineConfig {
                identifier_quote: QuoteStyle::Backtick,
                ..EngineConfig::new("mysql")
            },
        }
    }
}

impl Default for DatabaseProfile {
    fn default() -> Self {
        Self::generic()
    }
}

impl Database for DatabaseProfile {
    fn short_name(&self) -> &str {
        &self.config.name
    }

    fn default_schema_name(&self) -> Option<&str> {
        self.config.default_schema.as_deref()
    }

    fn convert_requested_schema_to_schema(&self, requested: Option<&str>) -> Option<String> {
        requested
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.default_schema_name())
            .map(|s| self.config.schema_case.apply(s))
    }

    fn escape_object_name(&self, name: &str) -> String {
        self.config.identifier_quote.quote(name)
    }

    fn supports_initially_deferrable_columns(&self) -> bool {
        self.config.supports_initially_deferrable
    }

    fn supports_foreign_keys(&self) -> bool {
        self.config.supports_foreign_keys
    }

    fn supports_sequences(&self) -> bool {
        self.config.supports_sequences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_leaves_names_alone() {
        let db = DatabaseProfile::generic();
        assert_eq!(db.short_name(), "generic");
        assert_eq!(db.escape_table_name(Some("S"), "T1"), "S.T1");
        assert_eq!(db.default_schema_name(), None);
        assert!(!db.supports_initially_deferrable_columns());
    }

    #[test]
    fn test_postgresql_quotes_identifiers() {
        let db = DatabaseProfile::postgresql();
        assert_eq!(db.escape_table_name(Some("app"), "orders"), "\"app\".\"orders\"");
        assert_eq!(
            db.escape_column_name_list(&["a".to_string(), "b".to_string()]),
            "\"a\",\"b\""
        );
        assert!(db.supports_initially_deferrable_columns());
    }

    #[test]
    fn test_mysql_uses_backticks() {
        assert_eq!(DatabaseProfile::mysql().escape_constraint_name("fk"), "`fk`");
    }

    #[test]
    fn test_h2_folds_schema_to_upper_case() {
        let db = DatabaseProfile::h2();
        assert_eq!(
            db.convert_requested_schema_to_schema(Some("app")).as_deref(),
            Some("APP")
        );
        assert_eq!(
            db.convert_requested_schema_to_schema(None).as_deref(),
            Some("PUBLIC")
        );
    }

    #[test]
    fn test_unresolvable_schema() {
        assert_eq!(
            DatabaseProfile::informix().convert_requested_schema_to_schema(None),
            None
        );
    }

    #[test]
    fn test_sqlite_has_no_foreign_key_ddl() {
        assert!(!DatabaseProfile::sqlite().supports_foreign_keys());
    }

    #[test]
    fn test_from_json() {
        let db = DatabaseProfile::from_json(
            r#"{ "name": "mssql", "identifier_quote": "bracket", "default_schema": "dbo" }"#,
        )
        .unwrap();
        assert!(db.is("MSSQL"));
        assert_eq!(db.escape_table_name(None, "t"), "[t]");
        assert_eq!(db.config().default_schema.as_deref(), Some("dbo"));
    }
}
