//! Target database capabilities.
//!
//! Generators never branch on a concrete database type. They ask the
//! [`Database`] they are handed what it supports and how it escapes names,
//! and use [`Database::is`] for the rare engine-identity check in `supports`.

mod profile;

pub use profile::DatabaseProfile;

/// Capability provider for one target database.
///
/// Implementations are shared across threads while generating SQL.
pub trait Database: Send + Sync {
    /// Returns the short engine name (e.g. `"postgresql"`, `"h2"`).
    fn short_name(&self) -> &str;

    /// Returns whether this database is the engine called `short_name`.
    fn is(&self, short_name: &str) -> bool {
        self.short_name().eq_ignore_ascii_case(short_name)
    }

    /// Returns the schema used when a change does not name one.
    fn default_schema_name(&self) -> Option<&str>;

    /// Maps a requested schema name onto the name the engine stores.
    ///
    /// `None` resolves to the default schema. Returns `None` when neither
    /// is available.
    fn convert_requested_schema_to_schema(&self, requested: Option<&str>) -> Option<String> {
        requested
            .or_else(|| self.default_schema_name())
            .map(str::to_string)
    }

    /// Escapes a single object name (table, column, constraint).
    fn escape_object_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Escapes a possibly schema-qualified table name.
    fn escape_table_name(&self, schema: Option<&str>, table: &str) -> String {
        match schema.filter(|s| !s.trim().is_empty()) {
            Some(schema) => format!(
                "{}.{}",
                self.escape_object_name(schema),
                self.escape_object_name(table)
            ),
            None => self.escape_object_name(table),
        }
    }

    /// Escapes a list of column names, comma-joined without spaces.
    fn escape_column_name_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.escape_object_name(c.trim()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Escapes a constraint name.
    fn escape_constraint_name(&self, name: &str) -> String {
        self.escape_object_name(name)
    }

    /// Returns whether constraints may be declared `DEFERRABLE` / `INITIALLY DEFERRED`.
    fn supports_initially_deferrable_columns(&self) -> bool;

    /// Returns whether foreign keys can be added or dropped with `ALTER TABLE`.
    fn supports_foreign_keys(&self) -> bool {
        true
    }

    /// Returns whether the engine has sequences.
    fn supports_sequences(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bare engine relying on every default method.
    struct Plain;

    impl Database for Plain {
        fn short_name(&self) -> &str {
            "plain"
        }

        fn default_schema_name(&self) -> Option<&str> {
            Some("main")
        }

        fn supports_initially_deferrable_columns(&self) -> bool {
            false
        }

        fn supports_sequences(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_default_escaping() {
        let db = Plain;
        assert_eq!(db.escape_table_name(None, "orders"), "orders");
        assert_eq!(db.escape_table_name(Some(""), "orders"), "orders");
        assert_eq!(db.escape_table_name(Some("   "), "orders"), "orders");
        assert_eq!(db.escape_table_name(Some("s"), "orders"), "s.orders");
        assert_eq!(
            db.escape_column_name_list(&["a".to_string(), " b".to_string()]),
            "a,b"
        );
        assert_eq!(db.escape_constraint_name("fk"), "fk");
    }

    #[test]
    fn test_identity_is_case_insensitive() {
        assert!(Plain.is("PLAIN"));
        assert!(!Plain.is("h2"));
    }

    #[test]
    fn test_requested_schema_falls_back_to_default() {
        assert_eq!(
            Plain.convert_requested_schema_to_schema(None).as_deref(),
            Some("main")
        );
        assert_eq!(
            Plain.convert_requested_schema_to_schema(Some("other")).as_deref(),
            Some("other")
        );
    }
}
