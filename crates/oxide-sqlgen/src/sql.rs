//! Rendered SQL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::DatabaseObject;

/// Default statement terminator.
pub const DEFAULT_END_DELIMITER: &str = ";";

/// One rendered SQL statement, ready for an executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sql {
    text: String,
    end_delimiter: String,
    affected: Vec<DatabaseObject>,
}

impl Sql {
    /// Wraps raw SQL text with the default delimiter and no affected objects.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_delimiter: DEFAULT_END_DELIMITER.to_string(),
            affected: Vec::new(),
        }
    }

    /// Records an object this statement touches.
    #[must_use]
    pub fn affects(mut self, object: DatabaseObject) -> Self {
        self.affected.push(object);
        self
    }

    /// Overrides the statement terminator.
    #[must_use]
    pub fn end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }

    /// Returns the SQL text without terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the statement terminator.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.end_delimiter
    }

    /// Returns the objects this statement touches.
    #[must_use]
    pub fn affected_objects(&self) -> &[DatabaseObject] {
        &self.affected
    }

    /// Returns the SQL text followed by its terminator.
    #[must_use]
    pub fn to_terminated(&self) -> String {
        format!("{}{}", self.text, self.end_delimiter)
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ObjectType;

    #[test]
    fn test_sql_defaults() {
        let sql = Sql::new("SELECT 1");
        assert_eq!(sql.text(), "SELECT 1");
        assert_eq!(sql.delimiter(), ";");
        assert_eq!(sql.to_terminated(), "SELECT 1;");
        assert!(sql.affected_objects().is_empty());
    }

    #[test]
    fn test_sql_affected_objects() {
        let sql = Sql::new("ALTER TABLE t DROP CONSTRAINT fk")
            .affects(DatabaseObject::foreign_key(None, "t", "fk"))
            .end_delimiter("\nGO");
        assert_eq!(sql.affected_objects()[0].object_type, ObjectType::ForeignKey);
        assert_eq!(sql.to_terminated(), "ALTER TABLE t DROP CONSTRAINT fk\nGO");
    }
}
