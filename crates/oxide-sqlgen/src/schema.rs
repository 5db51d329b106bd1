//! Schema vocabulary shared by statements, changes and generated SQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlGenError};

/// Foreign key action (ON DELETE, ON UPDATE).
///
/// Serialized with the exact SQL spelling, so `"SET NULL"` in a change
/// document maps to [`ForeignKeyAction::SetNull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    /// Cascade the delete/update to referencing rows.
    #[serde(rename = "CASCADE")]
    Cascade,
    /// Set the foreign key column to NULL.
    #[serde(rename = "SET NULL")]
    SetNull,
    /// Set the foreign key column to its default value.
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
    /// Restrict (same as NoAction but checked immediately).
    #[serde(rename = "RESTRICT")]
    Restrict,
    /// No action (error if referenced row is deleted/updated).
    #[serde(rename = "NO ACTION")]
    NoAction,
}

impl ForeignKeyAction {
    /// All actions, in metadata code order.
    pub const ALL: [Self; 5] = [
        Self::Cascade,
        Self::Restrict,
        Self::SetNull,
        Self::NoAction,
        Self::SetDefault,
    ];

    /// `DatabaseMetaData.importedKeyCascade`.
    pub const CODE_CASCADE: i32 = 0;
    /// `DatabaseMetaData.importedKeyRestrict`.
    pub const CODE_RESTRICT: i32 = 1;
    /// `DatabaseMetaData.importedKeySetNull`.
    pub const CODE_SET_NULL: i32 = 2;
    /// `DatabaseMetaData.importedKeyNoAction`.
    pub const CODE_NO_ACTION: i32 = 3;
    /// `DatabaseMetaData.importedKeySetDefault`.
    pub const CODE_SET_DEFAULT: i32 = 4;

    /// Returns the SQL representation of this action.
    #[must_use]
    pub const fn to_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }

    /// Maps a vendor metadata action code onto an action.
    ///
    /// Codes come from driver metadata, so an unknown one means the caller
    /// read the wrong column; it is reported as a fatal error.
    pub fn from_metadata_code(code: i32) -> Result<Self> {
        match code {
            Self::CODE_CASCADE => Ok(Self::Cascade),
            Self::CODE_RESTRICT => Ok(Self::Restrict),
            Self::CODE_SET_NULL => Ok(Self::SetNull),
            Self::CODE_NO_ACTION => Ok(Self::NoAction),
            Self::CODE_SET_DEFAULT => Ok(Self::SetDefault),
            other => Err(SqlGenError::UnknownForeignKeyAction(other)),
        }
    }

    /// Returns the vendor metadata code of this action.
    #[must_use]
    pub const fn metadata_code(&self) -> i32 {
        match self {
            Self::Cascade => Self::CODE_CASCADE,
            Self::Restrict => Self::CODE_RESTRICT,
            Self::SetNull => Self::CODE_SET_NULL,
            Self::NoAction => Self::CODE_NO_ACTION,
            Self::SetDefault => Self::CODE_SET_DEFAULT,
        }
    }
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

impl FromStr for ForeignKeyAction {
    type Err = SqlGenError;

    /// Parses the exact SQL spelling; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.to_sql() == s)
            .ok_or_else(|| SqlGenError::UnknownForeignKeyRule(s.to_string()))
    }
}

/// Kind of database object touched by a generated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// A table.
    Table,
    /// A column.
    Column,
    /// A foreign key constraint.
    ForeignKey,
    /// A schema.
    Schema,
}

/// A database object affected by a generated SQL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseObject {
    /// What kind of object this is.
    pub object_type: ObjectType,
    /// Schema the object lives in, if known.
    pub schema: Option<String>,
    /// Owning table for table-scoped objects (columns, constraints).
    pub table: Option<String>,
    /// Object name.
    pub name: String,
}

impl DatabaseObject {
    /// A table.
    #[must_use]
    pub fn table(schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::Table,
            schema: schema.map(str::to_string),
            table: None,
            name: name.into(),
        }
    }

    /// A column of `table`.
    #[must_use]
    pub fn column(schema: Option<&str>, table: &str, name: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::Column,
            schema: schema.map(str::to_string),
            table: Some(table.to_string()),
            name: name.into(),
        }
    }

    /// A foreign key constraint on `table`.
    #[must_use]
    pub fn foreign_key(schema: Option<&str>, table: &str, name: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::ForeignKey,
            schema: schema.map(str::to_string),
            table: Some(table.to_string()),
            name: name.into(),
        }
    }

    /// A schema.
    #[must_use]
    pub fn schema(name: impl Into<String>) -> Self {
        Self {
            object_type: ObjectType::Schema,
            schema: None,
            table: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for DatabaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        if let Some(table) = &self.table {
            write!(f, "{table}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Splits a comma-separated column list into trimmed, non-empty names.
#[must_use]
pub fn column_list(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_codes_round_trip() {
        for action in ForeignKeyAction::ALL {
            let code = action.metadata_code();
            assert_eq!(ForeignKeyAction::from_metadata_code(code).unwrap(), action);
        }
    }

    #[test]
    fn test_metadata_codes_are_distinct() {
        let mut codes: Vec<i32> = ForeignKeyAction::ALL
            .iter()
            .map(ForeignKeyAction::metadata_code)
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_metadata_code() {
        for code in [-1, 5, 42] {
            match ForeignKeyAction::from_metadata_code(code) {
                Err(SqlGenError::UnknownForeignKeyAction(c)) => assert_eq!(c, code),
                other => panic!("Expected UnknownForeignKeyAction, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_code_to_text() {
        let text = |code| ForeignKeyAction::from_metadata_code(code).unwrap().to_sql();
        assert_eq!(text(0), "CASCADE");
        assert_eq!(text(1), "RESTRICT");
        assert_eq!(text(2), "SET NULL");
        assert_eq!(text(3), "NO ACTION");
        assert_eq!(text(4), "SET DEFAULT");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "SET DEFAULT".parse::<ForeignKeyAction>().unwrap(),
            ForeignKeyAction::SetDefault
        );
        assert!("cascade".parse::<ForeignKeyAction>().is_err());
        assert!("SET  NULL".parse::<ForeignKeyAction>().is_err());
    }

    #[test]
    fn test_serde_uses_sql_spelling() {
        let json = serde_json::to_string(&ForeignKeyAction::NoAction).unwrap();
        assert_eq!(json, "\"NO ACTION\"");
        let action: ForeignKeyAction = serde_json::from_str("\"SET NULL\"").unwrap();
        assert_eq!(action, ForeignKeyAction::SetNull);
    }

    #[test]
    fn test_column_list() {
        assert_eq!(column_list("a, b ,c"), vec!["a", "b", "c"]);
        assert!(column_list(" , ").is_empty());
    }

    #[test]
    fn test_database_object_display() {
        let fk = DatabaseObject::foreign_key(Some("s"), "orders", "fk_orders_customer");
        assert_eq!(fk.to_string(), "s.orders.fk_orders_customer");
        assert_eq!(DatabaseObject::table(None, "t").to_string(), "t");
    }
}
