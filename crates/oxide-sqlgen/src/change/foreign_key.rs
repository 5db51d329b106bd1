//! Foreign key changes.

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Result;
use crate::schema::{column_list, ForeignKeyAction};
use crate::statement::{
    AddForeignKeyConstraintStatement, DropForeignKeyConstraintStatement, SqlStatement,
};

use super::{Change, ChangeMetaData, Inverses, SchemaChange};

fn schema_or_default(schema: Option<&String>, database: &dyn Database) -> Option<String> {
    schema
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .or_else(|| database.default_schema_name().map(str::to_string))
}

/// Adds a foreign key constraint to existing columns.
///
/// Column lists are comma-separated, as written in changelogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddForeignKeyConstraintChange {
    /// Schema of the referencing table; the database default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_table_schema_name: Option<String>,
    /// Referencing table.
    pub base_table_name: String,
    /// Referencing columns, comma-separated.
    pub base_column_names: String,
    /// Schema of the referenced table; the database default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_table_schema_name: Option<String>,
    /// Referenced table.
    pub referenced_table_name: String,
    /// Referenced columns, comma-separated.
    pub referenced_column_names: String,
    /// Constraint name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_name: Option<String>,
    /// `DEFERRABLE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<bool>,
    /// `INITIALLY DEFERRED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initially_deferred: Option<bool>,
    /// ON UPDATE action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ForeignKeyAction>,
    /// ON DELETE action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ForeignKeyAction>,
}

impl AddForeignKeyConstraintChange {
    /// Creates a change referencing `referenced_table(referenced_columns)`
    /// from `base_table(base_columns)`.
    #[must_use]
    pub fn new(
        base_table_name: impl Into<String>,
        base_column_names: impl Into<String>,
        referenced_table_name: impl Into<String>,
        referenced_column_names: impl Into<String>,
    ) -> Self {
        Self {
            base_table_name: base_table_name.into(),
            base_column_names: base_column_names.into(),
            referenced_table_name: referenced_table_name.into(),
            referenced_column_names: referenced_column_names.into(),
            ..Self::default()
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    /// Sets the schema of the referencing table.
    #[must_use]
    pub fn base_table_schema_name(mut self, schema: impl Into<String>) -> Self {
        self.base_table_schema_name = Some(schema.into());
        self
    }

    /// Sets the schema of the referenced table.
    #[must_use]
    pub fn referenced_table_schema_name(mut self, schema: impl Into<String>) -> Self {
        self.referenced_table_schema_name = Some(schema.into());
        self
    }

    /// Sets `DEFERRABLE`.
    #[must_use]
    pub fn deferrable(mut self, deferrable: bool) -> Self {
        self.deferrable = Some(deferrable);
        self
    }

    /// Sets `INITIALLY DEFERRED`.
    #[must_use]
    pub fn initially_deferred(mut self, initially_deferred: bool) -> Self {
        self.initially_deferred = Some(initially_deferred);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets ON DELETE CASCADE when `cascade` is true; otherwise leaves the
    /// current action alone.
    #[must_use]
    pub fn delete_cascade(mut self, cascade: bool) -> Self {
        if cascade {
            self.on_delete = Some(ForeignKeyAction::Cascade);
        }
        self
    }

    /// Sets the ON UPDATE action from a driver metadata code.
    pub fn on_update_code(self, code: i32) -> Result<Self> {
        Ok(self.on_update(ForeignKeyAction::from_metadata_code(code)?))
    }

    /// Sets the ON DELETE action from a driver metadata code.
    pub fn on_delete_code(self, code: i32) -> Result<Self> {
        Ok(self.on_delete(ForeignKeyAction::from_metadata_code(code)?))
    }
}

impl SchemaChange for AddForeignKeyConstraintChange {
    fn meta(&self) -> ChangeMetaData {
        ChangeMetaData {
            name: "addForeignKeyConstraint",
            description: "Add Foreign Key Constraint",
            priority: ChangeMetaData::PRIORITY_DEFAULT,
        }
    }

    fn generate_statements(&self, database: &dyn Database) -> Vec<SqlStatement> {
        let statement = AddForeignKeyConstraintStatement {
            constraint_name: self.constraint_name.clone(),
            base_table_schema_name: schema_or_default(
                self.base_table_schema_name.as_ref(),
                database,
            ),
            base_table_name: self.base_table_name.clone(),
            base_column_names: column_list(&self.base_column_names),
            referenced_table_schema_name: schema_or_default(
                self.referenced_table_schema_name.as_ref(),
                database,
            ),
            referenced_table_name: self.referenced_table_name.clone(),
            referenced_column_names: column_list(&self.referenced_column_names),
            deferrable: self.deferrable.unwrap_or(false),
            initially_deferred: self.initially_deferred.unwrap_or(false),
            on_update: self.on_update,
            on_delete: self.on_delete,
        };
        vec![statement.into()]
    }

    fn create_inverses(&self) -> Inverses {
        let inverse = DropForeignKeyConstraintChange {
            base_table_schema_name: self.base_table_schema_name.clone(),
            base_table_name: self.base_table_name.clone(),
            constraint_name: self.constraint_name.clone().unwrap_or_default(),
        };
        Inverses::Changes(vec![Change::DropForeignKeyConstraint(inverse)])
    }

    fn confirmation_message(&self) -> String {
        format!(
            "Foreign key contraint added to {} ({})",
            self.base_table_name, self.base_column_names
        )
    }
}

/// Drops a foreign key constraint.
///
/// Not revertible: the constraint's columns and actions are gone once dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DropForeignKeyConstraintChange {
    /// Schema of the table owning the constraint; the database default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_table_schema_name: Option<String>,
    /// Table owning the constraint.
    pub base_table_name: String,
    /// Constraint to drop.
    pub constraint_name: String,
}

impl DropForeignKeyConstraintChange {
    /// Creates a change dropping `constraint_name` from `base_table_name`.
    #[must_use]
    pub fn new(base_table_name: impl Into<String>, constraint_name: impl Into<String>) -> Self {
        Self {
            base_table_schema_name: None,
            base_table_name: base_table_name.into(),
            constraint_name: constraint_name.into(),
        }
    }

    /// Sets the schema of the table owning the constraint.
    #[must_use]
    pub fn base_table_schema_name(mut self, schema: impl Into<String>) -> Self {
        self.base_table_schema_name = Some(schema.into());
        self
    }
}

impl SchemaChange for DropForeignKeyConstraintChange {
    fn meta(&self) -> ChangeMetaData {
        ChangeMetaData {
            name: "dropForeignKeyConstraint",
            description: "Drop Foreign Key Constraint",
            priority: ChangeMetaData::PRIORITY_DEFAULT,
        }
    }

    fn generate_statements(&self, database: &dyn Database) -> Vec<SqlStatement> {
        vec![DropForeignKeyConstraintStatement::new(
            schema_or_default(self.base_table_schema_name.as_ref(), database),
            self.base_table_name.clone(),
            self.constraint_name.clone(),
        )
        .into()]
    }

    fn confirmation_message(&self) -> String {
        format!("Foreign key {} dropped", self.constraint_name)
    }
}
