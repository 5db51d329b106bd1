//! Abstract SQL statements.
//!
//! A statement describes one SQL operation independently of any engine.
//! Changes compile into statements; generators render them. Generators
//! only ever see `&SqlStatement`, so a statement is fixed once built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::ForeignKeyAction;

/// Discriminant of a [`SqlStatement`], used to key generator registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    /// `ALTER TABLE .. ADD CONSTRAINT .. FOREIGN KEY`.
    AddForeignKeyConstraint,
    /// `ALTER TABLE .. DROP CONSTRAINT`.
    DropForeignKeyConstraint,
    /// Catalog query listing user sequences.
    SelectSequences,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddForeignKeyConstraint => "AddForeignKeyConstraint",
            Self::DropForeignKeyConstraint => "DropForeignKeyConstraint",
            Self::SelectSequences => "SelectSequences",
        };
        f.write_str(name)
    }
}

/// A single engine-agnostic SQL operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlStatement {
    /// Add a foreign key constraint.
    AddForeignKeyConstraint(AddForeignKeyConstraintStatement),
    /// Drop a foreign key constraint.
    DropForeignKeyConstraint(DropForeignKeyConstraintStatement),
    /// List the user-defined sequences of a schema.
    SelectSequences(SelectSequencesStatement),
}

impl SqlStatement {
    /// Returns the kind of this statement.
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::AddForeignKeyConstraint(_) => StatementKind::AddForeignKeyConstraint,
            Self::DropForeignKeyConstraint(_) => StatementKind::DropForeignKeyConstraint,
            Self::SelectSequences(_) => StatementKind::SelectSequences,
        }
    }
}

/// A concrete statement type with a fixed [`StatementKind`].
///
/// Lets a generator declare the statement it renders and receive it
/// already unwrapped from [`SqlStatement`].
pub trait TypedStatement: Clone + Into<SqlStatement> + Send + Sync + 'static {
    /// Kind of every value of this type.
    const KIND: StatementKind;

    /// Borrows the typed statement out of `statement` if the kinds match.
    fn downcast(statement: &SqlStatement) -> Option<&Self>;
}

/// Add a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddForeignKeyConstraintStatement {
    /// Constraint name; unnamed constraints get an engine-chosen name.
    pub constraint_name: Option<String>,
    /// Schema of the referencing table.
    pub base_table_schema_name: Option<String>,
    /// Referencing table.
    pub base_table_name: String,
    /// Referencing columns.
    pub base_column_names: Vec<String>,
    /// Schema of the referenced table.
    pub referenced_table_schema_name: Option<String>,
    /// Referenced table.
    pub referenced_table_name: String,
    /// Referenced columns.
    pub referenced_column_names: Vec<String>,
    /// `DEFERRABLE`.
    pub deferrable: bool,
    /// `INITIALLY DEFERRED`.
    pub initially_deferred: bool,
    /// `ON UPDATE` action.
    pub on_update: Option<ForeignKeyAction>,
    /// `ON DELETE` action.
    pub on_delete: Option<ForeignKeyAction>,
}

impl AddForeignKeyConstraintStatement {
    /// Creates a statement referencing `referenced_table(referenced_columns)`
    /// from `base_table(base_columns)`.
    #[must_use]
    pub fn new(
        base_table_name: impl Into<String>,
        base_column_names: Vec<String>,
        referenced_table_name: impl Into<String>,
        referenced_column_names: Vec<String>,
    ) -> Self {
        Self {
            constraint_name: None,
            base_table_schema_name: None,
            base_table_name: base_table_name.into(),
            base_column_names,
            referenced_table_schema_name: None,
            referenced_table_name: referenced_table_name.into(),
            referenced_column_names,
            deferrable: false,
            initially_deferred: false,
            on_update: None,
            on_delete: None,
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
        self.deferrable = deferrable;
        self
    }

    /// Sets `INITIALLY DEFERRED`.
    #[must_use]
    pub fn initially_deferred(mut self, initially_deferred: bool) -> Self {
        self.initially_deferred = initially_deferred;
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
}

impl From<AddForeignKeyConstraintStatement> for SqlStatement {
    fn from(statement: AddForeignKeyConstraintStatement) -> Self {
        Self::AddForeignKeyConstraint(statement)
    }
}

impl TypedStatement for AddForeignKeyConstraintStatement {
    const KIND: StatementKind = StatementKind::AddForeignKeyConstraint;

    fn downcast(statement: &SqlStatement) -> Option<&Self> {
        match statement {
            SqlStatement::AddForeignKeyConstraint(s) => Some(s),
            _ => None,
        }
    }
}

/// Drop a foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropForeignKeyConstraintStatement {
    /// Schema of the table owning the constraint.
    pub base_table_schema_name: Option<String>,
    /// Table owning the constraint.
    pub base_table_name: String,
    /// Constraint to drop.
    pub constraint_name: String,
}

impl DropForeignKeyConstraintStatement {
    /// Creates a statement dropping `constraint_name` from `base_table_name`.
    #[must_use]
    pub fn new(
        base_table_schema_name: Option<String>,
        base_table_name: impl Into<String>,
        constraint_name: impl Into<String>,
    ) -> Self {
        Self {
            base_table_schema_name,
            base_table_name: base_table_name.into(),
            constraint_name: constraint_name.into(),
        }
    }
}

impl From<DropForeignKeyConstraintStatement> for SqlStatement {
    fn from(statement: DropForeignKeyConstraintStatement) -> Self {
        Self::DropForeignKeyConstraint(statement)
    }
}

impl TypedStatement for DropForeignKeyConstraintStatement {
    const KIND: StatementKind = StatementKind::DropForeignKeyConstraint;

    fn downcast(statement: &SqlStatement) -> Option<&Self> {
        match statement {
            SqlStatement::DropForeignKeyConstraint(s) => Some(s),
            _ => None,
        }
    }
}

/// List the sequences of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSequencesStatement {
    /// Schema to list; `None` means the database default.
    pub schema_name: Option<String>,
}

impl SelectSequencesStatement {
    /// Creates a statement listing the sequences of `schema_name`.
    #[must_use]
    pub fn new(schema_name: Option<String>) -> Self {
        Self { schema_name }
    }
}

impl From<SelectSequencesStatement> for SqlStatement {
    fn from(statement: SelectSequencesStatement) -> Self {
        Self::SelectSequences(statement)
    }
}

impl TypedStatement for SelectSequencesStatement {
    const KIND: StatementKind = StatementKind::SelectSequences;

    fn downcast(statement: &SqlStatement) -> Option<&Self> {
        match statement {
            SqlStatement::SelectSequences(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let add: SqlStatement = AddForeignKeyConstraintStatement::new(
            "orders",
            vec!["customer_id".to_string()],
            "customers",
            vec!["id".to_string()],
        )
        .into();
        assert_eq!(add.kind(), StatementKind::AddForeignKeyConstraint);
        assert_eq!(add.kind(), AddForeignKeyConstraintStatement::KIND);

        let drop: SqlStatement = DropForeignKeyConstraintStatement::new(None, "orders", "fk").into();
        assert_eq!(drop.kind(), DropForeignKeyConstraintStatement::KIND);

        let seq: SqlStatement = SelectSequencesStatement::default().into();
        assert_eq!(seq.kind(), StatementKind::SelectSequences);
    }

    #[test]
    fn test_downcast() {
        let statement: SqlStatement = SelectSequencesStatement::new(Some("app".into())).into();
        assert!(AddForeignKeyConstraintStatement::downcast(&statement).is_none());
        let typed = SelectSequencesStatement::downcast(&statement).unwrap();
        assert_eq!(typed.schema_name.as_deref(), Some("app"));
    }

    #[test]
    fn test_add_foreign_key_builder() {
        let statement = AddForeignKeyConstraintStatement::new(
            "orders",
            vec!["customer_id".to_string()],
            "customers",
            vec!["id".to_string()],
        )
        .constraint_name("fk_orders_customer")
        .base_table_schema_name("sales")
        .on_delete(ForeignKeyAction::Cascade)
        .deferrable(true);

        assert_eq!(statement.constraint_name.as_deref(), Some("fk_orders_customer"));
        assert_eq!(statement.base_table_schema_name.as_deref(), Some("sales"));
        assert_eq!(statement.on_delete, Some(ForeignKeyAction::Cascade));
        assert_eq!(statement.on_update, None);
        assert!(statement.deferrable);
        assert!(!statement.initially_deferred);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            StatementKind::DropForeignKeyConstraint.to_string(),
            "DropForeignKeyConstraint"
        );
    }
}
