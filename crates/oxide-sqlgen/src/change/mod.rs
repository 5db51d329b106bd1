//! Schema changes.
//!
//! A [`Change`] is what a changelog describes: a database-agnostic request
//! such as "add this foreign key". It expands into one or more
//! [`SqlStatement`]s for a given database and knows how to undo itself.
//!
//! Changes are serialized tagged by their change name, so a changelog parser
//! can hand them over as JSON:
//!
//! ```rust
//! use oxide_sqlgen::prelude::*;
//!
//! let change: Change = serde_json::from_str(
//!     r#"{
//!         "change": "dropForeignKeyConstraint",
//!         "baseTableName": "orders",
//!         "constraintName": "fk_orders_customer"
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(change.confirmation_message(), "Foreign key fk_orders_customer dropped");
//! ```

mod foreign_key;

pub use foreign_key::{AddForeignKeyConstraintChange, DropForeignKeyConstraintChange};

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Result;
use crate::generator::GeneratorRegistry;
use crate::sql::Sql;
use crate::statement::SqlStatement;

/// Descriptive data every change carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeMetaData {
    /// Name used in changelogs (e.g. `addForeignKeyConstraint`).
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Rank among implementations of the same change name.
    pub priority: u32,
}

impl ChangeMetaData {
    /// Priority of the built-in changes.
    pub const PRIORITY_DEFAULT: u32 = 1;
}

/// What undoing a change takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inverses {
    /// Apply these changes, in order, to undo the change.
    Changes(Vec<Change>),
    /// The change cannot be undone automatically.
    NotRevertible,
}

impl Inverses {
    /// Returns whether the change can be undone.
    #[must_use]
    pub const fn is_revertible(&self) -> bool {
        matches!(self, Self::Changes(_))
    }

    /// Returns the inverse changes, or `None` when not revertible.
    #[must_use]
    pub fn into_changes(self) -> Option<Vec<Change>> {
        match self {
            Self::Changes(changes) => Some(changes),
            Self::NotRevertible => None,
        }
    }
}

/// Behavior shared by every change kind.
pub trait SchemaChange {
    /// Returns the change's name, description and priority.
    fn meta(&self) -> ChangeMetaData;

    /// Expands the change into statements for `database`.
    fn generate_statements(&self, database: &dyn Database) -> Vec<SqlStatement>;

    /// Returns the changes that undo this one.
    ///
    /// Changes that lose information when applied keep this default.
    fn create_inverses(&self) -> Inverses {
        Inverses::NotRevertible
    }

    /// Message reported once the change has been applied.
    fn confirmation_message(&self) -> String;
}

/// A single schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum Change {
    /// Add a foreign key constraint.
    AddForeignKeyConstraint(AddForeignKeyConstraintChange),
    /// Drop a foreign key constraint.
    DropForeignKeyConstraint(DropForeignKeyConstraintChange),
}

impl Change {
    fn inner(&self) -> &dyn SchemaChange {
        match self {
            Self::AddForeignKeyConstraint(change) => change,
            Self::DropForeignKeyConstraint(change) => change,
        }
    }

    /// Returns the change's name, description and priority.
    #[must_use]
    pub fn meta(&self) -> ChangeMetaData {
        self.inner().meta()
    }

    /// Expands the change into statements for `database`.
    #[must_use]
    pub fn generate_statements(&self, database: &dyn Database) -> Vec<SqlStatement> {
        self.inner().generate_statements(database)
    }

    /// Returns the changes that undo this one.
    #[must_use]
    pub fn create_inverses(&self) -> Inverses {
        self.inner().create_inverses()
    }

    /// Returns whether this change can be undone.
    #[must_use]
    pub fn is_revertible(&self) -> bool {
        self.create_inverses().is_revertible()
    }

    /// Message reported once the change has been applied.
    #[must_use]
    pub fn confirmation_message(&self) -> String {
        self.inner().confirmation_message()
    }

    /// Expands the change and renders every statement for `database`.
    pub fn generate_sql(
        &self,
        registry: &GeneratorRegistry,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        registry.generate_statements(&self.generate_statements(database), database)
    }
}

impl From<AddForeignKeyConstraintChange> for Change {
    fn from(change: AddForeignKeyConstraintChange) -> Self {
        Self::AddForeignKeyConstraint(change)
    }
}

impl From<DropForeignKeyConstraintChange> for Change {
    fn from(change: DropForeignKeyConstraintChange) -> Self {
        Self::DropForeignKeyConstraint(change)
    }
}
