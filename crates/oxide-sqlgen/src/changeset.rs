//! Change sets.
//!
//! A change set is the unit a migration tool applies and rolls back: an
//! identified, ordered list of changes compiled together. Compilation is
//! all-or-nothing; the first invalid change discards everything.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::change::Change;
use crate::database::Database;
use crate::error::{Result, SqlGenError};
use crate::generator::GeneratorRegistry;
use crate::sql::Sql;

/// An identified group of changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Change set identifier, unique per author.
    pub id: String,
    /// Author of the change set.
    pub author: String,
    /// Changes, in application order.
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new(id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            changes: Vec::new(),
        }
    }

    /// Adds a change to this change set.
    #[must_use]
    pub fn change(mut self, change: impl Into<Change>) -> Self {
        self.changes.push(change.into());
        self
    }

    /// Returns the full change set identifier.
    #[must_use]
    pub fn qualified_id(&self) -> String {
        format!("{}::{}", self.author, self.id)
    }

    /// Returns whether every change can be undone.
    #[must_use]
    pub fn is_revertible(&self) -> bool {
        self.changes.iter().all(Change::is_revertible)
    }

    /// Renders every change, in order, for `database`.
    pub fn forward_sql(
        &self,
        registry: &GeneratorRegistry,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        info!(
            change_set = %self.qualified_id(),
            database = database.short_name(),
            changes = self.changes.len(),
            "Compiling change set"
        );
        compile(&self.changes, registry, database)
    }

    /// Returns the changes that undo this change set.
    ///
    /// Inverses come in reverse order of the changes they undo.
    pub fn rollback_changes(&self) -> Result<Vec<Change>> {
        let mut rollback = Vec::new();
        for change in self.changes.iter().rev() {
            let Some(inverses) = change.create_inverses().into_changes() else {
                warn!(
                    change_set = %self.qualified_id(),
                    change = change.meta().name,
                    "Change is not revertible"
                );
                return Err(SqlGenError::NotRevertible(self.qualified_id()));
            };
            rollback.extend(inverses);
        }
        Ok(rollback)
    }

    /// Renders the rollback of this change set for `database`.
    pub fn rollback_sql(
        &self,
        registry: &GeneratorRegistry,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let rollback = self.rollback_changes()?;
        info!(
            change_set = %self.qualified_id(),
            database = database.short_name(),
            changes = rollback.len(),
            "Compiling change set rollback"
        );
        compile(&rollback, registry, database)
    }
}

fn compile(
    changes: &[Change],
    registry: &GeneratorRegistry,
    database: &dyn Database,
) -> Result<Vec<Sql>> {
    let mut sql = Vec::new();
    for change in changes {
        let rendered = change.generate_sql(registry, database)?;
        debug!(
            change = change.meta().name,
            statements = rendered.len(),
            "{}",
            change.confirmation_message()
        );
        sql.extend(rendered);
    }
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{AddForeignKeyConstraintChange, DropForeignKeyConstraintChange};
    use crate::database::DatabaseProfile;
    use crate::schema::ForeignKeyAction;

    fn change_set() -> ChangeSet {
        ChangeSet::new("1", "alice")
            .change(
                AddForeignKeyConstraintChange::new("orders", "customer_id", "customers", "id")
                    .constraint_name("fk_orders_customer")
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .change(
                AddForeignKeyConstraintChange::new("lines", "order_id", "orders", "id")
                    .constraint_name("fk_lines_order"),
            )
    }

    #[test]
    fn test_forward_sql_keeps_change_order() {
        let sql = change_set()
            .forward_sql(&GeneratorRegistry::with_builtins(), &DatabaseProfile::generic())
            .unwrap();
        let texts: Vec<&str> = sql.iter().map(Sql::text).collect();
        assert_eq!(
            texts,
            vec![
                "ALTER TABLE orders ADD CONSTRAINT fk_orders_customer FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE CASCADE",
                "ALTER TABLE lines ADD CONSTRAINT fk_lines_order FOREIGN KEY (order_id) REFERENCES orders(id)",
            ]
        );
    }

    #[test]
    fn test_rollback_reverses_order() {
        let sql = change_set()
            .rollback_sql(&GeneratorRegistry::with_builtins(), &DatabaseProfile::mysql())
            .unwrap();
        let texts: Vec<&str> = sql.iter().map(Sql::text).collect();
        assert_eq!(
            texts,
            vec![
                "ALTER TABLE `lines` DROP FOREIGN KEY `fk_lines_order`",
                "ALTER TABLE `orders` DROP FOREIGN KEY `fk_orders_customer`",
            ]
        );
    }

    #[test]
    fn test_not_revertible_change_set() {
        let set = change_set().change(DropForeignKeyConstraintChange::new("orders", "fk_old"));
        assert!(!set.is_revertible());
        match set.rollback_changes() {
            Err(SqlGenError::NotRevertible(id)) => assert_eq!(id, "alice::1"),
            other => panic!("Expected NotRevertible, got {other:?}"),
        }
    }

    #[test]
    fn test_forward_sql_is_all_or_nothing() {
        let set = change_set().change(AddForeignKeyConstraintChange::new("t", "", "u", "id"));
        let err = set
            .forward_sql(&GeneratorRegistry::with_builtins(), &DatabaseProfile::generic())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_change_set() {
        let set = ChangeSet::new("empty", "bob");
        assert!(set.is_revertible());
        assert!(set.rollback_changes().unwrap().is_empty());
        assert!(set
            .forward_sql(&GeneratorRegistry::with_builtins(), &DatabaseProfile::h2())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_change_set_from_json() {
        let set: ChangeSet = serde_json::from_str(
            r#"{
                "id": "2",
                "author": "carol",
                "changes": [
                    {
                        "change": "addForeignKeyConstraint",
                        "baseTableName": "orders",
                        "baseColumnNames": "customer_id",
                        "referencedTableName": "customers",
                        "referencedColumnNames": "id",
                        "constraintName": "fk_orders_customer"
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(set.changes.len(), 1);
        assert!(set.is_revertible());
    }
}
