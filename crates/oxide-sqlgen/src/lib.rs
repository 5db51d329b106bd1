//! Database-agnostic schema changes compiled to engine-specific SQL.
//!
//! `oxide-sqlgen` turns abstract schema changes ("add this foreign key")
//! into SQL for a particular relational engine:
//! - Several generators may render the same statement; the most specific one
//!   that supports the target engine wins, and may delegate to the next
//! - Every resolved generator validates the statement first, and a single
//!   validation error means no SQL is produced
//! - Changes derive their own inverses for rollback
//!
//! # Architecture
//!
//! - **Database** - Capabilities and escaping rules of the target engine
//! - **Statements** - Abstract SQL operations like `AddForeignKeyConstraint`
//! - **Generators** - Render one statement kind, ranked by priority
//! - **Registry** - Resolves, validates and drives the generator chain
//! - **Changes** - Changelog-level descriptions expanding into statements
//! - **Change sets** - Groups of changes compiled and rolled back together
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlgen::prelude::*;
//!
//! let registry = GeneratorRegistry::with_builtins();
//! let change_set = ChangeSet::new("42", "alice").change(
//!     AddForeignKeyConstraintChange::new("orders", "customer_id", "customers", "id")
//!         .constraint_name("fk_orders_customer")
//!         .delete_cascade(true),
//! );
//!
//! let forward = change_set
//!     .forward_sql(&registry, &DatabaseProfile::postgresql())
//!     .unwrap();
//! assert_eq!(
//!     forward[0].text(),
//!     "ALTER TABLE \"public\".\"orders\" ADD CONSTRAINT \"fk_orders_customer\" \
//!      FOREIGN KEY (\"customer_id\") REFERENCES \"public\".\"customers\"(\"id\") \
//!      ON DELETE CASCADE"
//! );
//!
//! let rollback = change_set
//!     .rollback_sql(&registry, &DatabaseProfile::mysql())
//!     .unwrap();
//! assert_eq!(
//!     rollback[0].text(),
//!     "ALTER TABLE `orders` DROP FOREIGN KEY `fk_orders_customer`"
//! );
//! ```

pub mod change;
pub mod changeset;
pub mod config;
pub mod database;
pub mod error;
pub mod generator;
pub mod schema;
pub mod sql;
pub mod statement;
pub mod validation;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::change::{
        AddForeignKeyConstraintChange, Change, ChangeMetaData, DropForeignKeyConstraintChange,
        Inverses, SchemaChange,
    };
    pub use crate::changeset::ChangeSet;
    pub use crate::config::{EngineConfig, IdentifierCase, QuoteStyle};
    pub use crate::database::{Database, DatabaseProfile};
    pub use crate::error::{Result, SqlGenError};
    pub use crate::generator::{GeneratorChain, GeneratorRegistry, Priority, SqlGenerator};
    pub use crate::schema::{DatabaseObject, ForeignKeyAction, ObjectType};
    pub use crate::sql::Sql;
    pub use crate::statement::{
        AddForeignKeyConstraintStatement, DropForeignKeyConstraintStatement,
        SelectSequencesStatement, SqlStatement, StatementKind,
    };
    pub use crate::validation::{ValidationError, ValidationErrorKind, ValidationErrors};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_covers_round_trip() {
        let registry = GeneratorRegistry::with_builtins();
        let db = DatabaseProfile::generic();
        let change: Change = AddForeignKeyConstraintChange::new("T1", "A,B", "T2", "X,Y")
            .constraint_name("FK1")
            .into();

        let forward = change.generate_sql(&registry, &db).unwrap();
        assert_eq!(forward.len(), 1);

        let Inverses::Changes(inverses) = change.create_inverses() else {
            panic!("Expected revertible change");
        };
        let rollback = inverses[0].generate_sql(&registry, &db).unwrap();
        assert_eq!(rollback[0].text(), "ALTER TABLE T1 DROP CONSTRAINT FK1");
    }
}
