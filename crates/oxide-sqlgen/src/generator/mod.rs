//! SQL generators.
//!
//! A generator renders one statement kind, either for every engine (a
//! default) or for a single engine. Several generators may be registered
//! for the same kind; the [`GeneratorRegistry`] orders the ones that
//! support a given database by [`Priority`] and hands the first one a
//! [`GeneratorChain`] over the rest, so an engine-specific generator can
//! either replace the default or delegate to it.
//!
//! # Example
//!
//! ```rust
//! use oxide_sqlgen::prelude::*;
//!
//! let registry = GeneratorRegistry::with_builtins();
//! let statement = AddForeignKeyConstraintStatement::new(
//!     "T1",
//!     vec!["A".into(), "B".into()],
//!     "T2",
//!     vec!["X".into(), "Y".into()],
//! )
//! .constraint_name("FK1")
//! .on_delete(ForeignKeyAction::Cascade);
//!
//! let sql = registry
//!     .generate_sql(&statement.into(), &DatabaseProfile::generic())
//!     .unwrap();
//! assert_eq!(
//!     sql[0].text(),
//!     "ALTER TABLE T1 ADD CONSTRAINT FK1 FOREIGN KEY (A,B) REFERENCES T2(X,Y) ON DELETE CASCADE"
//! );
//! ```

mod chain;
mod foreign_key;
mod registry;
mod sequences;

pub use chain::GeneratorChain;
pub use foreign_key::{
    AddForeignKeyConstraintGenerator, AddForeignKeyConstraintGeneratorInformix,
    AddForeignKeyConstraintGeneratorOracle, DropForeignKeyConstraintGenerator,
    DropForeignKeyConstraintGeneratorMySql,
};
pub use registry::GeneratorRegistry;
pub use sequences::{SelectSequencesGenerator, SelectSequencesGeneratorH2};

use std::fmt;

use crate::database::Database;
use crate::error::{Result, SqlGenError};
use crate::sql::Sql;
use crate::statement::{SqlStatement, StatementKind, TypedStatement};
use crate::validation::ValidationErrors;

/// Rank of a generator among those supporting the same statement.
///
/// Higher runs first. Generators with equal priority keep registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u32);

impl Priority {
    /// Generic SQL that works on any engine supporting the statement.
    pub const DEFAULT: Self = Self(1);
    /// SQL written for one specific engine.
    pub const DATABASE: Self = Self(5);
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders one statement type.
pub trait SqlGenerator: Send + Sync + 'static {
    /// Statement type this generator renders.
    type Statement: TypedStatement;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Rank among generators for the same statement.
    fn priority(&self) -> Priority;

    /// Returns false to exclude this generator for `database`.
    fn supports(&self, _statement: &Self::Statement, _database: &dyn Database) -> bool {
        true
    }

    /// Reports every problem with `statement` on `database`.
    fn validate(&self, statement: &Self::Statement, database: &dyn Database) -> ValidationErrors;

    /// Renders `statement`. `chain` holds the lower-priority generators.
    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>>;
}

/// Type-erased generator as stored in the registry.
pub trait DynGenerator: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Statement kind this generator renders.
    fn statement_kind(&self) -> StatementKind;

    /// Rank among generators for the same statement.
    fn priority(&self) -> Priority;

    /// Returns whether this generator can render `statement` on `database`.
    fn supports(&self, statement: &SqlStatement, database: &dyn Database) -> bool;

    /// Reports every problem with `statement` on `database`.
    fn validate(&self, statement: &SqlStatement, database: &dyn Database) -> ValidationErrors;

    /// Renders `statement`.
    fn generate_sql(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>>;
}

impl fmt::Debug for dyn DynGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .field("kind", &self.statement_kind())
            .field("priority", &self.priority())
            .finish()
    }
}

/// Adapts a typed [`SqlGenerator`] to [`DynGenerator`].
struct Erased<G>(G);

impl<G: SqlGenerator> DynGenerator for Erased<G> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn statement_kind(&self) -> StatementKind {
        G::Statement::KIND
    }

    fn priority(&self) -> Priority {
        self.0.priority()
    }

    fn supports(&self, statement: &SqlStatement, database: &dyn Database) -> bool {
        G::Statement::downcast(statement).is_some_and(|s| self.0.supports(s, database))
    }

    fn validate(&self, statement: &SqlStatement, database: &dyn Database) -> ValidationErrors {
        match G::Statement::downcast(statement) {
            Some(s) => self.0.validate(s, database),
            None => ValidationErrors::new(),
        }
    }

    fn generate_sql(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        let typed = G::Statement::downcast(statement).ok_or_else(|| SqlGenError::NoGenerator {
            kind: statement.kind(),
            database: database.short_name().to_string(),
        })?;
        self.0.generate_sql(typed, database, chain)
    }
}
