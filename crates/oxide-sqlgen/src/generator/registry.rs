//! Generator registry.
//!
//! The registry is built once, explicitly, and then shared read-only. It
//! holds no interior mutability, so an `Arc<GeneratorRegistry>` can be used
//! from any number of threads without locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::database::Database;
use crate::error::{Result, SqlGenError};
use crate::sql::Sql;
use crate::statement::{SqlStatement, StatementKind};
use crate::validation::ValidationErrors;

use super::chain::GeneratorChain;
use super::foreign_key::{
    AddForeignKeyConstraintGenerator, AddForeignKeyConstraintGeneratorInformix,
    AddForeignKeyConstraintGeneratorOracle, DropForeignKeyConstraintGenerator,
    DropForeignKeyConstraintGeneratorMySql,
};
use super::sequences::{SelectSequencesGenerator, SelectSequencesGeneratorH2};
use super::{DynGenerator, Erased, SqlGenerator};

/// Registry of SQL generators keyed by statement kind.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = GeneratorRegistry::with_builtins();
/// registry.register(MyVendorAddForeignKeyGenerator);
///
/// let registry = Arc::new(registry);
/// let sql = registry.generate_sql(&statement, &database)?;
/// ```
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    /// Generators per statement kind, in registration order.
    generators: HashMap<StatementKind, Vec<Arc<dyn DynGenerator>>>,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every generator shipped by this crate.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(AddForeignKeyConstraintGenerator);
        registry.register(AddForeignKeyConstraintGeneratorInformix);
        registry.register(AddForeignKeyConstraintGeneratorOracle);

        registry.register(DropForeignKeyConstraintGenerator);
        registry.register(DropForeignKeyConstraintGeneratorMySql);

        registry.register(SelectSequencesGenerator);
        registry.register(SelectSequencesGeneratorH2);

        registry
    }

    /// Registers a generator. Several generators per kind are expected.
    pub fn register<G: SqlGenerator>(&mut self, generator: G) {
        self.register_arc(Arc::new(Erased(generator)));
    }

    /// Registers an already type-erased generator (for sharing).
    pub fn register_arc(&mut self, generator: Arc<dyn DynGenerator>) {
        debug!(
            generator = generator.name(),
            kind = %generator.statement_kind(),
            priority = %generator.priority(),
            "Registering SQL generator"
        );
        self.generators
            .entry(generator.statement_kind())
            .or_default()
            .push(generator);
    }

    /// Returns the number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.values().map(Vec::len).sum()
    }

    /// Returns whether no generator is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every generator registered for `kind`, in registration order.
    #[must_use]
    pub fn generators_for(&self, kind: StatementKind) -> &[Arc<dyn DynGenerator>] {
        self.generators
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the generators supporting `statement` on `database`, highest priority first.
    ///
    /// Equal priorities keep registration order. An empty result is not an
    /// error here; [`GeneratorRegistry::validate`] and
    /// [`GeneratorRegistry::generate_sql`] report it as
    /// [`SqlGenError::NoGenerator`].
    #[must_use]
    pub fn resolve(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> Vec<Arc<dyn DynGenerator>> {
        let mut candidates: Vec<Arc<dyn DynGenerator>> = self
            .generators_for(statement.kind())
            .iter()
            .filter(|g| g.supports(statement, database))
            .cloned()
            .collect();
        // Stable, so ties stay in registration order.
        candidates.sort_by(|a, b| b.priority().cmp(&a.priority()));

        debug!(
            kind = %statement.kind(),
            database = database.short_name(),
            candidates = candidates.len(),
            "Resolved SQL generators"
        );
        candidates
    }

    /// Returns whether any generator supports `statement` on `database`.
    #[must_use]
    pub fn supports(&self, statement: &SqlStatement, database: &dyn Database) -> bool {
        self.generators_for(statement.kind())
            .iter()
            .any(|g| g.supports(statement, database))
    }

    /// Validates `statement` against every supporting generator.
    ///
    /// Errors from all generators are accumulated in priority order.
    pub fn validate(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> Result<ValidationErrors> {
        let generators = self.require(statement, database)?;
        Ok(Self::validate_with(&generators, statement, database))
    }

    /// Renders `statement` for `database`.
    ///
    /// Validation runs first; if it reports anything, no SQL is produced
    /// and the errors are returned as [`SqlGenError::Validation`].
    pub fn generate_sql(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let generators = self.require(statement, database)?;

        let errors = Self::validate_with(&generators, statement, database);
        if errors.has_errors() {
            warn!(
                kind = %statement.kind(),
                database = database.short_name(),
                errors = errors.len(),
                "Statement failed validation"
            );
            return Err(SqlGenError::Validation(errors));
        }

        let sql = GeneratorChain::new(&generators).generate_sql(statement, database)?;
        for fragment in &sql {
            trace!(sql = %fragment, "Generated SQL");
        }
        Ok(sql)
    }

    /// Renders several statements; all or nothing.
    pub fn generate_statements(
        &self,
        statements: &[SqlStatement],
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let mut all_sql = Vec::new();
        for statement in statements {
            all_sql.extend(self.generate_sql(statement, database)?);
        }
        Ok(all_sql)
    }

    fn require(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> Result<Vec<Arc<dyn DynGenerator>>> {
        let generators = self.resolve(statement, database);
        if generators.is_empty() {
            warn!(
                kind = %statement.kind(),
                database = database.short_name(),
                "No SQL generator supports statement"
            );
            return Err(SqlGenError::NoGenerator {
                kind: statement.kind(),
                database: database.short_name().to_string(),
            });
        }
        Ok(generators)
    }

    fn validate_with(
        generators: &[Arc<dyn DynGenerator>],
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for generator in generators {
            errors.extend(generator.validate(statement, database));
        }
        errors
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.generators.iter().collect();
        kinds.sort_by_key(|(kind, _)| **kind);
        let mut map = f.debug_map();
        for (kind, generators) in kinds {
            let names: Vec<&str> = generators.iter().map(|g| g.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}
