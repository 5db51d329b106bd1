//! Chain of lower-priority generators handed to the generator being run.

use std::sync::Arc;

use tracing::trace;

use crate::database::Database;
use crate::error::{Result, SqlGenError};
use crate::sql::Sql;
use crate::statement::{SqlStatement, TypedStatement};

use super::DynGenerator;

/// The generators ranked below the one currently rendering.
///
/// A generator that wants to decorate rather than replace the next one in
/// line calls [`GeneratorChain::generate_sql`] and post-processes the result.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorChain<'a> {
    generators: &'a [Arc<dyn DynGenerator>],
}

impl<'a> GeneratorChain<'a> {
    pub(crate) const fn new(generators: &'a [Arc<dyn DynGenerator>]) -> Self {
        Self { generators }
    }

    /// Renders `statement` with the next generator.
    ///
    /// Delegating past the last generator is an error: a generator that
    /// delegates must only be registered above one that renders.
    pub fn generate_sql(
        &self,
        statement: &SqlStatement,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let Some((next, rest)) = self.generators.split_first() else {
            return Err(SqlGenError::EndOfChain {
                kind: statement.kind(),
                database: database.short_name().to_string(),
            });
        };
        trace!(generator = next.name(), kind = %statement.kind(), "Delegating down the chain");
        next.generate_sql(statement, database, &GeneratorChain::new(rest))
    }

    /// Typed convenience over [`GeneratorChain::generate_sql`].
    pub fn delegate<S: TypedStatement>(
        &self,
        statement: &S,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        self.generate_sql(&statement.clone().into(), database)
    }
}
