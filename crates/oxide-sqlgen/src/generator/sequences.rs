//! Sequence listing generators.

use crate::database::Database;
use crate::error::{Result, SqlGenError};
use crate::schema::DatabaseObject;
use crate::sql::Sql;
use crate::statement::SelectSequencesStatement;
use crate::validation::ValidationErrors;

use super::{GeneratorChain, Priority, SqlGenerator};

fn select_sequences_sql(
    statement: &SelectSequencesStatement,
    database: &dyn Database,
    filter: Option<&str>,
) -> Result<Sql> {
    let schema = database
        .convert_requested_schema_to_schema(statement.schema_name.as_deref())
        .ok_or_else(|| SqlGenError::UnresolvedSchema {
            database: database.short_name().to_string(),
        })?;

    let mut sql = format!(
        "SELECT SEQUENCE_NAME FROM INFORMATION_SCHEMA.SEQUENCES WHERE SEQUENCE_SCHEMA = '{}'",
        schema.replace('\'', "''")
    );
    if let Some(filter) = filter {
        sql.push_str(" AND ");
        sql.push_str(filter);
    }

    Ok(Sql::new(sql).affects(DatabaseObject::schema(schema)))
}

/// Lists sequences through `INFORMATION_SCHEMA.SEQUENCES`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectSequencesGenerator;

impl SqlGenerator for SelectSequencesGenerator {
    type Statement = SelectSequencesStatement;

    fn name(&self) -> &'static str {
        "select_sequences"
    }

    fn priority(&self) -> Priority {
        Priority::DEFAULT
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(&self, _statement: &Self::Statement, _database: &dyn Database) -> ValidationErrors {
        ValidationErrors::new()
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        Ok(vec![select_sequences_sql(statement, database, None)?])
    }
}

/// H2 also lists the sequences backing identity columns; those are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectSequencesGeneratorH2;

impl SqlGenerator for SelectSequencesGeneratorH2 {
    type Statement = SelectSequencesStatement;

    fn name(&self) -> &'static str {
        "select_sequences_h2"
    }

    fn priority(&self) -> Priority {
        Priority::DATABASE
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.is("h2")
    }

    fn validate(&self, _statement: &Self::Statement, _database: &dyn Database) -> ValidationErrors {
        ValidationErrors::new()
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        Ok(vec![select_sequences_sql(
            statement,
            database,
            Some("IS_GENERATED=FALSE"),
        )?])
    }
}
