//! Foreign key generators.

use crate::database::Database;
use crate::error::Result;
use crate::schema::{DatabaseObject, ForeignKeyAction};
use crate::sql::Sql;
use crate::statement::{AddForeignKeyConstraintStatement, DropForeignKeyConstraintStatement};
use crate::validation::ValidationErrors;

use super::{GeneratorChain, Priority, SqlGenerator};

/// Where the constraint name goes in `ADD CONSTRAINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamePlacement {
    /// `ADD CONSTRAINT name FOREIGN KEY ...` (standard).
    Leading,
    /// `ADD CONSTRAINT FOREIGN KEY ... CONSTRAINT name` (Informix).
    Trailing,
}

fn add_foreign_key_sql(
    statement: &AddForeignKeyConstraintStatement,
    database: &dyn Database,
    placement: NamePlacement,
) -> Sql {
    let base_schema = statement.base_table_schema_name.as_deref();
    let constraint_name = statement.constraint_name.as_deref();

    let mut sql = format!(
        "ALTER TABLE {} ADD ",
        database.escape_table_name(base_schema, &statement.base_table_name)
    );
    match (placement, constraint_name) {
        (NamePlacement::Leading, Some(name)) => {
            sql.push_str("CONSTRAINT ");
            sql.push_str(&database.escape_constraint_name(name));
            sql.push(' ');
        }
        (NamePlacement::Leading, None) => {}
        (NamePlacement::Trailing, _) => sql.push_str("CONSTRAINT "),
    }

    sql.push_str("FOREIGN KEY (");
    sql.push_str(&database.escape_column_name_list(&statement.base_column_names));
    sql.push_str(") REFERENCES ");
    sql.push_str(&database.escape_table_name(
        statement.referenced_table_schema_name.as_deref(),
        &statement.referenced_table_name,
    ));
    sql.push('(');
    sql.push_str(&database.escape_column_name_list(&statement.referenced_column_names));
    sql.push(')');

    if let Some(action) = statement.on_update {
        sql.push_str(" ON UPDATE ");
        sql.push_str(action.to_sql());
    }
    if let Some(action) = statement.on_delete {
        sql.push_str(" ON DELETE ");
        sql.push_str(action.to_sql());
    }

    if statement.deferrable {
        sql.push_str(" DEFERRABLE");
    }
    if statement.initially_deferred {
        sql.push_str(" INITIALLY DEFERRED");
    }

    if let (NamePlacement::Trailing, Some(name)) = (placement, constraint_name) {
        sql.push_str(" CONSTRAINT ");
        sql.push_str(&database.escape_constraint_name(name));
    }

    let mut rendered =
        Sql::new(sql).affects(DatabaseObject::table(base_schema, &statement.base_table_name));
    for column in &statement.base_column_names {
        rendered = rendered.affects(DatabaseObject::column(
            base_schema,
            &statement.base_table_name,
            column.trim(),
        ));
    }
    if let Some(name) = constraint_name {
        rendered = rendered.affects(DatabaseObject::foreign_key(
            base_schema,
            &statement.base_table_name,
            name,
        ));
    }
    rendered
}

/// Standard `ALTER TABLE .. ADD CONSTRAINT .. FOREIGN KEY`.
///
/// Excluded on engines that cannot add foreign keys after table creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddForeignKeyConstraintGenerator;

impl SqlGenerator for AddForeignKeyConstraintGenerator {
    type Statement = AddForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "add_foreign_key_constraint"
    }

    fn priority(&self) -> Priority {
        Priority::DEFAULT
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.supports_foreign_keys()
    }

    fn validate(&self, statement: &Self::Statement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if !database.supports_initially_deferrable_columns() {
            let db = database.short_name();
            errors.check_disallowed_field("initiallyDeferred", &statement.initially_deferred, db);
            errors.check_disallowed_field("deferrable", &statement.deferrable, db);
        }

        errors.check_required_field("baseColumnNames", &statement.base_column_names);
        errors.check_required_field("baseTableName", &statement.base_table_name);
        errors.check_required_field("referencedColumnNames", &statement.referenced_column_names);
        errors.check_required_field("referencedTableName", &statement.referenced_table_name);

        errors
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        Ok(vec![add_foreign_key_sql(
            statement,
            database,
            NamePlacement::Leading,
        )])
    }
}

/// Informix names the constraint after the foreign key clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddForeignKeyConstraintGeneratorInformix;

impl SqlGenerator for AddForeignKeyConstraintGeneratorInformix {
    type Statement = AddForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "add_foreign_key_constraint_informix"
    }

    fn priority(&self) -> Priority {
        Priority::DATABASE
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.is("informix") && database.supports_foreign_keys()
    }

    fn validate(&self, _statement: &Self::Statement, _database: &dyn Database) -> ValidationErrors {
        // Field checks come from the default generator below in the chain.
        ValidationErrors::new()
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        Ok(vec![add_foreign_key_sql(
            statement,
            database,
            NamePlacement::Trailing,
        )])
    }
}

/// Oracle accepts the standard syntax but only a subset of the actions.
///
/// Rendering is left to the next generator in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddForeignKeyConstraintGeneratorOracle;

impl SqlGenerator for AddForeignKeyConstraintGeneratorOracle {
    type Statement = AddForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "add_foreign_key_constraint_oracle"
    }

    fn priority(&self) -> Priority {
        Priority::DATABASE
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.is("oracle") && database.supports_foreign_keys()
    }

    fn validate(&self, statement: &Self::Statement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let db = database.short_name();

        if statement.on_update.is_some() {
            errors.add_unsupported("onUpdate", db);
        }
        if matches!(
            statement.on_delete,
            Some(
                ForeignKeyAction::Restrict
                    | ForeignKeyAction::SetDefault
                    | ForeignKeyAction::NoAction
            )
        ) {
            errors.add_unsupported("onDelete", db);
        }

        errors
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        chain.delegate(statement, database)
    }
}

/// Standard `ALTER TABLE .. DROP CONSTRAINT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropForeignKeyConstraintGenerator;

impl SqlGenerator for DropForeignKeyConstraintGenerator {
    type Statement = DropForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "drop_foreign_key_constraint"
    }

    fn priority(&self) -> Priority {
        Priority::DEFAULT
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.supports_foreign_keys()
    }

    fn validate(&self, statement: &Self::Statement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("baseTableName", &statement.base_table_name);
        errors.check_required_field("constraintName", &statement.constraint_name);
        errors
    }

    fn generate_sql(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        _chain: &GeneratorChain<'_>,
    ) -> Result<Vec<Sql>> {
        Ok(vec![drop_foreign_key_sql(statement, database, "CONSTRAINT")])
    }
}

/// MySQL drops foreign keys with `DROP FOREIGN KEY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropForeignKeyConstraintGeneratorMySql;

impl SqlGenerator for DropForeignKeyConstraintGeneratorMySql {
    type Statement = DropForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "drop_foreign_key_constraint_mysql"
    }

    fn priority(&self) -> Priority {
        Priority::DATABASE
    }

    fn supports(&self, _statement: &Self::Statement, database: &dyn Database) -> bool {
        database.is("mysql") && database.supports_foreign_keys()
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
        Ok(vec![drop_foreign_key_sql(statement, database, "FOREIGN KEY")])
    }
}

fn drop_foreign_key_sql(
    statement: &DropForeignKeyConstraintStatement,
    database: &dyn Database,
    keyword: &str,
) -> Sql {
    let schema = statement.base_table_schema_name.as_deref();
    Sql::new(format!(
        "ALTER TABLE {} DROP {keyword} {}",
        database.escape_table_name(schema, &statement.base_table_name),
        database.escape_constraint_name(&statement.constraint_name)
    ))
    .affects(DatabaseObject::foreign_key(
        schema,
        &statement.base_table_name,
        &statement.constraint_name,
    ))
}
