#![allow(dead_code)]

use oxide_sqlgen::prelude::*;

pub fn registry() -> GeneratorRegistry {
    GeneratorRegistry::with_builtins()
}

pub fn render(statement: impl Into<SqlStatement>, db: &dyn Database) -> Vec<String> {
    registry()
        .generate_sql(&statement.into(), db)
        .unwrap_or_else(|e| panic!("Failed to generate SQL on {}: {e}", db.short_name()))
        .iter()
        .map(|sql| sql.text().to_string())
        .collect()
}

pub fn validation_errors(
    statement: impl Into<SqlStatement>,
    db: &dyn Database,
) -> ValidationErrors {
    match registry().generate_sql(&statement.into(), db) {
        Err(SqlGenError::Validation(errors)) => errors,
        other => panic!("Expected validation failure, got {other:?}"),
    }
}

pub fn orders_fk() -> AddForeignKeyConstraintStatement {
    AddForeignKeyConstraintStatement::new(
        "orders",
        vec!["customer_id".to_string()],
        "customers",
        vec!["id".to_string()],
    )
    .constraint_name("fk_orders_customer")
}
