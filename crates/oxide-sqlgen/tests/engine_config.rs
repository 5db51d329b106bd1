//! Tests for engines described in configuration.

mod common;
use common::*;

use oxide_sqlgen::prelude::*;

#[test]
fn configured_engine_uses_default_generators() {
    let db = DatabaseProfile::from_json(
        r#"{
            "name": "mssql",
            "default_schema": "dbo",
            "identifier_quote": "bracket",
            "supports_sequences": true
        }"#,
    )
    .unwrap();

    let change: Change =
        AddForeignKeyConstraintChange::new("orders", "customer_id", "customers", "id")
            .constraint_name("fk_orders_customer")
            .into();
    let sql = change.generate_sql(&registry(), &db).unwrap();
    assert_eq!(
        sql[0].text(),
        "ALTER TABLE [dbo].[orders] ADD CONSTRAINT [fk_orders_customer] \
         FOREIGN KEY ([customer_id]) REFERENCES [dbo].[customers]([id])"
    );

    assert_eq!(
        render(SelectSequencesStatement::default(), &db),
        vec!["SELECT SEQUENCE_NAME FROM INFORMATION_SCHEMA.SEQUENCES WHERE SEQUENCE_SCHEMA = 'dbo'"]
    );
}

#[test]
fn configured_engine_name_selects_engine_specific_generator() {
    let db = DatabaseProfile::from_json(r#"{ "name": "MySQL", "identifier_quote": "none" }"#)
        .unwrap();
    let statement = DropForeignKeyConstraintStatement::new(None, "orders", "fk_orders_customer");
    assert_eq!(
        render(statement, &db),
        vec!["ALTER TABLE orders DROP FOREIGN KEY fk_orders_customer"]
    );
}

#[test]
fn configured_engine_without_foreign_keys() {
    let db =
        DatabaseProfile::from_json(r#"{ "name": "columnar", "supports_foreign_keys": false }"#)
            .unwrap();
    assert!(!registry().supports(&orders_fk().into(), &db));
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(
        DatabaseProfile::from_json(r#"{ "name": "" }"#),
        Err(SqlGenError::Config(_))
    ));
    assert!(matches!(
        DatabaseProfile::from_json(r#"{ "name": "x", "quote": "double" }"#),
        Err(SqlGenError::Serialization(_))
    ));
}

#[test]
fn preset_configuration_round_trips() {
    let json = DatabaseProfile::postgresql().config().to_json().unwrap();
    let db = DatabaseProfile::from_json(&json).unwrap();
    assert_eq!(db, DatabaseProfile::postgresql());
}

#[test]
fn configured_oracle_without_foreign_keys_has_no_generator() {
    let db = DatabaseProfile::from_json(r#"{ "name": "oracle", "supports_foreign_keys": false }"#)
        .unwrap();
    let statement: SqlStatement =
        AddForeignKeyConstraintStatement::new("", vec![], "", vec![]).into();
    let registry = registry();

    assert!(!registry.supports(&statement, &db));
    assert!(registry.resolve(&statement, &db).is_empty());
    assert!(matches!(
        registry.validate(&statement, &db),
        Err(SqlGenError::NoGenerator { .. })
    ));
    assert!(matches!(
        registry.generate_sql(&statement, &db),
        Err(SqlGenError::NoGenerator { .. })
    ));
}
