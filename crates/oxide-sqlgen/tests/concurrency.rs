//! Tests for sharing one registry across threads.

mod common;
use common::*;

use std::sync::Arc;
use std::thread;

use oxide_sqlgen::prelude::*;

#[test]
fn registry_is_shared_read_only() {
    let registry = Arc::new(registry());
    let engines = [
        DatabaseProfile::generic(),
        DatabaseProfile::informix(),
        DatabaseProfile::oracle(),
        DatabaseProfile::postgresql(),
    ];

    let mut handles = Vec::new();
    for db in &engines {
        let expected = render(orders_fk(), db);
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            let db = db.clone();
            let expected = expected.clone();
            handles.push(thread::spawn(move || {
                let statement: SqlStatement = orders_fk().into();
                let sql: Vec<String> = registry
                    .generate_sql(&statement, &db)
                    .unwrap()
                    .iter()
                    .map(|s| s.text().to_string())
                    .collect();
                assert_eq!(sql, expected, "{}", db.short_name());
            }));
        }
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn generators_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GeneratorRegistry>();
    assert_send_sync::<DatabaseProfile>();
    assert_send_sync::<ChangeSet>();
}
