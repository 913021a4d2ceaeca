use hrhub_database::*;
use hrhub_domain::config::DatabaseConfig;
use surrealdb::types::SurrealValue;

const EMPLOYEE_TABLE: &str = "DEFINE TABLE employee SCHEMAFULL;
DEFINE FIELD name ON employee TYPE string;";

#[derive(Debug, SurrealValue)]
struct LedgerRow {
    slice: String,
    version: String,
}

async fn memory(ns: &str) -> Database {
    Database::builder().url("mem://").session(ns, "test_db").init().await.expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = memory("health").await;

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "health");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn builder_from_default_config_connects() {
    let db = DatabaseBuilder::from_config(&DatabaseConfig::default()).init().await.unwrap();
    assert_eq!(db.namespace(), "hrhub");
}

#[tokio::test]
async fn migrations_apply_once_and_are_recorded() {
    let db = memory("ledger").await;
    let migrations = [Migration::new("staff", "0001", EMPLOYEE_TABLE)];

    let first = db.migrate(&migrations).await.unwrap();
    assert_eq!(first.applied.len(), 1);
    assert!(first.skipped.is_empty());

    let second = db.migrate(&migrations).await.unwrap();
    assert!(second.applied.is_empty());
    assert_eq!(second.skipped.len(), 1);

    let rows = db
        .query("SELECT slice, version FROM migration")
        .await
        .unwrap()
        .take::<Vec<LedgerRow>>(0)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].slice, "staff");
    assert_eq!(rows[0].version, "0001");
}

#[tokio::test]
async fn tampered_migration_is_rejected() {
    let db = memory("tampered").await;
    db.migrate(&[Migration::new("staff", "0001", EMPLOYEE_TABLE)]).await.unwrap();

    let err = db
        .migrate(&[Migration::new("staff", "0001", "DEFINE TABLE employee SCHEMALESS;")])
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Migration { .. }));
}

#[tokio::test]
async fn failing_script_is_not_recorded() {
    let db = memory("failing").await;

    let result = db.migrate(&[Migration::new("staff", "0001", "THROW \"broken\";")]).await;
    assert!(result.is_err());

    let rows = db
        .query("SELECT slice, version FROM migration")
        .await
        .unwrap()
        .take::<Vec<LedgerRow>>(0)
        .unwrap();
    assert!(rows.is_empty());
}
