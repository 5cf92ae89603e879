use famlist_core::db::migrations::latest_version;
use famlist_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn fresh_db_reaches_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn list_tables_exist_with_family_column() {
    let conn = open_db_in_memory().unwrap();
    for table in ["lists", "list_categories", "list_items"] {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "missing table {table}");
    }

    let mut stmt = conn.prepare("PRAGMA table_info(lists);").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(columns.contains(&"family_id".to_string()));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, .. } if db_version == latest_version() + 1
    ));
}

#[test]
fn reopening_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("famlist.sqlite3");
    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn missing_store_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent").join("famlist.sqlite3");

    let err = open_db(&path).unwrap_err();
    let expected = dir.path().join("absent");
    assert!(matches!(err, DbError::StoreDirMissing(ref missing) if *missing == expected));
    assert_eq!(err.code(), "db_dir_missing");
    assert!(!path.exists());
}

#[test]
fn blank_store_path_is_rejected() {
    let err = open_db("   ").unwrap_err();
    assert!(matches!(err, DbError::BlankStorePath));
}

#[test]
fn failed_migration_names_version_and_keeps_previous_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("half.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE lists (list_key TEXT PRIMARY KEY, family_id TEXT);
             PRAGMA user_version = 1;",
        )
        .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Migration { version: 2, .. }));

    let conn = Connection::open(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, 1);
}
