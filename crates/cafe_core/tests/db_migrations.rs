use cafe_core::db::migrations::latest_version;
use cafe_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "cafes");
    assert_table_exists(&conn, "employees");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cafes.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO cafes (uuid, name, description, location)
             VALUES ('kept', 'Kopi', 'Toast', 'Tiong Bahru');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM cafes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn cafes_table_rejects_duplicate_name_location_pairs() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO cafes (uuid, name, description, location)
         VALUES ('a', 'Kopi', 'Toast', 'Tiong Bahru');",
        [],
    )
    .unwrap();

    let err = conn
        .execute(
            "INSERT INTO cafes (uuid, name, description, location)
             VALUES ('b', 'Kopi', 'Other', 'Tiong Bahru');",
            [],
        )
        .unwrap_err();
    assert!(DbError::from(err).is_unique_violation());
}

#[test]
fn dangling_employee_reference_fails_at_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let tx = conn.transaction().unwrap();
    tx.execute(
        "INSERT INTO employees (employee_id, name, email_address, phone_number, gender, start_date, cafe_id)
         VALUES ('UI0000001', 'Ada', 'ada@brew.co', '91234567', 'female', '2024-01-01', 4242);",
        [],
    )
    .unwrap();

    assert!(tx.commit().is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
