use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Complete first-run schema. `IF NOT EXISTS` keeps reopening idempotent.
///
/// `PRAGMA foreign_keys` is left at SQLite's default (off) on purpose:
/// deleting a patient or doctor that still has appointments must succeed,
/// and the joined queries tolerate the resulting dangling references.
/// The one integrity rule that matters — no deleting a doctor who still
/// has patients — is enforced by the repository, not the store.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS doctor (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS patient (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    condition TEXT NOT NULL,
    doctor_id INTEGER NOT NULL REFERENCES doctor(id)
);

CREATE TABLE IF NOT EXISTS appointment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patient(id),
    doctor_id INTEGER NOT NULL REFERENCES doctor(id),
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    duration INTEGER NOT NULL,
    notes TEXT
);
"#;

/// Open a SQLite connection to the given path, creating the schema if absent
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    bootstrap_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    bootstrap_schema(&conn)?;
    Ok(conn)
}

fn bootstrap_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(SCHEMA)?;
    tracing::debug!("Schema bootstrap complete");
    Ok(())
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}
