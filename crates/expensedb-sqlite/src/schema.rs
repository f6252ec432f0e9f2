//! Database file lifecycle and the two-table schema.
//!
//! The schema version is tracked via `PRAGMA user_version`. The upgrade
//! policy is destructive: when the stored version is behind, both tables
//! are dropped and recreated empty. No data migration is attempted.

use expensedb_core::StorageError;
use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = "
    CREATE TABLE account (
        account_no TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        bank TEXT NOT NULL,
        balance REAL NOT NULL
    );

    CREATE TABLE log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_no TEXT,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        amount REAL NOT NULL,
        FOREIGN KEY (account_no) REFERENCES account(account_no)
    );
";

const DROP_TABLES: &str = "
    DROP TABLE IF EXISTS log;
    DROP TABLE IF EXISTS account;
";

/// Open the database at `path` (`":memory:"` for a transient database) and
/// bring the schema to the current version.
///
/// The `log.account_no` foreign key is declared only; `PRAGMA foreign_keys`
/// stays off so the log accepts entries for accounts that no longer exist.
pub fn open(path: &str) -> Result<Connection, StorageError> {
    let conn = if path == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(path)
    }
    .map_err(|e| StorageError::Other(e.to_string()))?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=OFF;")
        .map_err(|e| StorageError::Other(e.to_string()))?;

    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the tables on first use; on a version bump, drop both tables and
/// recreate them empty, then stamp the new version.
pub fn ensure_schema(conn: &Connection) -> Result<(), StorageError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .map_err(|e| StorageError::Other(e.to_string()))?;

    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    if version > 0 {
        tracing::info!(
            from = version,
            to = SCHEMA_VERSION,
            "upgrading schema, all existing rows are dropped"
        );
    }

    conn.execute_batch(DROP_TABLES)
        .map_err(|e| StorageError::Other(e.to_string()))?;
    conn.execute_batch(CREATE_TABLES)
        .map_err(|e| StorageError::Other(e.to_string()))?;
    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])
        .map_err(|e| StorageError::Other(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_is_stamped() {
        let conn = open(":memory:").unwrap();
        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = open(":memory:").unwrap();
        conn.execute(
            "INSERT INTO account (account_no, name, bank, balance) VALUES ('AC1', 'Alice', 'BankX', 10.0)",
            [],
        )
        .unwrap();

        // Already at the current version, so rows survive
        ensure_schema(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM account", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_version_bump_drops_rows() {
        let conn = open(":memory:").unwrap();
        conn.execute(
            "INSERT INTO account (account_no, name, bank, balance) VALUES ('AC1', 'Alice', 'BankX', 10.0)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO log (account_no, date, type, amount) VALUES ('AC1', '01-01-2023', 'INCOME', 10.0)",
            [],
        )
        .unwrap();

        // Pretend the file was written by an older release
        conn.execute("PRAGMA user_version = 0", []).unwrap();
        ensure_schema(&conn).unwrap();

        let accounts: i64 = conn
            .query_row("SELECT COUNT(*) FROM account", [], |r| r.get(0))
            .unwrap();
        let logs: i64 = conn
            .query_row("SELECT COUNT(*) FROM log", [], |r| r.get(0))
            .unwrap();
        assert_eq!(accounts, 0);
        assert_eq!(logs, 0);

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
