//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL string
//! that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Get current version
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Apply migrations
    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- The write-once schema registration. The CHECK pins the table to a
        -- single row.
        CREATE TABLE registration (
            slot INTEGER PRIMARY KEY CHECK (slot = 0),
            name TEXT NOT NULL,
            symbol TEXT NOT NULL,
            digest BLOB NOT NULL,             -- 32 bytes
            algorithm TEXT NOT NULL,          -- algorithm tag, e.g. 'sha256'
            registered_at INTEGER NOT NULL    -- Unix ms
        );

        -- Token records: one immutable row per minted identifier
        CREATE TABLE tokens (
            token_id INTEGER PRIMARY KEY,     -- caller-supplied identifier
            locator TEXT NOT NULL,            -- opaque metadata locator
            digest BLOB NOT NULL,             -- 32 bytes, content digest
            algorithm TEXT NOT NULL,          -- algorithm tag
            owner BLOB NOT NULL,              -- 32 bytes, principal
            minted_at INTEGER NOT NULL        -- Unix ms
        );

        CREATE INDEX idx_tokens_owner ON tokens(owner);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        // Verify tables exist
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"registration".to_string()));
        assert!(tables.contains(&"tokens".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap(); // Should not error
        migrate(&mut conn).unwrap(); // Still should not error

        // Verify version is 1
        let version: u32 = conn
            .query_row(
                "SELECT MAX(version) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_registration_single_row() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        conn.execute(
            "INSERT INTO registration (slot, name, symbol, digest, algorithm, registered_at)
             VALUES (0, 'Foo', 'F', ?1, 'sha256', 0)",
            rusqlite::params![[0u8; 32].as_slice()],
        )
        .unwrap();

        // A second row violates the slot CHECK/PK
        let second = conn.execute(
            "INSERT INTO registration (slot, name, symbol, digest, algorithm, registered_at)
             VALUES (1, 'Bar', 'B', ?1, 'sha256', 0)",
            rusqlite::params![[0u8; 32].as_slice()],
        );
        assert!(second.is_err());
    }
}
