//! SQLite implementation of the RegistryStore trait.
//!
//! This is the primary storage backend for the Mintmark registry. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use mintmark_core::{HashAlgorithm, SchemaRegistration, Sha256Digest, TokenId, TokenRecord};
use mintmark_gate::Principal;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertOutcome, RegisterOutcome, RegistryStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking to
/// avoid blocking the async runtime; each operation holds the connection
/// for its whole check-and-write, which makes it atomic with respect to
/// every other operation on this store.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the locked connection on the blocking pool.
    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|e| {
                StoreError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&conn)
        })
        .await
        .map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!("spawn_blocking failed: {}", e)),
            ))
        })?
    }
}

/// Decode a 32-byte digest column.
fn column_digest(bytes: Vec<u8>) -> Result<Sha256Digest> {
    Sha256Digest::try_from(bytes.as_slice())
        .map_err(|e| StoreError::InvalidData(e.to_string()))
}

/// Decode an algorithm tag column.
fn column_algorithm(tag: String) -> Result<HashAlgorithm> {
    HashAlgorithm::parse(&tag).map_err(|e| StoreError::InvalidData(e.to_string()))
}

/// Decode a 32-byte principal column.
fn column_principal(bytes: Vec<u8>) -> Result<Principal> {
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| StoreError::InvalidData(format!("principal of {} bytes", b.len())))?;
    Ok(Principal::from_bytes(arr))
}

#[async_trait]
impl RegistryStore for SqliteStore {
    async fn put_registration(
        &self,
        registration: &SchemaRegistration,
    ) -> Result<RegisterOutcome> {
        let registration = registration.clone();

        self.blocking(move |conn| {
            let existing: Option<i64> = conn
                .query_row("SELECT slot FROM registration WHERE slot = 0", [], |row| {
                    row.get(0)
                })
                .optional()?;

            if existing.is_some() {
                return Ok(RegisterOutcome::AlreadyRegistered);
            }

            debug!(name = %registration.name, "storing schema registration");
            conn.execute(
                "INSERT INTO registration (slot, name, symbol, digest, algorithm, registered_at)
                 VALUES (0, ?1, ?2, ?3, ?4, ?5)",
                params![
                    &registration.name,
                    &registration.symbol,
                    registration.digest.as_bytes().as_slice(),
                    registration.algorithm.as_str(),
                    now_millis(),
                ],
            )?;

            Ok(RegisterOutcome::Stored)
        })
        .await
    }

    async fn get_registration(&self) -> Result<Option<SchemaRegistration>> {
        self.blocking(|conn| {
            let row: Option<(String, String, Vec<u8>, String)> = conn
                .query_row(
                    "SELECT name, symbol, digest, algorithm FROM registration WHERE slot = 0",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )
                .optional()?;

            let Some((name, symbol, digest_bytes, algorithm_tag)) = row else {
                return Ok(None);
            };

            Ok(Some(SchemaRegistration {
                name,
                symbol,
                digest: column_digest(digest_bytes)?,
                algorithm: column_algorithm(algorithm_tag)?,
            }))
        })
        .await
    }

    async fn insert_record(
        &self,
        id: TokenId,
        record: &TokenRecord,
        owner: &Principal,
    ) -> Result<InsertOutcome> {
        let record = record.clone();
        let owner = *owner;

        self.blocking(move |conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT token_id FROM tokens WHERE token_id = ?1",
                    params![id.value() as i64],
                    |row| row.get(0),
                )
                .optional()?;

            if existing.is_some() {
                return Ok(InsertOutcome::Exists);
            }

            debug!(token = %id, locator = %record.locator, "inserting record");
            conn.execute(
                "INSERT INTO tokens (token_id, locator, digest, algorithm, owner, minted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id.value() as i64,
                    &record.locator,
                    record.digest.as_bytes().as_slice(),
                    record.algorithm.as_str(),
                    owner.as_bytes().as_slice(),
                    now_millis(),
                ],
            )?;

            Ok(InsertOutcome::Inserted)
        })
        .await
    }

    async fn get_record(&self, id: TokenId) -> Result<Option<TokenRecord>> {
        self.blocking(move |conn| {
            let row: Option<(String, Vec<u8>, String)> = conn
                .query_row(
                    "SELECT locator, digest, algorithm FROM tokens WHERE token_id = ?1",
                    params![id.value() as i64],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
                )
                .optional()?;

            let Some((locator, digest_bytes, algorithm_tag)) = row else {
                return Ok(None);
            };

            Ok(Some(TokenRecord {
                locator,
                digest: column_digest(digest_bytes)?,
                algorithm: column_algorithm(algorithm_tag)?,
            }))
        })
        .await
    }

    async fn has_record(&self, id: TokenId) -> Result<bool> {
        self.blocking(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM tokens WHERE token_id = ?1)",
                params![id.value() as i64],
                |row| row.get(0),
            )?;

            Ok(exists)
        })
        .await
    }

    async fn owner_of(&self, id: TokenId) -> Result<Option<Principal>> {
        self.blocking(move |conn| {
            let owner_bytes: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT owner FROM tokens WHERE token_id = ?1",
                    params![id.value() as i64],
                    |row| row.get(0),
                )
                .optional()?;

            owner_bytes.map(column_principal).transpose()
        })
        .await
    }

    async fn list_tokens(&self) -> Result<Vec<TokenId>> {
        self.blocking(|conn| {
            let mut stmt = conn.prepare("SELECT token_id FROM tokens ORDER BY token_id")?;

            let tokens: Vec<TokenId> = stmt
                .query_map([], |row| {
                    row.get::<_, i64>(0).map(|v| TokenId::new(v as u64))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(tokens)
        })
        .await
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
