//! SQLite-backed key-value persistence.
//!
//! All durable state lives in one `kv` table, one JSON document per logical
//! record (see the store modules for the keys). The stores above this layer
//! implement the availability-first policy: they fall back to defaults when
//! a read fails and drop writes that fail.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::DatabaseError;

/// Persisted record keys, one JSON document each.
pub const KEY_PREFERENCES: &str = "preferences";
pub const KEY_TIMER_CONFIG: &str = "timer_config";
pub const KEY_SESSIONS: &str = "sessions";
pub const KEY_STATISTICS: &str = "statistics";

/// SQLite database holding the key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/tempo.db`.
    ///
    /// If the on-disk database cannot be opened, falls back to an in-memory
    /// connection so the timer stays usable; persistence then lasts only for
    /// the process lifetime and a warning is logged.
    ///
    /// # Errors
    /// Returns an error only if the in-memory fallback fails as well.
    pub fn open() -> Result<Self, DatabaseError> {
        let conn = match Self::open_file() {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "cannot open database file, using in-memory store");
                Connection::open_in_memory()?
            }
        };
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn open_file() -> Result<Connection, Box<dyn std::error::Error>> {
        let dir = data_dir()?;
        Ok(Connection::open(dir.join("tempo.db"))?)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests, and the degraded-storage path).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
