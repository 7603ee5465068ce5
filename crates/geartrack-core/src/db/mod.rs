//! Database access layer: a SQLite-backed key-value store holding one JSON
//! array per collection
//!
//! This module is organized by domain:
//! - `owners` - Owner collection, seed and search
//! - `vehicles` - Vehicle collection, seed and search
//! - `services` - Service order collection, seed and search
//! - `dashboard` - Overview counts and recent services
//!
//! Every collection goes through the generic [`Record`] operations below:
//! `get_all` seeds a collection the first time its key is missing, `upsert`
//! replaces by id or appends, `delete` removes by id and ignores unknown ids.

use std::collections::HashMap;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

mod dashboard;
mod owners;
mod services;
mod vehicles;

pub use owners::UNKNOWN_OWNER;
pub use vehicles::UNKNOWN_VEHICLE;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// A record type stored as one JSON array under a fixed key
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection
    const KEY: &'static str;
    /// Singular name used in log lines
    const NAME: &'static str;

    fn id(&self) -> &str;

    /// Records written when the collection is first accessed
    fn seed() -> Vec<Self>;
}

/// Build an id lookup over a loaded collection
pub fn index_by_id<T: Record>(records: &[T]) -> HashMap<&str, &T> {
    records.iter().map(|r| (r.id(), r)).collect()
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    /// Keeps the backing directory of `in_memory()` stores alive
    _temp_dir: Option<Arc<tempfile::TempDir>>,
}

impl Database {
    /// Open (or create) the store at `path`
    pub fn new(path: &str) -> Result<Self> {
        Self::open(path, None)
    }

    /// Create a throwaway store (for testing)
    ///
    /// Backed by a file in a temporary directory rather than `:memory:`,
    /// because every pooled connection to `:memory:` gets its own database.
    pub fn in_memory() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("geartrack_test_").tempdir()?;
        let path = dir.path().join("geartrack.db");
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::InvalidData(format!("Non UTF-8 temp path: {}", path.display())))?
            .to_string();
        Self::open(&path_str, Some(Arc::new(dir)))
    }

    fn open(path: &str, temp_dir: Option<Arc<tempfile::TempDir>>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
            _temp_dir: temp_dir,
        };
        db.run_migrations()?;

        debug!("Opened store at {}", path);
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per collection; value is the JSON array of records
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        Ok(())
    }

    /// Make sure every collection exists, seeding the missing ones
    pub fn seed_defaults(&self) -> Result<()> {
        self.get_all::<crate::models::Owner>()?;
        self.get_all::<crate::models::Vehicle>()?;
        self.get_all::<crate::models::ServiceOrder>()?;
        Ok(())
    }

    /// All records of a collection, seeding it on first access
    pub fn get_all<T: Record>(&self) -> Result<Vec<T>> {
        let conn = self.conn()?;
        load_or_seed(&conn)
    }

    /// Look up one record by id
    pub fn find<T: Record>(&self, id: &str) -> Result<Option<T>> {
        Ok(self.get_all::<T>()?.into_iter().find(|r| r.id() == id))
    }

    /// Replace the record with the same id, or append it
    pub fn upsert<T: Record>(&self, record: &T) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut records: Vec<T> = load_or_seed(&tx)?;
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) => {
                records[index] = record.clone();
                info!("Updated {} {}", T::NAME, record.id());
            }
            None => {
                records.push(record.clone());
                info!("Added {} {}", T::NAME, record.id());
            }
        }
        write_collection(&tx, &records)?;

        tx.commit()?;
        Ok(())
    }

    /// Remove the record with `id`. Unknown ids are a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete<T: Record>(&self, id: &str) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let records: Vec<T> = load_or_seed(&tx)?;
        let before = records.len();
        let remaining: Vec<T> = records.into_iter().filter(|r| r.id() != id).collect();
        let removed = remaining.len() != before;
        write_collection(&tx, &remaining)?;

        tx.commit()?;
        if removed {
            info!("Deleted {} {}", T::NAME, id);
        } else {
            debug!("Delete of unknown {} {} ignored", T::NAME, id);
        }
        Ok(removed)
    }

    /// Overwrite a whole collection
    pub fn replace_all<T: Record>(&self, records: &[T]) -> Result<()> {
        let conn = self.conn()?;
        write_collection(&conn, records)?;
        info!("Replaced {} collection ({} records)", T::NAME, records.len());
        Ok(())
    }

    /// Raw stored value under a key, if any
    pub fn raw_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        read_raw(&conn, key)
    }

    /// Store a raw value under a key, bypassing encoding
    #[cfg(test)]
    pub(crate) fn set_raw_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        write_raw(&conn, key, value)
    }
}

fn read_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

fn write_collection<T: Record>(conn: &Connection, records: &[T]) -> Result<()> {
    let json = serde_json::to_string(records)?;
    write_raw(conn, T::KEY, &json)
}

/// Decode a collection, seeding it when the key is absent.
///
/// A present but undecodable value is an error; it is never overwritten.
fn load_or_seed<T: Record>(conn: &Connection) -> Result<Vec<T>> {
    match read_raw(conn, T::KEY)? {
        Some(json) => serde_json::from_str(&json).map_err(|source| {
            warn!("Stored {} collection under '{}' does not decode", T::NAME, T::KEY);
            Error::CorruptData {
                key: T::KEY.to_string(),
                source,
            }
        }),
        None => {
            let seed = T::seed();
            write_collection(conn, &seed)?;
            info!("Seeded {} collection with {} record(s)", T::NAME, seed.len());
            Ok(seed)
        }
    }
}

#[cfg(test)]
mod tests;
