//! SQLite backing for the key-value persistence service.
//!
//! One `kv` table holds every blob; the record store writes its two
//! collections under fixed keys and never issues SQL itself.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};

use crate::kv::KeyValueStore;

/// Bumped whenever `SCHEMA` changes; stored in SQLite's `user_version`.
const SCHEMA_VERSION: i32 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
);
";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let mut conn =
            Connection::open(&db_path).context("failed to open SQLite database")?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        ensure_schema(&mut conn)?;

        info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: Arc::new(db_path),
        })
    }

    /// Private database that disappears with the last clone.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn =
            Connection::open_in_memory().context("failed to open in-memory database")?;
        ensure_schema(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: Arc::new(PathBuf::from(":memory:")),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        task(&mut guard)
    }

    pub fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.execute(|conn| {
            conn.query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()
            .with_context(|| format!("failed to read blob '{key}'"))
        })
    }

    pub fn put_blob(&self, key: &str, value: &[u8]) -> Result<()> {
        self.execute(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write blob '{key}'"))?;
            Ok(())
        })
    }
}

/// Create the `kv` table on a fresh file. Files written by a newer build are
/// refused rather than guessed at.
fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > SCHEMA_VERSION {
        bail!("database schema version {version} is newer than supported ({SCHEMA_VERSION})");
    }
    if version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction().context("failed to open schema transaction")?;
    tx.execute_batch(SCHEMA).context("failed to create kv table")?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit schema")?;

    info!("Database schema set to version {SCHEMA_VERSION}");
    Ok(())
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_blob(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.put_blob(key, value)
    }
}
