// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection management with PRAGMA setup.
//!
//! A [`Database`] is a cloneable handle to one connection behind a mutex.
//! Clones share the connection, so the knowledge bases and the skill store
//! can live in the same file.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use skillforge_core::SkillforgeError;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (creating if needed) a read-write database with WAL mode and
    /// foreign keys enabled.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SkillforgeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SkillforgeError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).map_err(storage_err)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(storage_err)?;

        debug!(path = %path.display(), "database opened");
        Ok(Self::from_connection(conn))
    }

    /// Opens an existing database that rejects every write.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, SkillforgeError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(storage_err)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_err)?;

        debug!(path = %path.display(), "database opened read-only");
        Ok(Self::from_connection(conn))
    }

    /// A private in-memory database, for tests and scratch use.
    pub fn open_in_memory() -> Result<Self, SkillforgeError> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(storage_err)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn call<T, F>(&self, f: F) -> Result<T, SkillforgeError>
    where
        F: FnOnce(&mut Connection) -> Result<T, SkillforgeError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| SkillforgeError::Internal("database mutex poisoned".into()))?;
        f(&mut conn)
    }
}

/// Maps a rusqlite error into [`SkillforgeError::Storage`].
pub fn storage_err(e: rusqlite::Error) -> SkillforgeError {
    SkillforgeError::Storage {
        source: Box::new(e),
    }
}

/// Maps a rusqlite error raised by caller-supplied SQL into
/// [`SkillforgeError::Query`], keeping SQLite's message.
pub fn query_err(e: rusqlite::Error) -> SkillforgeError {
    SkillforgeError::Query {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}
