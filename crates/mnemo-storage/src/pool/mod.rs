//! Single serialized SQLite connection.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use mnemo_core::config::StorageConfig;
use mnemo_core::errors::{MnemoResult, StorageError};

use crate::to_storage_err;
use pragmas::apply_pragmas;

/// One connection behind a blocking mutex. Store calls are synchronous and
/// short, so they may run from async callers without a dedicated runtime hop.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database path.
    pub fn open(path: &Path, config: &StorageConfig) -> MnemoResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> MnemoResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        let config = StorageConfig {
            wal_mode: false,
            ..StorageConfig::default()
        };
        apply_pragmas(&conn, &config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> MnemoResult<T>
    where
        F: FnOnce(&Connection) -> MnemoResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| StorageError::LockPoisoned {
            details: e.to_string(),
        })?;
        f(&guard)
    }
}
