use serde::{Deserialize, Serialize};

use super::defaults;

/// `[storage]`: where atoms and the audit trail live, plus SQLite tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file opened by `MemoryEngine::open`.
    pub db_path: String,
    /// Write-ahead journaling. Ignored for in-memory databases.
    pub wal_mode: bool,
    /// `PRAGMA cache_size`; negative values are KiB.
    pub cache_size: i64,
    /// How long a writer waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.into(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
