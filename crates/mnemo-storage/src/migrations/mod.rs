//! Schema migrations tracked with PRAGMA user_version.

pub mod v001_atoms;
pub mod v002_audit_log;

use rusqlite::Connection;

use mnemo_core::errors::{MnemoResult, StorageError};

type Migration = fn(&Connection) -> MnemoResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_atoms::migrate), (2, v002_audit_log::migrate)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> MnemoResult<()> {
    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if current < *version {
            migrate(conn).map_err(|e| StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }
    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> MnemoResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| crate::to_storage_err(e.to_string()))
}
