//! v002: append-only atom audit log.

use rusqlite::Connection;

use mnemo_core::errors::MnemoResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemoResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS atom_audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            atom_id     TEXT NOT NULL,
            operation   TEXT NOT NULL,
            details     TEXT NOT NULL DEFAULT '{}',
            actor       TEXT NOT NULL DEFAULT 'system',
            timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_audit_atom ON atom_audit_log(atom_id);
        CREATE INDEX IF NOT EXISTS idx_audit_operation ON atom_audit_log(operation);
        CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON atom_audit_log(timestamp);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
