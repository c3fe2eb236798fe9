//! Log every atom mutation: create, update, promote, supersede, dissolve, discard, delete.

use rusqlite::Connection;

use mnemo_core::errors::MnemoResult;
use mnemo_core::models::{AuditActor, AuditEntry, AuditOperation};

use crate::queries::audit_ops;

/// Append-only audit logger. Runs on the caller's connection so the entry
/// commits or rolls back with the mutation it describes.
pub struct AuditLogger;

impl AuditLogger {
    /// Log an atom mutation.
    pub fn log(
        conn: &Connection,
        atom_id: &str,
        operation: AuditOperation,
        actor: AuditActor,
        details: serde_json::Value,
    ) -> MnemoResult<()> {
        let entry = AuditEntry {
            atom_id: atom_id.to_string(),
            operation,
            details,
            actor,
            timestamp: chrono::Utc::now(),
        };
        audit_ops::insert_audit_entry(conn, &entry)
    }
}
