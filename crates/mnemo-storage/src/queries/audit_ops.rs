//! Audit log rows.

use rusqlite::{params, Connection};

use mnemo_core::errors::MnemoResult;
use mnemo_core::models::{AuditActor, AuditEntry, AuditOperation};

use super::{fmt_time, parse_time};
use crate::to_storage_err;

pub fn insert_audit_entry(conn: &Connection, entry: &AuditEntry) -> MnemoResult<()> {
    conn.execute(
        "INSERT INTO atom_audit_log (atom_id, operation, details, actor, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.atom_id,
            entry.operation.as_str(),
            entry.details.to_string(),
            entry.actor.as_str(),
            fmt_time(&entry.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(format!("audit {}: {e}", entry.atom_id)))?;
    Ok(())
}

/// Entries in insertion order, optionally for one atom.
pub fn query_audit(conn: &Connection, atom_id: Option<&str>) -> MnemoResult<Vec<AuditEntry>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT atom_id, operation, details, actor, timestamp FROM atom_audit_log
             WHERE (?1 IS NULL OR atom_id = ?1)
             ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![atom_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (atom_id, op, details, actor, ts) = row.map_err(|e| to_storage_err(e.to_string()))?;
        entries.push(AuditEntry {
            atom_id,
            operation: AuditOperation::parse(&op)
                .ok_or_else(|| to_storage_err(format!("bad audit operation '{op}'")))?,
            details: serde_json::from_str(&details)?,
            actor: AuditActor::parse(&actor)
                .ok_or_else(|| to_storage_err(format!("bad audit actor '{actor}'")))?,
            timestamp: parse_time(&ts)?,
        });
    }
    Ok(entries)
}
