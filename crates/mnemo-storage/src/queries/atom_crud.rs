//! Insert, update, get, delete for atom rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use mnemo_core::atom::normalize;
use mnemo_core::errors::MnemoResult;
use mnemo_core::{Atom, Confidence, Provenance};

use super::{fmt_time, parse_time};
use crate::to_storage_err;

pub(crate) const ATOM_COLUMNS: &str = "id, subject, predicate, object, atom_type, confidence, graph, \
     contexts, first_observed, last_accessed, access_count, source_user, belief_holder, \
     epistemic_distance, provenance, superseded_by, refines, triple_hash";

pub fn insert_atom(conn: &Connection, atom: &Atom) -> MnemoResult<()> {
    let contexts =
        serde_json::to_string(&atom.contexts).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO atoms (
            id, subject, subject_key, predicate, object, object_key, atom_type, confidence,
            graph, contexts, first_observed, last_accessed, access_count, source_user,
            belief_holder, epistemic_distance, provenance, superseded_by, refines, triple_hash
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20
        )",
        params![
            atom.id,
            atom.subject,
            normalize(&atom.subject),
            atom.predicate,
            atom.object,
            normalize(&atom.object),
            atom.atom_type.as_str(),
            atom.confidence.value(),
            atom.graph.as_str(),
            contexts,
            fmt_time(&atom.first_observed),
            fmt_time(&atom.last_accessed),
            atom.access_count as i64,
            atom.source_user,
            atom.belief_holder,
            atom.epistemic_distance,
            atom.provenance.as_str(),
            atom.superseded_by,
            atom.refines,
            atom.triple_hash,
        ],
    )
    .map_err(|e| to_storage_err(format!("insert atom {}: {e}", atom.id)))?;
    Ok(())
}

/// Write the mutable columns of `atom` back to its row.
pub fn update_atom_state(conn: &Connection, atom: &Atom) -> MnemoResult<()> {
    conn.execute(
        "UPDATE atoms SET graph = ?2, confidence = ?3, last_accessed = ?4,
            access_count = ?5, superseded_by = ?6
         WHERE id = ?1",
        params![
            atom.id,
            atom.graph.as_str(),
            atom.confidence.value(),
            fmt_time(&atom.last_accessed),
            atom.access_count as i64,
            atom.superseded_by,
        ],
    )
    .map_err(|e| to_storage_err(format!("update atom {}: {e}", atom.id)))?;
    Ok(())
}

pub fn delete_atom(conn: &Connection, id: &str) -> MnemoResult<()> {
    conn.execute("DELETE FROM atoms WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(format!("delete atom {id}: {e}")))?;
    Ok(())
}

pub fn get_atom(conn: &Connection, id: &str) -> MnemoResult<Option<Atom>> {
    let raw = conn
        .query_row(
            &format!("SELECT {ATOM_COLUMNS} FROM atoms WHERE id = ?1"),
            params![id],
            RawAtom::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawAtom::into_atom).transpose()
}

/// Column values as read, before parsing enums and timestamps.
pub(crate) struct RawAtom {
    id: String,
    subject: String,
    predicate: String,
    object: String,
    atom_type: String,
    confidence: f64,
    graph: String,
    contexts: String,
    first_observed: String,
    last_accessed: String,
    access_count: i64,
    source_user: String,
    belief_holder: String,
    epistemic_distance: u32,
    provenance: String,
    superseded_by: Option<String>,
    refines: Option<String>,
    triple_hash: String,
}

impl RawAtom {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            subject: row.get(1)?,
            predicate: row.get(2)?,
            object: row.get(3)?,
            atom_type: row.get(4)?,
            confidence: row.get(5)?,
            graph: row.get(6)?,
            contexts: row.get(7)?,
            first_observed: row.get(8)?,
            last_accessed: row.get(9)?,
            access_count: row.get(10)?,
            source_user: row.get(11)?,
            belief_holder: row.get(12)?,
            epistemic_distance: row.get(13)?,
            provenance: row.get(14)?,
            superseded_by: row.get(15)?,
            refines: row.get(16)?,
            triple_hash: row.get(17)?,
        })
    }

    pub(crate) fn into_atom(self) -> MnemoResult<Atom> {
        Ok(Atom {
            atom_type: self.atom_type.parse().map_err(to_storage_err)?,
            graph: self.graph.parse().map_err(to_storage_err)?,
            contexts: serde_json::from_str(&self.contexts)
                .map_err(|e| to_storage_err(e.to_string()))?,
            first_observed: parse_time(&self.first_observed)?,
            last_accessed: parse_time(&self.last_accessed)?,
            provenance: Provenance::parse(&self.provenance)
                .ok_or_else(|| to_storage_err(format!("bad provenance '{}'", self.provenance)))?,
            confidence: Confidence::new(self.confidence),
            access_count: self.access_count.max(0) as u64,
            id: self.id,
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
            source_user: self.source_user,
            belief_holder: self.belief_holder,
            epistemic_distance: self.epistemic_distance,
            superseded_by: self.superseded_by,
            refines: self.refines,
            triple_hash: self.triple_hash,
        })
    }
}
