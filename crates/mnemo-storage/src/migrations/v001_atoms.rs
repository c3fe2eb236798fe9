//! v001: atoms table, lookup indexes, live-triple uniqueness, Historical guard triggers.

use rusqlite::Connection;

use mnemo_core::errors::MnemoResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemoResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS atoms (
            id                  TEXT PRIMARY KEY,
            subject             TEXT NOT NULL,
            subject_key         TEXT NOT NULL,
            predicate           TEXT NOT NULL,
            object              TEXT NOT NULL,
            object_key          TEXT NOT NULL,
            atom_type           TEXT NOT NULL,
            confidence          REAL NOT NULL,
            graph               TEXT NOT NULL
                CHECK (graph IN ('unsubstantiated', 'substantiated', 'historical')),
            contexts            TEXT NOT NULL DEFAULT '[]',
            first_observed      TEXT NOT NULL,
            last_accessed       TEXT NOT NULL,
            access_count        INTEGER NOT NULL DEFAULT 0,
            source_user         TEXT NOT NULL,
            belief_holder       TEXT NOT NULL,
            epistemic_distance  INTEGER NOT NULL DEFAULT 0,
            provenance          TEXT NOT NULL DEFAULT 'user_stated',
            superseded_by       TEXT,
            refines             TEXT,
            triple_hash         TEXT NOT NULL,
            CHECK (graph != 'historical' OR superseded_by IS NOT NULL)
        );

        CREATE INDEX IF NOT EXISTS idx_atoms_subject ON atoms(subject_key);
        CREATE INDEX IF NOT EXISTS idx_atoms_graph ON atoms(graph);
        CREATE INDEX IF NOT EXISTS idx_atoms_triple ON atoms(triple_hash);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_atoms_live_triple
            ON atoms(triple_hash) WHERE graph != 'historical';

        CREATE TRIGGER IF NOT EXISTS atoms_historical_no_update
        BEFORE UPDATE ON atoms
        WHEN OLD.graph = 'historical'
        BEGIN
            SELECT RAISE(ABORT, 'historical atom is immutable');
        END;

        CREATE TRIGGER IF NOT EXISTS atoms_historical_no_delete
        BEFORE DELETE ON atoms
        WHEN OLD.graph = 'historical'
        BEGIN
            SELECT RAISE(ABORT, 'historical atom is immutable');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
