//! Subject, triple, and graph queries.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};

use mnemo_core::atom::normalize;
use mnemo_core::errors::MnemoResult;
use mnemo_core::models::TripleQuery;
use mnemo_core::{Atom, Graph};

use super::atom_crud::{RawAtom, ATOM_COLUMNS};
use crate::to_storage_err;

pub fn find_by_triple(conn: &Connection, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {ATOM_COLUMNS} FROM atoms
             WHERE subject_key = ?1
               AND (?2 IS NULL OR predicate = ?2)
               AND (?3 IS NULL OR object_key = ?3)
               AND (?4 IS NULL OR graph = ?4)
             ORDER BY first_observed, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(
            params![
                normalize(&query.subject),
                query.predicate.as_deref().map(normalize),
                query.object.as_deref().map(normalize),
                query.graph.map(|g| g.as_str()),
            ],
            RawAtom::from_row,
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(rows)
}

pub fn find_by_subject(
    conn: &Connection,
    subject: &str,
    graph: Option<Graph>,
) -> MnemoResult<Vec<Atom>> {
    let query = TripleQuery {
        subject: subject.to_string(),
        graph,
        ..TripleQuery::default()
    };
    find_by_triple(conn, &query)
}

pub fn subjects(conn: &Connection) -> MnemoResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT MIN(subject) FROM atoms GROUP BY subject_key ORDER BY subject_key")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_by_graph(
    conn: &Connection,
    subject: Option<&str>,
) -> MnemoResult<BTreeMap<Graph, usize>> {
    let mut counts: BTreeMap<Graph, usize> = Graph::ALL.iter().map(|g| (*g, 0)).collect();
    let mut stmt = conn
        .prepare_cached(
            "SELECT graph, COUNT(*) FROM atoms
             WHERE (?1 IS NULL OR subject_key = ?1)
             GROUP BY graph",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![subject.map(normalize)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    for row in rows {
        let (graph, n) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let graph: Graph = graph.parse().map_err(to_storage_err)?;
        counts.insert(graph, n.max(0) as usize);
    }
    Ok(counts)
}

fn collect<I>(rows: I) -> MnemoResult<Vec<Atom>>
where
    I: Iterator<Item = rusqlite::Result<RawAtom>>,
{
    rows.map(|r| {
        r.map_err(|e| to_storage_err(e.to_string()))
            .and_then(RawAtom::into_atom)
    })
    .collect()
}
