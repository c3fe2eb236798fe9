//! SqliteAtomStore: owns the connection, runs migrations, implements IAtomStore.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::Connection;

use mnemo_core::config::StorageConfig;
use mnemo_core::errors::MnemoResult;
use mnemo_core::models::{AtomMutation, AuditActor, AuditEntry, TripleQuery};
use mnemo_core::traits::IAtomStore;
use mnemo_core::{Atom, Graph};

use crate::audit::AuditLogger;
use crate::migrations;
use crate::pool::WriteConnection;
use crate::queries::{atom_crud, atom_query, audit_ops};
use crate::rules;
use crate::to_storage_err;

/// SQLite-backed atom store.
pub struct SqliteAtomStore {
    conn: WriteConnection,
}

impl SqliteAtomStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> MnemoResult<Self> {
        let store = Self {
            conn: WriteConnection::open(path, config)?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> MnemoResult<Self> {
        let store = Self {
            conn: WriteConnection::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> MnemoResult<()> {
        self.conn.with_conn(migrations::run_migrations)
    }

    pub fn schema_version(&self) -> MnemoResult<u32> {
        self.conn.with_conn(migrations::current_version)
    }

    fn apply_one(conn: &Connection, mutation: &AtomMutation, actor: AuditActor) -> MnemoResult<()> {
        let id = mutation.atom_id();
        let current = atom_crud::get_atom(conn, id)?;
        let twin = match mutation {
            AtomMutation::Insert(atom) => atom_query::find_by_triple(
                conn,
                &TripleQuery::subject(&atom.subject)
                    .predicate(&atom.predicate)
                    .object(&atom.object),
            )?
            .into_iter()
            .find(|a| a.is_live() && a.id != atom.id && a.triple_hash == atom.triple_hash)
            .map(|a| a.id),
            _ => None,
        };
        rules::check_mutation(mutation, current.as_ref(), twin.as_deref())?;

        let (operation, details) = rules::audit_record(mutation, current.as_ref());
        match (mutation, rules::mutated(mutation, current.as_ref())) {
            (AtomMutation::Insert(atom), _) => atom_crud::insert_atom(conn, atom)?,
            (_, Some(next)) => atom_crud::update_atom_state(conn, &next)?,
            (_, None) => atom_crud::delete_atom(conn, id)?,
        }
        AuditLogger::log(conn, id, operation, actor, details)
    }
}

impl IAtomStore for SqliteAtomStore {
    fn get(&self, id: &str) -> MnemoResult<Option<Atom>> {
        self.conn.with_conn(|conn| atom_crud::get_atom(conn, id))
    }

    fn find_by_triple(&self, query: &TripleQuery) -> MnemoResult<Vec<Atom>> {
        self.conn
            .with_conn(|conn| atom_query::find_by_triple(conn, query))
    }

    fn find_by_subject(&self, subject: &str, graph: Option<Graph>) -> MnemoResult<Vec<Atom>> {
        self.conn
            .with_conn(|conn| atom_query::find_by_subject(conn, subject, graph))
    }

    fn subjects(&self) -> MnemoResult<Vec<String>> {
        self.conn.with_conn(atom_query::subjects)
    }

    fn count_by_graph(&self, subject: Option<&str>) -> MnemoResult<BTreeMap<Graph, usize>> {
        self.conn
            .with_conn(|conn| atom_query::count_by_graph(conn, subject))
    }

    fn audit_entries(&self, atom_id: Option<&str>) -> MnemoResult<Vec<AuditEntry>> {
        self.conn
            .with_conn(|conn| audit_ops::query_audit(conn, atom_id))
    }

    /// One transaction per batch: atom rows and audit rows commit together.
    fn apply(&self, mutations: &[AtomMutation], actor: AuditActor) -> MnemoResult<()> {
        self.conn.with_conn(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("apply begin: {e}")))?;

            for mutation in mutations {
                if let Err(e) = Self::apply_one(&tx, mutation, actor) {
                    let _ = tx.rollback();
                    tracing::warn!(atom_id = %mutation.atom_id(), error = %e, "mutation batch rolled back");
                    return Err(e);
                }
            }

            tx.commit()
                .map_err(|e| to_storage_err(format!("apply commit: {e}")))
        })
    }
}
