//! # mnemo-storage
//!
//! Atom store implementations. Both stores apply mutation batches atomically,
//! write an audit entry per mutation in the same unit of work, and refuse to
//! touch Historical atoms.
//!
//! - [`InMemoryAtomStore`]: one `RwLock` over the atom map and its
//!   subject, graph, and live-triple indexes.
//! - [`SqliteAtomStore`]: rusqlite with versioned migrations and a trigger
//!   guarding Historical rows.

pub mod audit;
pub mod engine;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod rules;

pub use engine::SqliteAtomStore;
pub use memory::InMemoryAtomStore;

use mnemo_core::errors::{MnemoError, StorageError};

/// Convert a backend error message into a MnemoError.
pub fn to_storage_err(msg: String) -> MnemoError {
    MnemoError::StorageError(StorageError::SqliteError { message: msg })
}
