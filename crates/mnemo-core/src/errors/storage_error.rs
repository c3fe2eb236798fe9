/// Persistence-layer errors. A failed batch leaves the store unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("historical atom {id} is immutable")]
    HistoricalImmutable { id: String },

    #[error("illegal graph transition for {id}: {from} -> {to}")]
    IllegalTransition { id: String, from: String, to: String },

    #[error("atom {id} moved to historical without a supersession pointer")]
    MissingSupersessionPointer { id: String },

    #[error("atom {id} already exists")]
    DuplicateId { id: String },

    #[error("a live atom with the same triple already exists: {existing_id}")]
    DuplicateLiveTriple { existing_id: String },

    #[error("substantiated atom {id} cannot be deleted, only superseded")]
    SubstantiatedDeletion { id: String },

    #[error("store lock poisoned: {details}")]
    LockPoisoned { details: String },
}
