mod oracle_error;
mod storage_error;
mod validation_error;

pub use oracle_error::OracleError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;

/// Top-level error for every Mnemo operation.
#[derive(Debug, thiserror::Error)]
pub enum MnemoError {
    #[error("atom not found: {id}")]
    AtomNotFound { id: String },

    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("similarity oracle error: {0}")]
    OracleError(#[from] OracleError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("degraded mode: {component} using {fallback}")]
    DegradedMode { component: String, fallback: String },

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

pub type MnemoResult<T> = Result<T, MnemoError>;
