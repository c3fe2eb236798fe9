/// Similarity oracle failures. Detection turns these into a logged degradation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    #[error("similarity oracle unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("similarity oracle timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("similarity oracle returned invalid score {score}")]
    InvalidScore { score: f64 },
}
