use serde::{Deserialize, Serialize};

/// Result of one user's batch decay pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecaySummary {
    pub user_id: String,
    pub dissolved_count: usize,
    pub reconsolidated_count: usize,
    pub duration_ms: u64,
}

/// A user whose pass failed during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFailure {
    pub user_id: String,
    pub error: String,
}

/// Result of a sweep over every known user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub users_processed: usize,
    pub total_dissolved: usize,
    pub total_reconsolidated: usize,
    pub duration_ms: u64,
    pub failures: Vec<UserFailure>,
    /// The sweep stopped before reaching every user.
    pub cancelled: bool,
}

impl AggregateSummary {
    pub fn absorb(&mut self, summary: &DecaySummary) {
        self.users_processed += 1;
        self.total_dissolved += summary.dissolved_count;
        self.total_reconsolidated += summary.reconsolidated_count;
    }
}
