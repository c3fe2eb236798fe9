use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Minutes without activity before a user's idle pass fires.
    pub idle_minutes: u64,
    /// Seconds between full sweeps over all users.
    pub sweep_interval_secs: u64,
    /// Repeat fires for the same user inside this window are dropped.
    pub debounce_secs: u64,
    /// Users processed concurrently by a sweep.
    pub max_parallel_users: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            idle_minutes: defaults::DEFAULT_IDLE_MINUTES,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
            debounce_secs: defaults::DEFAULT_DEBOUNCE_SECS,
            max_parallel_users: defaults::DEFAULT_MAX_PARALLEL_USERS,
        }
    }
}
