use serde::{Deserialize, Serialize};

use super::defaults;

/// Observability subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// `MNEMO_LOG` overrides it at startup.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
    /// More than this many degradations of one component inside
    /// `alert_burst_window_secs` raises a warning.
    pub alert_burst_count: usize,
    pub alert_burst_window_secs: u64,
    /// A component degraded without recovery for this long is critical.
    pub alert_critical_after_hours: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            alert_burst_count: defaults::DEFAULT_ALERT_BURST_COUNT,
            alert_burst_window_secs: defaults::DEFAULT_ALERT_BURST_WINDOW_SECS,
            alert_critical_after_hours: defaults::DEFAULT_ALERT_CRITICAL_AFTER_HOURS,
        }
    }
}
