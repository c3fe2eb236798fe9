//! Alerts over the degradation log: a burst of events for one component is a
//! warning, a component degraded without recovery for too long is critical.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use mnemo_core::config::ObservabilityConfig;

use super::tracker::DegradationTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationAlert {
    pub level: AlertLevel,
    pub component: String,
    pub message: String,
}

/// Thresholds for [`AlertPolicy::evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    pub burst_count: usize,
    pub burst_window: Duration,
    pub critical_after: Duration,
}

impl AlertPolicy {
    pub fn from_config(config: &ObservabilityConfig) -> Self {
        let secs = |s: u64| Duration::seconds(i64::try_from(s).unwrap_or(i64::MAX / 1_000));
        Self {
            burst_count: config.alert_burst_count,
            burst_window: secs(config.alert_burst_window_secs),
            critical_after: secs(config.alert_critical_after_hours.saturating_mul(3_600)),
        }
    }

    /// At most one alert per component, most severe first, components in
    /// name order.
    pub fn evaluate(&self, tracker: &DegradationTracker, now: DateTime<Utc>) -> Vec<DegradationAlert> {
        let mut alerts = Vec::new();
        for component in tracker.components() {
            if let Some(since) = tracker.degraded_since(&component) {
                let hours = (now - since).num_hours();
                if now - since > self.critical_after {
                    alerts.push(DegradationAlert {
                        level: AlertLevel::Critical,
                        message: format!("{component} degraded for {hours} hours without recovery"),
                        component,
                    });
                    continue;
                }
            }
            let recent = tracker.count_within(&component, self.burst_window, now);
            if recent > self.burst_count {
                alerts.push(DegradationAlert {
                    level: AlertLevel::Warning,
                    message: format!(
                        "{component} degraded {recent} times in the last {} minutes",
                        self.burst_window.num_minutes()
                    ),
                    component,
                });
            }
        }
        alerts
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::from_config(&ObservabilityConfig::default())
    }
}

/// Alerts under the default policy as of now.
pub fn evaluate_alerts(tracker: &DegradationTracker) -> Vec<DegradationAlert> {
    AlertPolicy::default().evaluate(tracker, Utc::now())
}
