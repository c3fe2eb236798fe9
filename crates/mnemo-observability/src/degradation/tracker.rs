//! Every degradation event with its recovery status. One tracker is shared
//! by the detector and the engine that owns it.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use mnemo_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

/// A recorded event and whether its component has since recovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl TrackedDegradation {
    fn is_active_for(&self, component: &str) -> bool {
        self.recovery_status == RecoveryStatus::Active && self.event.component == component
    }
}

/// Append-only log of degradations, in record order.
#[derive(Debug, Default)]
pub struct DegradationTracker {
    log: Mutex<Vec<TrackedDegradation>>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<TrackedDegradation>> {
        // Entries are pushed whole; a poisoned lock still holds a valid log.
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record `event` as active and emit `degradation_triggered`.
    pub fn record(&self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.log().push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Close every active degradation of `component`. Returns how many closed.
    pub fn mark_recovered(&self, component: &str) -> usize {
        self.mark_recovered_at(component, Utc::now())
    }

    pub fn mark_recovered_at(&self, component: &str, now: DateTime<Utc>) -> usize {
        let mut log = self.log();
        let mut closed = 0;
        for tracked in log.iter_mut().filter(|t| t.is_active_for(component)) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
            closed += 1;
        }
        drop(log);
        if closed > 0 {
            tracing::info!(event = "degradation_recovered", component = %component, closed, "component recovered");
        }
        closed
    }

    pub fn events(&self) -> Vec<TrackedDegradation> {
        self.log().clone()
    }

    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        self.log()
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .cloned()
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.log().iter().any(|t| t.is_active_for(component))
    }

    /// Components that have ever degraded, sorted.
    pub fn components(&self) -> BTreeSet<String> {
        self.log()
            .iter()
            .map(|t| t.event.component.clone())
            .collect()
    }

    /// Events for `component` inside `(now - window, now]`.
    pub fn count_within(&self, component: &str, window: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = now - window;
        self.log()
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Timestamp of the oldest still-active degradation of `component`.
    pub fn degraded_since(&self, component: &str) -> Option<DateTime<Utc>> {
        self.log()
            .iter()
            .filter(|t| t.is_active_for(component))
            .map(|t| t.event.timestamp)
            .min()
    }
}
