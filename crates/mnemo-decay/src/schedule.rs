use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// When an atom's stability reaches one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCrossing {
    pub threshold: f64,
    /// Hours after `last_accessed`. `None` when the atom never decays.
    pub hours_after_access: Option<f64>,
    pub at: Option<DateTime<Utc>>,
}

/// Threshold crossings for one atom, computed from its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecaySchedule {
    pub atom_id: String,
    /// Strength `S` in hours; `None` for non-decaying types.
    pub strength_hours: Option<f64>,
    pub crossings: Vec<ThresholdCrossing>,
}

impl DecaySchedule {
    pub fn never_decays(&self) -> bool {
        self.strength_hours.is_none()
    }

    /// Crossing for `threshold`, if it was requested.
    pub fn crossing(&self, threshold: f64) -> Option<&ThresholdCrossing> {
        self.crossings
            .iter()
            .find(|c| (c.threshold - threshold).abs() < f64::EPSILON)
    }
}

/// Offset `start` by fractional hours. Saturates instead of overflowing.
pub(crate) fn add_hours(start: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() {
        return None;
    }
    let millis = (hours * 3_600_000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64).and_then(|d| start.checked_add_signed(d))
}
