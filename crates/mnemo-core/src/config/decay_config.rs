use serde::{Deserialize, Serialize};

use super::defaults;

/// Decay and reconsolidation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Unsubstantiated atoms below this stability are dissolved.
    pub dissolution_threshold: f64,
    /// Confidence multiplier applied on retrieval.
    pub reconsolidation_boost: f64,
    /// Smaller multiplier applied by batch passes to weak substantiated atoms.
    pub automatic_boost: f64,
    /// Substantiated atoms below this stability get the automatic boost.
    pub weak_memory_threshold: f64,
    /// Stability below this counts as at risk in reports.
    pub at_risk_threshold: f64,
    /// Hours of memory strength per unit of `decay_rate × confidence`.
    pub strength_scale_hours: f64,
    /// Stability levels reported by the decay schedule.
    pub schedule_thresholds: Vec<f64>,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            dissolution_threshold: defaults::DEFAULT_DISSOLUTION_THRESHOLD,
            reconsolidation_boost: defaults::DEFAULT_RECONSOLIDATION_BOOST,
            automatic_boost: defaults::DEFAULT_AUTOMATIC_BOOST,
            weak_memory_threshold: defaults::DEFAULT_WEAK_MEMORY_THRESHOLD,
            at_risk_threshold: defaults::DEFAULT_AT_RISK_THRESHOLD,
            strength_scale_hours: defaults::DEFAULT_STRENGTH_SCALE_HOURS,
            schedule_thresholds: defaults::DEFAULT_SCHEDULE_THRESHOLDS.to_vec(),
        }
    }
}
