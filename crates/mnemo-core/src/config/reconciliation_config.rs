use serde::{Deserialize, Serialize};

use super::defaults;

/// Reconciliation policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Initial confidence at which a candidate is admitted straight to Substantiated.
    pub auto_substantiate_confidence: f64,
    /// Stability differences at or below this are ties.
    pub stability_tie_epsilon: f64,
    /// Effective confidence below this flags the candidate for review.
    pub review_confidence_floor: f64,
    /// Fraction of confidence lost per hop of secondhand reporting.
    pub epistemic_discount: f64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            auto_substantiate_confidence: defaults::DEFAULT_AUTO_SUBSTANTIATE_CONFIDENCE,
            stability_tie_epsilon: defaults::DEFAULT_STABILITY_TIE_EPSILON,
            review_confidence_floor: defaults::DEFAULT_REVIEW_CONFIDENCE_FLOOR,
            epistemic_discount: defaults::DEFAULT_EPISTEMIC_DISCOUNT,
        }
    }
}
