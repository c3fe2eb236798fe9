use serde::{Deserialize, Serialize};

use mnemo_core::models::DetectionReport;
use mnemo_reconciliation::{Decision, ReconciliationPlan};

/// What admitting one candidate did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionOutcome {
    pub report: DetectionReport,
    /// The applied plan. Its mutations are already committed.
    pub plan: ReconciliationPlan,
}

impl AdmissionOutcome {
    pub fn decision(&self) -> &Decision {
        &self.plan.decision
    }

    pub fn is_degraded(&self) -> bool {
        self.report.is_degraded()
    }

    pub fn needs_review(&self) -> bool {
        self.plan.needs_review
    }
}
