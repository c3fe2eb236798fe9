pub mod decay_config;
pub mod defaults;
pub mod detection_config;
pub mod observability_config;
pub mod reconciliation_config;
pub mod storage_config;
pub mod trigger_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use decay_config::DecayConfig;
pub use detection_config::DetectionConfig;
pub use observability_config::ObservabilityConfig;
pub use reconciliation_config::ReconciliationConfig;
pub use storage_config::StorageConfig;
pub use trigger_config::TriggerConfig;

use crate::errors::{MnemoError, MnemoResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemoConfig {
    pub detection: DetectionConfig,
    pub reconciliation: ReconciliationConfig,
    pub decay: DecayConfig,
    pub triggers: TriggerConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl MnemoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> MnemoResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| MnemoError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: &Path) -> MnemoResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MnemoError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> MnemoResult<()> {
        let unit = |name: &str, v: f64| -> MnemoResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(MnemoError::ConfigError(format!(
                    "{name} must be within [0, 1], got {v}"
                )))
            }
        };
        let d = &self.detection;
        unit("detection.duplicate_threshold", d.duplicate_threshold)?;
        unit("detection.conflict_threshold", d.conflict_threshold)?;
        unit("detection.opposite_match_threshold", d.opposite_match_threshold)?;
        if d.conflict_threshold >= d.duplicate_threshold {
            return Err(MnemoError::ConfigError(
                "detection.conflict_threshold must be below duplicate_threshold".into(),
            ));
        }

        let r = &self.reconciliation;
        unit("reconciliation.auto_substantiate_confidence", r.auto_substantiate_confidence)?;
        unit("reconciliation.review_confidence_floor", r.review_confidence_floor)?;
        unit("reconciliation.epistemic_discount", r.epistemic_discount)?;
        if r.stability_tie_epsilon < 0.0 {
            return Err(MnemoError::ConfigError(
                "reconciliation.stability_tie_epsilon must not be negative".into(),
            ));
        }

        let dc = &self.decay;
        unit("decay.dissolution_threshold", dc.dissolution_threshold)?;
        unit("decay.weak_memory_threshold", dc.weak_memory_threshold)?;
        unit("decay.at_risk_threshold", dc.at_risk_threshold)?;
        if dc.reconsolidation_boost < 1.0 || dc.automatic_boost < 1.0 {
            return Err(MnemoError::ConfigError(
                "decay boosts must be at least 1.0".into(),
            ));
        }
        if dc.strength_scale_hours <= 0.0 {
            return Err(MnemoError::ConfigError(
                "decay.strength_scale_hours must be positive".into(),
            ));
        }
        for t in &dc.schedule_thresholds {
            if !(*t > 0.0 && *t < 1.0) {
                return Err(MnemoError::ConfigError(format!(
                    "decay.schedule_thresholds must lie in (0, 1), got {t}"
                )));
            }
        }

        if self.triggers.max_parallel_users == 0 {
            return Err(MnemoError::ConfigError(
                "triggers.max_parallel_users must be at least 1".into(),
            ));
        }
        if self.observability.alert_burst_window_secs == 0 {
            return Err(MnemoError::ConfigError(
                "observability.alert_burst_window_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
