//! Similarity oracle access for the semantic stage.

pub mod cache;
pub mod lexical;

use std::sync::Arc;
use std::time::Duration;

use mnemo_core::config::DetectionConfig;
use mnemo_core::errors::{MnemoError, OracleError};
use mnemo_core::traits::ISimilarityOracle;

pub use cache::SimilarityCache;
pub use lexical::LexicalSimilarity;

/// Wraps an optional oracle with a result cache and a per-call timeout.
///
/// Calls run on the blocking pool so a slow oracle never stalls the
/// executor. Scores outside [0.0, 1.0] are rejected.
pub struct OracleGate {
    oracle: Option<Arc<dyn ISimilarityOracle>>,
    cache: SimilarityCache,
    timeout: Duration,
}

impl OracleGate {
    pub fn new(oracle: Option<Arc<dyn ISimilarityOracle>>, config: &DetectionConfig) -> Self {
        Self {
            oracle,
            cache: SimilarityCache::new(
                config.similarity_cache_size,
                Duration::from_secs(config.similarity_cache_tti_secs),
            ),
            timeout: Duration::from_millis(config.oracle_timeout_ms),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.oracle.as_deref().map(|o| o.name())
    }

    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }

    pub async fn similarity(&self, a: &str, b: &str) -> Result<f64, OracleError> {
        let oracle = self.oracle.clone().ok_or_else(|| OracleError::Unavailable {
            reason: "no similarity oracle configured".to_string(),
        })?;
        if let Some(score) = self.cache.get(a, b) {
            return Ok(score);
        }

        let (left, right) = (a.to_string(), b.to_string());
        let call = tokio::task::spawn_blocking(move || oracle.similarity(&left, &right));
        let score = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => {
                return Err(OracleError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
            Ok(Err(join)) => {
                return Err(OracleError::Unavailable {
                    reason: format!("oracle task failed: {join}"),
                })
            }
            Ok(Ok(Err(MnemoError::OracleError(e)))) => return Err(e),
            Ok(Ok(Err(other))) => {
                return Err(OracleError::Unavailable {
                    reason: other.to_string(),
                })
            }
            Ok(Ok(Ok(score))) => score,
        };

        if !(0.0..=1.0).contains(&score) {
            return Err(OracleError::InvalidScore { score });
        }
        self.cache.insert(a, b, score);
        Ok(score)
    }
}
