use serde::{Deserialize, Serialize};

use super::defaults;

/// Conflict detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Same-predicate similarity at or above this is a duplicate.
    pub duplicate_threshold: f64,
    /// Exclusive-predicate similarity below this is a semantic conflict.
    pub conflict_threshold: f64,
    /// Opposite predicates with objects at least this similar conflict.
    pub opposite_match_threshold: f64,
    /// Per-call budget for the similarity oracle.
    pub oracle_timeout_ms: u64,
    /// Entries kept in the similarity cache.
    pub similarity_cache_size: u64,
    /// Idle seconds before a cached similarity is evicted.
    pub similarity_cache_tti_secs: u64,
    /// How many object-entity hops the detection snapshot follows.
    pub snapshot_hops: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: defaults::DEFAULT_DUPLICATE_THRESHOLD,
            conflict_threshold: defaults::DEFAULT_CONFLICT_THRESHOLD,
            opposite_match_threshold: defaults::DEFAULT_OPPOSITE_MATCH_THRESHOLD,
            oracle_timeout_ms: defaults::DEFAULT_ORACLE_TIMEOUT_MS,
            similarity_cache_size: defaults::DEFAULT_SIMILARITY_CACHE_SIZE,
            similarity_cache_tti_secs: defaults::DEFAULT_SIMILARITY_CACHE_TTI_SECS,
            snapshot_hops: defaults::DEFAULT_SNAPSHOT_HOPS,
        }
    }
}
