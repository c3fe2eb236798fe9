use std::sync::Arc;

use crate::errors::MnemoResult;

/// External text-similarity service used by semantic conflict detection.
pub trait ISimilarityOracle: Send + Sync {
    /// Similarity of two object strings in [0.0, 1.0].
    fn similarity(&self, a: &str, b: &str) -> MnemoResult<f64>;

    /// Human-readable oracle name.
    fn name(&self) -> &str;
}

impl<T: ISimilarityOracle + ?Sized> ISimilarityOracle for Arc<T> {
    fn similarity(&self, a: &str, b: &str) -> MnemoResult<f64> {
        (**self).similarity(a, b)
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
