//! Similarity cache using moka.
//!
//! Keys are blake3 hashes of the normalized, ordered object pair, so
//! `(a, b)` and `(b, a)` share one entry.

use std::time::Duration;

use moka::sync::Cache;

use mnemo_core::atom::normalize;

pub struct SimilarityCache {
    cache: Cache<String, f64>,
}

impl SimilarityCache {
    pub fn new(max_entries: u64, time_to_idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(time_to_idle)
            .build();
        Self { cache }
    }

    pub fn key(a: &str, b: &str) -> String {
        let (a, b) = (normalize(a), normalize(b));
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = blake3::Hasher::new();
        hasher.update(first.as_bytes());
        hasher.update(mnemo_core::constants::TRIPLE_HASH_SEPARATOR);
        hasher.update(second.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.cache.get(&Self::key(a, b))
    }

    pub fn insert(&self, a: &str, b: &str, score: f64) {
        self.cache.insert(Self::key(a, b), score);
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_order_and_case_share_an_entry() {
        let cache = SimilarityCache::new(100, Duration::from_secs(60));
        cache.insert("Python", "rust", 0.2);
        assert_eq!(cache.get("Rust ", "python"), Some(0.2));
        assert_eq!(cache.get("python", "go"), None);
    }
}
