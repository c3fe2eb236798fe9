//! Per-subject write serialization.

use std::sync::Arc;

use dashmap::DashMap;
use mnemo_core::atom::normalize;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per subject. Admission, retrieval with reconsolidation,
/// and decay passes for a subject all hold its guard while they read and
/// write, so a snapshot cannot go stale under a concurrent supersession.
#[derive(Debug, Default)]
pub struct SubjectLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SubjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the subject's guard. Subjects are compared normalized.
    pub async fn acquire(&self, subject: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(normalize(subject))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Whether someone currently holds the subject's guard.
    pub fn is_locked(&self, subject: &str) -> bool {
        self.locks
            .get(&normalize(subject))
            .is_some_and(|lock| lock.try_lock().is_err())
    }

    /// Drop locks nobody holds or waits on. Returns how many were dropped.
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before.saturating_sub(self.locks.len())
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_subject_is_serialized() {
        let locks = SubjectLocks::new();
        let guard = locks.acquire("U1").await;
        assert!(locks.is_locked("u1"));
        assert!(!locks.is_locked("u2"));
        drop(guard);
        assert!(!locks.is_locked("u1"));
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn prune_keeps_held_locks() {
        let locks = SubjectLocks::new();
        let held = locks.acquire("u1").await;
        drop(locks.acquire("u2").await);
        assert_eq!(locks.len(), 2);

        assert_eq!(locks.prune(), 1);
        assert!(locks.is_locked("u1"));
        drop(held);
        assert_eq!(locks.prune(), 1);
        assert!(locks.is_empty());
    }
}
