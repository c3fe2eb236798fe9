use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;

use crate::engine::MemoryEngine;

struct Timer {
    generation: u64,
    handle: AbortHandle,
}

/// Fires one decay pass for a user after a period without activity.
///
/// Every call to [`on_activity`](Self::on_activity) restarts that user's
/// timer. When a timer runs out the pass goes through the engine's
/// debouncer, so a sweep that just covered the user suppresses it.
pub struct IdleHeartbeat {
    engine: Arc<MemoryEngine>,
    idle: Duration,
    timers: Arc<DashMap<String, Timer>>,
    generation: AtomicU64,
    fired: Arc<AtomicUsize>,
}

impl IdleHeartbeat {
    /// Heartbeat using the engine's `triggers.idle_minutes`.
    pub fn new(engine: Arc<MemoryEngine>) -> Self {
        let idle = Duration::from_secs(engine.config().triggers.idle_minutes.saturating_mul(60));
        Self::with_idle(engine, idle)
    }

    pub fn with_idle(engine: Arc<MemoryEngine>, idle: Duration) -> Self {
        Self {
            engine,
            idle,
            timers: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
            fired: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Record activity for `user_id`, restarting its idle timer.
    /// Must be called from inside a tokio runtime.
    pub fn on_activity(&self, user_id: &str) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        // Holding the entry keeps the new task from clearing its slot before
        // the slot is written.
        let slot = self.timers.entry(user_id.to_string());

        let engine = Arc::clone(&self.engine);
        let timers = Arc::clone(&self.timers);
        let fired = Arc::clone(&self.fired);
        let idle = self.idle;
        let user = user_id.to_string();
        let task = tokio::spawn(async move {
            tokio::time::sleep(idle).await;
            timers.remove_if(&user, |_, timer| timer.generation == generation);
            match engine.trigger_decay(&user).await {
                Ok(Some(_)) => {
                    fired.fetch_add(1, Ordering::Relaxed);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    event = "idle_decay_failed",
                    user_id = %user,
                    error = %e,
                    "idle decay pass failed"
                ),
            }
        });

        let timer = Timer {
            generation,
            handle: task.abort_handle(),
        };
        let previous = match slot {
            Entry::Occupied(mut existing) => Some(existing.insert(timer)),
            Entry::Vacant(vacant) => {
                vacant.insert(timer);
                None
            }
        };
        if let Some(previous) = previous {
            previous.handle.abort();
        }
    }

    /// Users with a running idle timer.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Idle passes that actually ran.
    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::Relaxed)
    }

    /// Cancel every running timer.
    pub fn shutdown(&self) {
        self.timers.retain(|_, timer| {
            timer.handle.abort();
            false
        });
    }
}

impl Drop for IdleHeartbeat {
    fn drop(&mut self) {
        self.shutdown();
    }
}
