use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mnemo_core::atom::normalize;
use tokio::time::Instant;

/// Drops repeat fires for the same user inside `window`. Users are compared
/// normalized, like subjects everywhere else.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: DashMap<String, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// True, and records the fire, when `user_id` has not fired inside the window.
    pub fn should_fire(&self, user_id: &str) -> bool {
        let now = Instant::now();
        match self.last.entry(normalize(user_id)) {
            Entry::Occupied(mut last) => {
                if now.duration_since(*last.get()) < self.window {
                    return false;
                }
                last.insert(now);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            }
        }
    }

    /// Forget a user's last fire.
    pub fn reset(&self, user_id: &str) {
        self.last.remove(&normalize(user_id));
    }

    /// Drop users whose window has closed. Returns how many were dropped.
    pub fn prune(&self) -> usize {
        let before = self.last.len();
        let now = Instant::now();
        self.last
            .retain(|_, last| now.duration_since(*last) < self.window);
        before.saturating_sub(self.last.len())
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
