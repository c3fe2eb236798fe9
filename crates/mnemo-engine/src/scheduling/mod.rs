//! Batch decay triggers.
//!
//! Two triggers start decay passes: an idle heartbeat per user and a
//! periodic sweep over every user. Both go through the engine's debouncer,
//! so a user that just had a pass is skipped rather than processed twice.

mod debounce;
mod idle;
mod sweep;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use debounce::Debouncer;
pub use idle::IdleHeartbeat;
pub use sweep::IntervalSweep;

/// Cooperative cancellation for sweeps. Checked between users, never mid-pass.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
