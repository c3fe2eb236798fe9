use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use mnemo_core::models::AggregateSummary;
use mnemo_core::{MnemoError, MnemoResult};

use super::CancelFlag;
use crate::engine::MemoryEngine;

/// Periodic sweep over every user.
///
/// The first sweep runs one interval after start. A sweep still running
/// when the next tick comes due delays it; missed ticks are skipped.
pub struct IntervalSweep {
    cancel: CancelFlag,
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
    runs: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<AggregateSummary>>>,
}

impl IntervalSweep {
    /// Start sweeping every `triggers.sweep_interval_secs`.
    pub fn start(engine: Arc<MemoryEngine>) -> Self {
        let every = Duration::from_secs(engine.config().triggers.sweep_interval_secs);
        Self::start_every(engine, every)
    }

    pub fn start_every(engine: Arc<MemoryEngine>, every: Duration) -> Self {
        let cancel = CancelFlag::new();
        let (stop, mut stopped) = watch::channel(false);
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));

        let handle = {
            let cancel = cancel.clone();
            let runs = Arc::clone(&runs);
            let last = Arc::clone(&last);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(every.max(Duration::from_millis(1)));
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker.tick().await;
                loop {
                    tokio::select! {
                        _ = stopped.changed() => break,
                        _ = ticker.tick() => {
                            if cancel.is_cancelled() {
                                break;
                            }
                            match engine.sweep(&cancel, true).await {
                                Ok(summary) => {
                                    runs.fetch_add(1, Ordering::Relaxed);
                                    *last.lock().unwrap_or_else(|e| e.into_inner()) = Some(summary);
                                }
                                Err(e) => tracing::warn!(
                                    event = "sweep_failed",
                                    error = %e,
                                    "interval sweep failed"
                                ),
                            }
                        }
                    }
                }
                tracing::debug!(event = "sweep_stopped", "interval sweep stopped");
            })
        };

        Self {
            cancel,
            stop,
            handle,
            runs,
            last,
        }
    }

    /// Completed sweeps.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::Relaxed)
    }

    pub fn last_summary(&self) -> Option<AggregateSummary> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Ask the loop to stop. A sweep in progress finishes its running users
    /// and starts no new ones.
    pub fn stop(&self) {
        self.cancel.cancel();
        let _ = self.stop.send(true);
    }

    /// Wait for the loop to exit.
    pub async fn join(self) -> MnemoResult<()> {
        self.handle
            .await
            .map_err(|e| MnemoError::TaskFailed(e.to_string()))
    }
}
