//! Fixed-rate scheduler.
//!
//! Runs one cycle immediately on start, then one per interval measured
//! tick-to-tick. Each cycle runs in its own task, so a slow cycle does not
//! delay the next tick and cycles may overlap unless `OverlapPolicy::Skip`
//! is set.
//!
//! Teardown stops future ticks only. Cycles already in flight keep running;
//! they hold a weak reference to the state holder, so a result that lands
//! after the scheduler is gone is dropped.

use super::fetcher::{fetch_cycle, FetchRequest, PriceSource};
use super::state::{RefreshState, StateHolder};
use crate::error::{FetchCycleFailed, FALLBACK_CYCLE_MESSAGE};

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest tick period the scheduler will run at.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// What to do when a tick fires while an earlier cycle is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start another cycle regardless.
    #[default]
    Allow,
    /// Skip the tick; the next one is still on the original schedule.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub overlap: OverlapPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: crate::network::DEFAULT_POLL_INTERVAL,
            overlap: OverlapPolicy::default(),
        }
    }
}

/// Owns the state holder and the timer task driving it.
pub struct Scheduler {
    holder: Arc<StateHolder>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<()>>,
    in_flight: Arc<AtomicUsize>,
}

impl Scheduler {
    /// Spawn the timer task. Must be called inside a tokio runtime.
    ///
    /// An interval below `MIN_INTERVAL` is raised to it.
    pub fn start<S: PriceSource>(
        source: Arc<S>,
        request: FetchRequest,
        mut config: SchedulerConfig,
    ) -> Self {
        if config.interval < MIN_INTERVAL {
            tracing::warn!(
                requested_ms = config.interval.as_millis() as u64,
                "poll interval too short, using {:?}",
                MIN_INTERVAL
            );
            config.interval = MIN_INTERVAL;
        }

        let holder = Arc::new(StateHolder::new());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::info!(
            interval_secs = config.interval.as_secs_f64(),
            overlap = ?config.overlap,
            "refresh scheduler started"
        );

        let handle = tokio::spawn(run_timer(
            source,
            Arc::downgrade(&holder),
            Arc::new(request),
            config,
            Arc::clone(&in_flight),
            shutdown_rx,
        ));

        Self {
            holder,
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(handle),
            in_flight,
        }
    }

    pub fn holder(&self) -> &StateHolder {
        &self.holder
    }

    pub fn current(&self) -> RefreshState {
        self.holder.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.holder.subscribe()
    }

    /// Cycles started and not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop future ticks and drop the state holder.
    ///
    /// Waits (bounded) for the timer task to exit. In-flight cycles are left
    /// to finish on their own; their results go nowhere.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }

        tracing::info!(in_flight = self.in_flight(), "refresh scheduler stopped");
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background tasks ────────────────────────────────────────────────────────

async fn run_timer<S: PriceSource>(
    source: Arc<S>,
    holder: Weak<StateHolder>,
    request: Arc<FetchRequest>,
    config: SchedulerConfig,
    in_flight: Arc<AtomicUsize>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    // First tick completes immediately.
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            // Fires on shutdown() and when the Scheduler is dropped.
            _ = &mut shutdown_rx => break,

            _ = ticker.tick() => {
                if holder.strong_count() == 0 {
                    break;
                }
                if config.overlap == OverlapPolicy::Skip && in_flight.load(Ordering::SeqCst) > 0 {
                    tracing::debug!("previous cycle still in flight, skipping tick");
                    continue;
                }
                in_flight.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(run_cycle(
                    Arc::clone(&source),
                    holder.clone(),
                    Arc::clone(&request),
                    InFlightGuard(Arc::clone(&in_flight)),
                ));
            }
        }
    }

    tracing::debug!("refresh timer exited");
}

/// Decrements the in-flight count when the cycle task ends, however it ends.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

async fn run_cycle<S: PriceSource>(
    source: Arc<S>,
    holder: Weak<StateHolder>,
    request: Arc<FetchRequest>,
    guard: InFlightGuard,
) {
    // Not held across the fetch, so teardown can drop the holder mid-cycle.
    let cycle = match holder.upgrade() {
        Some(h) => h.begin_cycle(),
        None => return,
    };

    // A panicking source still has to leave `Loading`.
    let result = AssertUnwindSafe(fetch_cycle(source.as_ref(), &request))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            tracing::error!(cycle, "fetch cycle panicked");
            Err(FetchCycleFailed::new(FALLBACK_CYCLE_MESSAGE))
        });
    drop(guard);

    match holder.upgrade() {
        Some(h) => h.resolve_cycle(cycle, result),
        None => tracing::debug!(cycle, "scheduler gone, discarding cycle result"),
    }
}
