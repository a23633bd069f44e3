//! Refresh state and the holder that publishes it.

use crate::domain::MarketData;
use crate::error::FetchCycleFailed;

use futures_util::stream::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// What the surface shows. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RefreshState {
    /// A cycle is in flight. Previous data has been discarded.
    #[default]
    Loading,
    Ready(Arc<MarketData>),
    Failed(FetchCycleFailed),
}

impl RefreshState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading)
    }

    pub fn data(&self) -> Option<&MarketData> {
        match self {
            RefreshState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RefreshState::Failed(err) => Some(err.message()),
            _ => None,
        }
    }
}

/// Holds the current `RefreshState` and notifies subscribers on every
/// transition.
///
/// Subscribers observe through a `watch` channel: a slow subscriber sees the
/// latest state rather than every intermediate one.
#[derive(Debug)]
pub struct StateHolder {
    tx: watch::Sender<RefreshState>,
    cycles: AtomicU64,
}

impl Default for StateHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHolder {
    /// Starts in `Loading`.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RefreshState::Loading);
        Self {
            tx,
            cycles: AtomicU64::new(0),
        }
    }

    pub fn current(&self) -> RefreshState {
        self.tx.borrow().clone()
    }

    /// Enter `Loading`, dropping whatever the last cycle produced.
    /// Returns the cycle number, starting at 1.
    pub fn begin_cycle(&self) -> u64 {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_replace(RefreshState::Loading);
        tracing::debug!(cycle, "fetch cycle started");
        cycle
    }

    /// Leave `Loading` with the cycle's outcome.
    pub fn resolve_cycle(&self, cycle: u64, result: Result<MarketData, FetchCycleFailed>) {
        let next = match result {
            Ok(data) => RefreshState::Ready(Arc::new(data)),
            Err(err) => {
                tracing::warn!(cycle, "fetch cycle failed: {}", err);
                RefreshState::Failed(err)
            }
        };
        tracing::debug!(cycle, ready = !matches!(next, RefreshState::Failed(_)), "fetch cycle resolved");
        self.tx.send_replace(next);
    }

    /// Number of cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }

    /// Receiver that is marked changed on every transition. `changed()`
    /// returns an error once the holder is dropped.
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.tx.subscribe()
    }

    /// Stream of states, one item per observed change. Ends when the holder
    /// is dropped.
    pub fn changes(&self) -> Pin<Box<dyn Stream<Item = RefreshState> + Send>> {
        let rx = self.tx.subscribe();
        Box::pin(futures_util::stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let state = rx.borrow_and_update().clone();
            Some((state, rx))
        }))
    }
}
