//! Refresh loop: one fetch cycle every poll interval, results published
//! through a state holder.
//!
//! - `fetcher`: runs both requests of a cycle concurrently and folds them
//!   into one result or one failure
//! - `state`: `RefreshState` plus the `StateHolder` that publishes it
//! - `scheduler`: fixed-rate timer task that triggers cycles until torn down

pub mod fetcher;
pub mod scheduler;
pub mod state;

pub use fetcher::{fetch_cycle, FetchRequest, PriceSource};
pub use scheduler::{OverlapPolicy, Scheduler, SchedulerConfig};
pub use state::{RefreshState, StateHolder};
