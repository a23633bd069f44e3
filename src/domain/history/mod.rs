//! History domain: trailing price series for one asset.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single `(timestamp, price)` sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Trailing price series for one asset, in the order the API returned it.
///
/// No re-sorting or de-duplication happens here: out-of-order samples are
/// passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub asset: AssetId,
    pub days: u32,
    points: Vec<HistoryPoint>,
}

impl HistorySeries {
    pub fn new(asset: AssetId, days: u32, points: Vec<HistoryPoint>) -> Self {
        Self { asset, days, points }
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
