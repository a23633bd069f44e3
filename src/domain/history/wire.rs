//! Wire types for `GET /coins/{id}/market_chart`.

use serde::{Deserialize, Serialize};

/// Market chart body. Only `prices` is read; `market_caps` and
/// `total_volumes` are ignored.
///
/// Each sample is `[timestamp_ms, price]`. Timestamps are integral in
/// practice but arrive as JSON numbers, so both fields are read as `f64`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}
