//! Conversion from the market-chart wire type to `HistorySeries`.

use super::wire::MarketChartResponse;
use super::{HistoryPoint, HistorySeries};
use crate::error::DataError;
use crate::shared::AssetId;
use chrono::{TimeZone, Utc};

impl HistorySeries {
    /// Fails on a timestamp outside chrono's range or a price that is
    /// negative or not finite. Sample order is kept as received.
    pub fn try_from_wire(
        resp: MarketChartResponse,
        asset: AssetId,
        days: u32,
    ) -> Result<Self, DataError> {
        let points = resp
            .prices
            .into_iter()
            .map(|(t, price)| {
                let timestamp = if t.is_finite() {
                    Utc.timestamp_millis_opt(t as i64).single()
                } else {
                    None
                }
                .ok_or(DataError::InvalidTimestamp(t))?;
                if !price.is_finite() || price < 0.0 {
                    return Err(DataError::InvalidPrice {
                        asset: asset.to_string(),
                        value: price,
                    });
                }
                Ok(HistoryPoint { timestamp, price })
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(Self::new(asset, days, points))
    }
}
