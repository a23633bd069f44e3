//! History sub-client: trailing market chart for one asset.

use crate::client::TickerClient;
use crate::domain::history::HistorySeries;
use crate::error::TickerError;
use crate::shared::{AssetId, QuoteCurrency};

pub struct History<'a> {
    pub(crate) client: &'a TickerClient,
}

impl<'a> History<'a> {
    /// Price samples for `asset` over the last `days` days.
    pub async fn get(
        &self,
        asset: &AssetId,
        quote: &QuoteCurrency,
        days: u32,
    ) -> Result<HistorySeries, TickerError> {
        let resp = self.client.http.get_market_chart(asset, quote, days).await?;
        Ok(HistorySeries::try_from_wire(resp, asset.clone(), days)?)
    }
}
