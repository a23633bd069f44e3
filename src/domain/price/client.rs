//! Prices sub-client: current prices for a set of assets.

use crate::client::TickerClient;
use crate::domain::price::PriceSnapshot;
use crate::error::TickerError;
use crate::shared::{Asset, AssetId, QuoteCurrency};

pub struct Prices<'a> {
    pub(crate) client: &'a TickerClient,
}

impl<'a> Prices<'a> {
    /// Current price of every asset in `assets`, in that order.
    pub async fn get(
        &self,
        assets: &[Asset],
        quote: &QuoteCurrency,
    ) -> Result<PriceSnapshot, TickerError> {
        let ids: Vec<AssetId> = assets.iter().map(|a| a.id.clone()).collect();
        let resp = self.client.http.get_simple_price(&ids, quote).await?;
        Ok(PriceSnapshot::try_from_wire(&resp, assets, quote)?)
    }
}
