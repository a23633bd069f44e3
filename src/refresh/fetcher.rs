//! One fetch cycle: current prices and trailing history, fetched together.

use crate::domain::history::HistorySeries;
use crate::domain::price::PriceSnapshot;
use crate::domain::MarketData;
use crate::error::{FetchCycleFailed, TickerError};
use crate::shared::{Asset, AssetId, QuoteCurrency};

use std::future::Future;

/// What a cycle asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub assets: Vec<Asset>,
    pub history_asset: AssetId,
    pub quote: QuoteCurrency,
    pub window_days: u32,
}

impl FetchRequest {
    pub fn asset_ids(&self) -> Vec<AssetId> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }
}

/// Where a cycle gets its data from. `TickerClient` is the HTTP-backed
/// implementation.
pub trait PriceSource: Send + Sync + 'static {
    fn current_prices(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<PriceSnapshot, TickerError>> + Send;

    fn price_history(
        &self,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<HistorySeries, TickerError>> + Send;
}

/// Run both requests concurrently and wait for both to settle.
///
/// A failure on one side does not cancel the other. If either side failed
/// the whole cycle fails; when both failed the price error is reported.
pub async fn fetch_cycle<S: PriceSource>(
    source: &S,
    request: &FetchRequest,
) -> Result<MarketData, FetchCycleFailed> {
    let (prices, history) = futures_util::future::join(
        source.current_prices(request),
        source.price_history(request),
    )
    .await;

    match (prices, history) {
        (Ok(prices), Ok(history)) => {
            tracing::debug!(
                assets = prices.len(),
                history_points = history.len(),
                "fetch cycle succeeded"
            );
            Ok(MarketData {
                quote: request.quote.clone(),
                prices,
                history,
            })
        }
        (Err(e), _) | (Ok(_), Err(e)) => {
            tracing::error!("Error fetching data: {}", e);
            Err(FetchCycleFailed::from(e))
        }
    }
}
