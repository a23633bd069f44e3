//! High-level client: `TickerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the accessors and the `PriceSource`
//! implementation the refresh loop runs against.

use crate::config::TickerConfig;
use crate::domain::history::client::History;
use crate::domain::history::HistorySeries;
use crate::domain::price::client::Prices;
use crate::domain::price::PriceSnapshot;
use crate::error::TickerError;
use crate::http::CoinGeckoHttp;
use crate::refresh::{FetchRequest, PriceSource};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::price::client::Prices as PricesClient;

/// Entry point for fetching prices and history.
///
/// Provides nested sub-client accessors for each domain:
/// `client.prices()`, `client.history()`.
#[derive(Clone)]
pub struct TickerClient {
    pub(crate) http: CoinGeckoHttp,
}

impl TickerClient {
    pub fn builder() -> TickerClientBuilder {
        TickerClientBuilder::default()
    }

    pub fn from_config(config: &TickerConfig) -> Result<Self, TickerError> {
        Self::builder()
            .base_url(&config.api_url)
            .timeout(config.request_timeout)
            .build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl PriceSource for TickerClient {
    async fn current_prices(&self, request: &FetchRequest) -> Result<PriceSnapshot, TickerError> {
        self.prices().get(&request.assets, &request.quote).await
    }

    async fn price_history(&self, request: &FetchRequest) -> Result<HistorySeries, TickerError> {
        self.history()
            .get(&request.history_asset, &request.quote, request.window_days)
            .await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TickerClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for TickerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Some(crate::network::DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl TickerClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<TickerClient, TickerError> {
        if self.base_url.trim().is_empty() {
            return Err(TickerError::Validation("base_url must not be empty".into()));
        }
        Ok(TickerClient {
            http: CoinGeckoHttp::new(&self.base_url, self.timeout)?,
        })
    }
}
