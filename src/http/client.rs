//! Low-level HTTP client: `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Requests are never retried here: a failed
//! request fails its fetch cycle and the next cycle runs on schedule.

use crate::domain::history::wire::MarketChartResponse;
use crate::domain::price::wire::SimplePriceResponse;
use crate::error::HttpError;
use crate::shared::{AssetId, QuoteCurrency};

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the price API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
}

impl CoinGeckoHttp {
    /// `timeout` bounds each request end to end; `None` leaves only the
    /// transport's own limits in place.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(4)
            .user_agent(concat!("coin-ticker/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Simple price ─────────────────────────────────────────────────────

    pub async fn get_simple_price(
        &self,
        ids: &[AssetId],
        quote: &QuoteCurrency,
    ) -> Result<SimplePriceResponse, HttpError> {
        let url = simple_price_url(&self.base_url, ids, quote);
        self.get(&url).await
    }

    // ── Market chart ─────────────────────────────────────────────────────

    pub async fn get_market_chart(
        &self,
        id: &AssetId,
        quote: &QuoteCurrency,
        days: u32,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = market_chart_url(&self.base_url, id, quote, days);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!("GET {}", url);

        let resp = self.client.get(url).send().await.map_err(map_reqwest)?;
        let status = resp.status();

        if status.is_success() {
            return resp.json::<T>().await.map_err(map_reqwest);
        }

        let retry_after_ms = retry_after_ms(resp.headers());
        let body_text = resp.text().await.unwrap_or_default();

        tracing::debug!(status = status.as_u16(), "GET {} failed", url);
        Err(status_error(status.as_u16(), body_text, retry_after_ms))
    }
}

/// `Retry-After` in delay-seconds form, as milliseconds. HTTP-date values are
/// ignored.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000))
}

fn map_reqwest(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Request(err)
    }
}

/// Map a non-2xx status to its error variant.
pub(crate) fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

pub(crate) fn simple_price_url(base_url: &str, ids: &[AssetId], quote: &QuoteCurrency) -> String {
    let ids = ids
        .iter()
        .map(|id| urlencoding::encode(id.as_str()).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}/simple/price?ids={}&vs_currencies={}",
        base_url,
        ids,
        urlencoding::encode(quote.as_str())
    )
}

pub(crate) fn market_chart_url(
    base_url: &str,
    id: &AssetId,
    quote: &QuoteCurrency,
    days: u32,
) -> String {
    format!(
        "{}/coins/{}/market_chart?vs_currency={}&days={}",
        base_url,
        urlencoding::encode(id.as_str()),
        urlencoding::encode(quote.as_str()),
        days
    )
}
