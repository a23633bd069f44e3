//! Runtime configuration.
//!
//! Defaults reproduce the fixed tracker setup (bitcoin + ethereum in USD,
//! 7-day bitcoin history, 30 s polling). A TOML file can override any field,
//! and the binary applies CLI flags on top of that.

use crate::error::ConfigError;
use crate::network;
use crate::refresh::{FetchRequest, OverlapPolicy, SchedulerConfig};
use crate::shared::fmt::DateZone;
use crate::shared::{Asset, AssetId, QuoteCurrency};

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    pub api_url: String,
    /// Assets shown as price cards, in display order.
    pub assets: Vec<Asset>,
    pub history_asset: AssetId,
    pub quote: QuoteCurrency,
    pub window_days: u32,
    pub poll_interval: Duration,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
    pub overlap: OverlapPolicy,
    pub currency_symbol: String,
    /// Timezone history dates are shown in.
    pub date_zone: DateZone,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            api_url: network::DEFAULT_API_URL.to_string(),
            assets: network::DEFAULT_ASSETS
                .iter()
                .map(|(id, name)| Asset::new(*id, *name))
                .collect(),
            history_asset: AssetId::from(network::DEFAULT_HISTORY_ASSET),
            quote: QuoteCurrency::new(network::DEFAULT_QUOTE_CURRENCY),
            window_days: network::DEFAULT_WINDOW_DAYS,
            poll_interval: network::DEFAULT_POLL_INTERVAL,
            request_timeout: Some(network::DEFAULT_REQUEST_TIMEOUT),
            overlap: OverlapPolicy::default(),
            currency_symbol: network::DEFAULT_CURRENCY_SYMBOL.to_string(),
            date_zone: DateZone::default(),
        }
    }
}

/// On-disk form. Every field is optional; missing fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub assets: Option<Vec<Asset>>,
    pub history_asset: Option<AssetId>,
    pub quote: Option<QuoteCurrency>,
    pub window_days: Option<u32>,
    pub poll_interval_secs: Option<u64>,
    /// `0` disables the timeout.
    pub request_timeout_secs: Option<u64>,
    pub overlap: Option<OverlapPolicy>,
    pub currency_symbol: Option<String>,
    pub date_zone: Option<DateZone>,
}

impl TickerConfig {
    /// Defaults overlaid with the TOML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;

        tracing::debug!("loaded config from {}", shown);
        let mut config = Self::default();
        config.apply(file);
        Ok(config)
    }

    pub fn apply(&mut self, file: FileConfig) {
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.assets {
            self.assets = v;
        }
        if let Some(v) = file.history_asset {
            self.history_asset = v;
        }
        if let Some(v) = file.quote {
            self.quote = v;
        }
        if let Some(v) = file.window_days {
            self.window_days = v;
        }
        if let Some(v) = file.poll_interval_secs {
            self.poll_interval = Duration::from_secs(v);
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = timeout_from_secs(v);
        }
        if let Some(v) = file.overlap {
            self.overlap = v;
        }
        if let Some(v) = file.currency_symbol {
            self.currency_symbol = v;
        }
        if let Some(v) = file.date_zone {
            self.date_zone = v;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_url must not be empty".into()));
        }
        if self.assets.is_empty() {
            return Err(ConfigError::Invalid("at least one asset must be tracked".into()));
        }
        if self.quote.as_str().is_empty() {
            return Err(ConfigError::Invalid("quote currency must not be empty".into()));
        }
        if self.window_days == 0 {
            return Err(ConfigError::Invalid("window_days must be at least 1".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid("poll interval must be non-zero".into()));
        }
        Ok(())
    }

    /// Display name for the history asset: the tracked asset's name when it
    /// is one of the cards, otherwise derived from its id.
    pub fn history_asset_name(&self) -> String {
        self.assets
            .iter()
            .find(|a| a.id == self.history_asset)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| Asset::from_id(self.history_asset.clone()).name)
    }

    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            assets: self.assets.clone(),
            history_asset: self.history_asset.clone(),
            quote: self.quote.clone(),
            window_days: self.window_days,
        }
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: self.poll_interval,
            overlap: self.overlap,
        }
    }
}

/// `0` means no timeout.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
