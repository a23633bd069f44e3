//! Surface-independent view model.

use crate::config::TickerConfig;
use crate::refresh::RefreshState;
use crate::shared::fmt::{display_date, display_price, DateZone};

pub const TITLE: &str = "Crypto Price Tracker";
pub const LOADING_TEXT: &str = "Loading data...";
pub const PRICES_HEADING: &str = "Live Prices";

/// Display settings that do not come from the fetched data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub currency_symbol: String,
    pub history_asset_name: String,
    pub window_days: u32,
    pub date_zone: DateZone,
}

impl ViewOptions {
    pub fn from_config(config: &TickerConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            history_asset_name: config.history_asset_name(),
            window_days: config.window_days,
            date_zone: config.date_zone,
        }
    }

    pub fn history_heading(&self) -> String {
        format!(
            "{} Price - Last {} Days",
            self.history_asset_name, self.window_days
        )
    }

    fn price(&self, value: f64) -> String {
        format!("{}{}", self.currency_symbol, display_price(value))
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&TickerConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCard {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: String,
    pub price: String,
}

/// Exactly one of the three views is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    /// Any failure blanks both sections.
    Failed { message: String },
    Ready {
        cards: Vec<PriceCard>,
        history_heading: String,
        history: Vec<HistoryRow>,
    },
}

impl View {
    pub fn from_state(state: &RefreshState, options: &ViewOptions) -> Self {
        match state {
            RefreshState::Loading => View::Loading,
            RefreshState::Failed(err) => View::Failed {
                message: err.message().to_string(),
            },
            RefreshState::Ready(data) => View::Ready {
                cards: data
                    .prices
                    .iter()
                    .map(|entry| PriceCard {
                        name: entry.asset.name.clone(),
                        price: options.price(entry.price),
                    })
                    .collect(),
                history_heading: options.history_heading(),
                history: data
                    .history
                    .points()
                    .iter()
                    .map(|point| HistoryRow {
                        date: display_date(&point.timestamp, options.date_zone),
                        price: options.price(point.price),
                    })
                    .collect(),
            },
        }
    }
}
