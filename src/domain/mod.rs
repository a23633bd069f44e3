//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types (validated, render-ready)
//! - `wire.rs`: Raw serde structs matching API responses
//! - `convert.rs`: Conversions from wire to domain types with validation
//! - `client.rs`: Sub-client with HTTP methods

pub mod history;
pub mod price;

use crate::shared::QuoteCurrency;
use serde::{Deserialize, Serialize};

use history::HistorySeries;
use price::PriceSnapshot;

/// The payload of one successful fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub quote: QuoteCurrency,
    pub prices: PriceSnapshot,
    pub history: HistorySeries,
}
