//! Price domain: current prices for the tracked asset set.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{Asset, AssetId};
use serde::{Deserialize, Serialize};

/// Current price of one tracked asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPrice {
    pub asset: Asset,
    pub price: f64,
}

/// Current prices, one per tracked asset, in tracking order.
///
/// Built only through validation against the tracked set, so every tracked
/// asset is present exactly once with a finite, non-negative price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    entries: Vec<AssetPrice>,
}

impl PriceSnapshot {
    pub fn get(&self, id: &AssetId) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.asset.id == id)
            .map(|e| e.price)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetPrice> {
        self.entries.iter()
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.iter().map(|e| &e.asset.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
