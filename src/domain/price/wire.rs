//! Wire types for `GET /simple/price`.

use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `{ "bitcoin": { "usd": 65000.0 }, "ethereum": { "usd": 3200.5 } }`
///
/// A quote can come back as `null` for delisted pairs, hence `Option`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimplePriceResponse(pub HashMap<AssetId, HashMap<String, Option<f64>>>);

impl SimplePriceResponse {
    pub fn quote(&self, asset: &AssetId, quote: &str) -> Option<Option<f64>> {
        self.0.get(asset).map(|quotes| quotes.get(quote).copied().flatten())
    }
}
