//! Conversion from the simple-price wire type to `PriceSnapshot`.

use super::wire::SimplePriceResponse;
use super::{AssetPrice, PriceSnapshot};
use crate::error::DataError;
use crate::shared::{Asset, QuoteCurrency};

impl PriceSnapshot {
    /// Pick the tracked assets out of a response, in tracking order.
    ///
    /// Fails if any tracked asset or its quote is missing, or if a price is
    /// negative or not finite. Untracked assets in the response are ignored.
    pub fn try_from_wire(
        resp: &SimplePriceResponse,
        assets: &[Asset],
        quote: &QuoteCurrency,
    ) -> Result<Self, DataError> {
        let mut entries = Vec::with_capacity(assets.len());

        for asset in assets {
            let price = match resp.quote(&asset.id, quote.as_str()) {
                None => return Err(DataError::MissingAsset(asset.id.to_string())),
                Some(None) => {
                    return Err(DataError::MissingQuote {
                        asset: asset.id.to_string(),
                        quote: quote.to_string(),
                    })
                }
                Some(Some(p)) => p,
            };

            if !price.is_finite() || price < 0.0 {
                return Err(DataError::InvalidPrice {
                    asset: asset.id.to_string(),
                    value: price,
                });
            }

            entries.push(AssetPrice {
                asset: asset.clone(),
                price,
            });
        }

        Ok(Self { entries })
    }
}
