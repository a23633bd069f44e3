//! Network URL constants and the default tracked set.

use std::time::Duration;

/// Default REST API base URL (CoinGecko v3, public tier).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Assets shown as price cards, as `(api id, display name)`.
pub const DEFAULT_ASSETS: &[(&str, &str)] = &[("bitcoin", "Bitcoin"), ("ethereum", "Ethereum")];

/// Asset whose trailing history is listed.
pub const DEFAULT_HISTORY_ASSET: &str = "bitcoin";

pub const DEFAULT_QUOTE_CURRENCY: &str = "usd";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Trailing history window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
