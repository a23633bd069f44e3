//! Error types for every layer.

use thiserror::Error;

/// Message shown when a failure carries no description of its own.
pub const FALLBACK_CYCLE_MESSAGE: &str = "Failed to fetch cryptocurrency data";

/// Top-level error.
#[derive(Error, Debug)]
pub enum TickerError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,
}

/// A response parsed as JSON but did not carry what the tracker needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("no price for asset '{0}'")]
    MissingAsset(String),

    #[error("asset '{asset}' has no '{quote}' quote")]
    MissingQuote { asset: String, quote: String },

    #[error("invalid price {value} for '{asset}'")]
    InvalidPrice { asset: String, value: f64 },

    #[error("invalid timestamp {0}")]
    InvalidTimestamp(f64),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid asset spec '{0}' (expected id or id:Name)")]
    InvalidAssetSpec(String),

    #[error("{0}")]
    Invalid(String),
}

/// The single error kind a fetch cycle resolves to.
///
/// Network failures, error statuses and shape mismatches all collapse into
/// this one type; only the display message survives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchCycleFailed {
    message: String,
}

impl FetchCycleFailed {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self {
                message: FALLBACK_CYCLE_MESSAGE.to_string(),
            };
        }
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TickerError> for FetchCycleFailed {
    fn from(err: TickerError) -> Self {
        Self::new(err.to_string())
    }
}
