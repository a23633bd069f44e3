//! # coin-ticker
//!
//! Polls a public cryptocurrency price API and renders current prices and a
//! trailing price history.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, formatting, domain slices, errors, configuration
//! 2. **HTTP API**: `CoinGeckoHttp`, one method per endpoint
//! 3. **High-Level Client**: `TickerClient` with `prices()` / `history()` sub-clients
//! 4. **Refresh Loop**: fetcher, state holder and fixed-rate scheduler
//! 5. **Rendering**: view model plus a terminal surface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coin_ticker::prelude::*;
//! use std::sync::Arc;
//!
//! let config = TickerConfig::default();
//! let client = TickerClient::from_config(&config)?;
//! let scheduler = Scheduler::start(Arc::new(client), config.fetch_request(), config.scheduler());
//!
//! let mut surface = TerminalSurface::new(std::io::stdout(), ViewOptions::from_config(&config));
//! coin_ticker::render::drive(&mut surface, scheduler.subscribe()).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Error types for every layer.
pub mod error;

/// Network URL constants and tracked-asset defaults.
pub mod network;

/// Runtime configuration: defaults, TOML file, overrides.
pub mod config;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the price API.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `TickerClient`: the primary entry point for fetching data.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Refresh Loop ────────────────────────────────────────────────────

/// Fetch cycle, state holder and scheduler.
pub mod refresh;

// ── Layer 5: Rendering ───────────────────────────────────────────────────────

/// View model and rendering surfaces.
pub mod render;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Asset, AssetId, QuoteCurrency};

    // Domain types
    pub use crate::domain::history::{HistoryPoint, HistorySeries};
    pub use crate::domain::price::PriceSnapshot;
    pub use crate::domain::MarketData;

    // Errors
    pub use crate::error::{ConfigError, DataError, FetchCycleFailed, HttpError, TickerError};

    // Configuration
    pub use crate::config::TickerConfig;
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{HistoryClient, PricesClient, TickerClient, TickerClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::CoinGeckoHttp;

    // Refresh loop
    pub use crate::refresh::{
        fetch_cycle, FetchRequest, OverlapPolicy, PriceSource, RefreshState, Scheduler,
        SchedulerConfig, StateHolder,
    };

    // Rendering
    pub use crate::render::{Surface, TerminalSurface, View, ViewOptions};
}
