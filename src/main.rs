//! coin-ticker: polls current prices and trailing history and renders them
//! to the terminal, refreshing every poll interval.
//!
//! Usage example (CLI):
//! ```bash
//! coin-ticker --assets bitcoin:Bitcoin,ethereum:Ethereum --quote usd --interval-secs 30
//! coin-ticker --config ./coin-ticker.toml --once
//! ```
//!
//! While running, `r` + Enter tears the refresh loop down and starts a fresh
//! one (full reload); `q` + Enter or Ctrl-C quits.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use coin_ticker::config::{timeout_from_secs, TickerConfig};
use coin_ticker::refresh::{fetch_cycle, OverlapPolicy, RefreshState, Scheduler, StateHolder};
use coin_ticker::render::{drive, Surface, TerminalSurface, ViewOptions};
use coin_ticker::shared::fmt::DateZone;
use coin_ticker::shared::{Asset, AssetId, QuoteCurrency};
use coin_ticker::client::TickerClient;

#[derive(Parser, Debug)]
#[command(version, about = "Crypto price tracker: live prices and trailing history")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<String>,

    /// Price API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Tracked assets, comma-separated `id` or `id:Name`
    #[arg(long, value_delimiter = ',')]
    assets: Option<Vec<Asset>>,

    /// Asset whose history is listed
    #[arg(long)]
    history_asset: Option<String>,

    /// Quote currency (e.g. usd)
    #[arg(long)]
    quote: Option<String>,

    /// Trailing history window in days
    #[arg(long)]
    days: Option<u32>,

    /// Seconds between refresh cycles
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Per-request timeout in seconds, 0 for none
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Skip a refresh while the previous one is still running
    #[arg(long)]
    skip_overlap: bool,

    /// Show history dates in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Run one cycle, print it and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    /// CLI > config file > defaults.
    fn into_config(self) -> Result<TickerConfig> {
        let mut config = match &self.config {
            Some(path) => TickerConfig::from_file(path)?,
            None => TickerConfig::default(),
        };

        if let Some(v) = self.api_url {
            config.api_url = v;
        }
        if let Some(v) = self.assets {
            config.assets = v;
        }
        if let Some(v) = self.history_asset {
            config.history_asset = AssetId::from(v.trim());
        }
        if let Some(v) = self.quote {
            config.quote = QuoteCurrency::new(v);
        }
        if let Some(v) = self.days {
            config.window_days = v;
        }
        if let Some(v) = self.interval_secs {
            config.poll_interval = Duration::from_secs(v);
        }
        if let Some(v) = self.timeout_secs {
            config.request_timeout = timeout_from_secs(v);
        }
        if self.skip_overlap {
            config.overlap = OverlapPolicy::Skip;
        }
        if self.utc {
            config.date_zone = DateZone::Utc;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let once = args.once;
    let config = args.into_config().context("invalid configuration")?;
    let client = Arc::new(TickerClient::from_config(&config)?);

    if once {
        return run_once(&client, &config).await;
    }
    run_interactive(client, config).await
}

/// Logs go to stderr so they do not interleave with frames on stdout.
fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run_once(client: &TickerClient, config: &TickerConfig) -> Result<()> {
    let holder = StateHolder::new();
    let cycle = holder.begin_cycle();
    let result = fetch_cycle(client, &config.fetch_request()).await;
    holder.resolve_cycle(cycle, result);

    let state = holder.current();
    let mut surface = TerminalSurface::new(std::io::stdout(), ViewOptions::from_config(config));
    surface.render(&state)?;

    if let Some(message) = state.error() {
        bail!("fetch failed: {}", message);
    }
    Ok(())
}

type Renderer = JoinHandle<(TerminalSurface<Stdout>, io::Result<()>)>;

/// Render every state from `rx` until its holder is dropped, then hand the
/// surface back.
fn spawn_renderer(
    mut surface: TerminalSurface<Stdout>,
    rx: watch::Receiver<RefreshState>,
) -> Renderer {
    tokio::spawn(async move {
        let result = drive(&mut surface, rx).await;
        (surface, result)
    })
}

async fn run_interactive(client: Arc<TickerClient>, config: TickerConfig) -> Result<()> {
    let surface = TerminalSurface::stdout(ViewOptions::from_config(&config));
    let mut scheduler = Scheduler::start(client.clone(), config.fetch_request(), config.scheduler());
    let mut renderer = spawn_renderer(surface, scheduler.subscribe());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            // Only finishes early if writing to the terminal failed.
            finished = &mut renderer => {
                scheduler.shutdown().await;
                let (_, result) = finished?;
                result.context("render failed")?;
                return Ok(());
            }

            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(input)) => match input.trim() {
                        "r" | "R" => {
                            tracing::info!("reload requested");
                            scheduler.shutdown().await;
                            let (surface, result) = (&mut renderer).await?;
                            result.context("render failed")?;

                            scheduler = Scheduler::start(
                                client.clone(),
                                config.fetch_request(),
                                config.scheduler(),
                            );
                            renderer = spawn_renderer(surface, scheduler.subscribe());
                        }
                        "q" | "Q" => break,
                        _ => {}
                    },
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        tracing::warn!("stdin closed: {}", e);
                        stdin_open = false;
                    }
                }
            }

            _ = &mut ctrl_c => {
                tracing::info!("Ctrl+C received, shutting down");
                break;
            }
        }
    }

    scheduler.shutdown().await;
    let (_, result) = renderer.await?;
    result.context("render failed")?;
    Ok(())
}
