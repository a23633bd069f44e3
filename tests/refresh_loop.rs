//! Integration tests for the refresh loop: fetch cycle, state holder and
//! scheduler driven by an in-memory price source on a paused tokio clock.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use coin_ticker::domain::history::wire::MarketChartResponse;
use coin_ticker::domain::history::HistorySeries;
use coin_ticker::domain::price::wire::SimplePriceResponse;
use coin_ticker::domain::price::PriceSnapshot;
use coin_ticker::error::{TickerError, FALLBACK_CYCLE_MESSAGE};
use coin_ticker::refresh::{
    fetch_cycle, FetchRequest, OverlapPolicy, PriceSource, RefreshState, Scheduler,
    SchedulerConfig, StateHolder,
};
use coin_ticker::refresh::scheduler::MIN_INTERVAL;
use coin_ticker::render::{drive, Surface, View, ViewOptions};
use coin_ticker::shared::Asset;
use tokio_test::{assert_err, assert_ok};

const PRICES_JSON: &str = r#"{"bitcoin": {"usd": 1234.5}, "ethereum": {"usd": 0.5}}"#;
const CHART_JSON: &str = r#"{"prices": [
    [1700000000000, 37000.0],
    [1700086400000, 37250.5],
    [1700172800000, 36990.25]
]}"#;

fn request() -> FetchRequest {
    FetchRequest {
        assets: vec![Asset::new("bitcoin", "Bitcoin"), Asset::new("ethereum", "Ethereum")],
        history_asset: "bitcoin".into(),
        quote: "usd".into(),
        window_days: 7,
    }
}

fn config(secs: u64, overlap: OverlapPolicy) -> SchedulerConfig {
    SchedulerConfig {
        interval: Duration::from_secs(secs),
        overlap,
    }
}

/// Serves fixed bodies after `delay`; either side can be switched to fail.
struct MockSource {
    delay: Duration,
    prices_fail: AtomicBool,
    prices_panic: AtomicBool,
    history_fail: AtomicBool,
    price_calls: AtomicUsize,
    history_calls: AtomicUsize,
    chart_json: String,
}

impl MockSource {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            prices_fail: AtomicBool::new(false),
            prices_panic: AtomicBool::new(false),
            history_fail: AtomicBool::new(false),
            price_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            chart_json: CHART_JSON.to_string(),
        }
    }

    fn with_chart(mut self, json: &str) -> Self {
        self.chart_json = json.to_string();
        self
    }

    fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

impl PriceSource for MockSource {
    async fn current_prices(&self, request: &FetchRequest) -> Result<PriceSnapshot, TickerError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.prices_panic.load(Ordering::SeqCst) {
            panic!("price source blew up");
        }
        if self.prices_fail.load(Ordering::SeqCst) {
            return Err(TickerError::Other("Network Error".into()));
        }
        let resp: SimplePriceResponse = serde_json::from_str(PRICES_JSON)?;
        Ok(PriceSnapshot::try_from_wire(&resp, &request.assets, &request.quote)?)
    }

    async fn price_history(&self, request: &FetchRequest) -> Result<HistorySeries, TickerError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.history_fail.load(Ordering::SeqCst) {
            return Err(TickerError::Other("Request failed with status code 500".into()));
        }
        let resp: MarketChartResponse = serde_json::from_str(&self.chart_json)?;
        Ok(HistorySeries::try_from_wire(
            resp,
            request.history_asset.clone(),
            request.window_days,
        )?)
    }
}

/// Records every state it is asked to render.
#[derive(Default)]
struct RecordingSurface {
    frames: Vec<RefreshState>,
}

impl Surface for RecordingSurface {
    fn render(&mut self, state: &RefreshState) -> std::io::Result<()> {
        self.frames.push(state.clone());
        Ok(())
    }
}

// ─── Fetch cycle + holder ────────────────────────────────────────────────────

#[tokio::test]
async fn successful_cycle_goes_loading_then_ready() {
    let source = MockSource::new(Duration::ZERO);
    let holder = StateHolder::new();

    let cycle = holder.begin_cycle();
    assert!(holder.current().is_loading());
    holder.resolve_cycle(cycle, fetch_cycle(&source, &request()).await);

    let state = holder.current();
    let data = state.data().expect("ready");
    let ids: Vec<&str> = data.prices.asset_ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    assert!(data.prices.iter().all(|e| e.price >= 0.0));
    assert_eq!(data.history.len(), 3);
}

#[tokio::test]
async fn price_failure_with_history_success_fails_whole_cycle() {
    let source = MockSource::new(Duration::ZERO);
    let holder = StateHolder::new();

    let c = holder.begin_cycle();
    holder.resolve_cycle(c, fetch_cycle(&source, &request()).await);
    assert!(holder.current().data().is_some());

    source.prices_fail.store(true, Ordering::SeqCst);
    let c = holder.begin_cycle();
    holder.resolve_cycle(c, fetch_cycle(&source, &request()).await);

    let state = holder.current();
    assert_eq!(state.error(), Some("Network Error"));
    assert!(state.data().is_none());
    assert_eq!(source.history_calls(), 2);
    assert_eq!(
        View::from_state(&state, &ViewOptions::default()),
        View::Failed {
            message: "Network Error".into()
        }
    );
}

#[tokio::test]
async fn history_failure_fails_whole_cycle() {
    let source = MockSource::new(Duration::ZERO);
    source.history_fail.store(true, Ordering::SeqCst);
    let err = fetch_cycle(&source, &request()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed with status code 500");
}

#[tokio::test]
async fn identical_upstream_data_gives_identical_payloads() {
    let source = MockSource::new(Duration::ZERO);
    let holder = StateHolder::new();

    let c = holder.begin_cycle();
    holder.resolve_cycle(c, fetch_cycle(&source, &request()).await);
    let first = holder.current();

    let c = holder.begin_cycle();
    holder.resolve_cycle(c, fetch_cycle(&source, &request()).await);
    let second = holder.current();

    assert_eq!(first, second);
    assert_eq!(second.data().unwrap().history.len(), 3);
    assert_eq!(
        serde_json::to_string(first.data().unwrap()).unwrap(),
        serde_json::to_string(second.data().unwrap()).unwrap()
    );
}

#[tokio::test]
async fn out_of_order_history_is_passed_through() {
    let source = MockSource::new(Duration::ZERO)
        .with_chart(r#"{"prices": [[1700172800000, 3.0], [1700000000000, 1.0], [1700086400000, 2.0]]}"#);
    let data = fetch_cycle(&source, &request()).await.unwrap();
    let prices: Vec<f64> = data.history.points().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![3.0, 1.0, 2.0]);
}

#[tokio::test]
async fn ready_view_shows_cards_and_every_history_row() {
    let source = MockSource::new(Duration::ZERO);
    let data = fetch_cycle(&source, &request()).await.unwrap();
    let state = RefreshState::Ready(Arc::new(data));

    let View::Ready { cards, history, .. } = View::from_state(&state, &ViewOptions::default())
    else {
        panic!("expected ready view");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].price, "$1,234.50");
    assert_eq!(cards[1].price, "$0.50");
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].price, "$37,250.50");
}

// ─── Scheduler ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn first_cycle_runs_immediately() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(source.price_calls(), 1);
    assert!(scheduler.current().data().is_some());
    assert_eq!(scheduler.holder().cycles_started(), 1);

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn cycles_repeat_at_fixed_rate() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_secs(65)).await;
    assert_eq!(source.price_calls(), 3);
    assert!(scheduler.is_running());

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn slow_cycle_does_not_delay_next_tick() {
    let source = Arc::new(MockSource::new(Duration::from_secs(45)));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(scheduler.current().is_loading());

    // ticks at 0, 30 and 60 all fire even though each cycle takes 45s
    tokio::time::sleep(Duration::from_secs(64)).await;
    assert_eq!(source.price_calls(), 3);
    assert!(scheduler.in_flight() >= 1);

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn skip_policy_skips_ticks_while_cycle_in_flight() {
    let source = Arc::new(MockSource::new(Duration::from_secs(45)));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Skip));

    // tick 0 starts, tick 30 skipped (in flight until 45), tick 60 starts
    tokio::time::sleep(Duration::from_secs(65)).await;
    assert_eq!(source.price_calls(), 2);

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn failed_cycle_waits_for_next_regular_tick() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    source.prices_fail.store(true, Ordering::SeqCst);
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(scheduler.current().error(), Some("Network Error"));

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(source.price_calls(), 1);

    source.prices_fail.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(source.price_calls(), 2);
    assert!(scheduler.current().data().is_some());

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn no_cycles_after_teardown() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(source.price_calls(), 1);

    scheduler.shutdown().await;
    tokio::time::sleep(Duration::from_secs(95)).await;
    assert_eq!(source.price_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_scheduler_also_stops_ticks() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));
    tokio::time::sleep(Duration::from_millis(1)).await;

    drop(scheduler);
    tokio::time::sleep(Duration::from_secs(95)).await;
    assert_eq!(source.price_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn in_flight_cycle_resolving_after_teardown_is_discarded() {
    let source = Arc::new(MockSource::new(Duration::from_secs(10)));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));
    let mut states = scheduler.subscribe();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(scheduler.current().is_loading());

    scheduler.shutdown().await;

    // The in-flight fetch still completes; its result has nowhere to go.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(source.history_calls(), 1);
    assert!(states.borrow_and_update().is_loading());
    assert_err!(states.changed().await);
}

#[tokio::test(start_paused = true)]
async fn surface_renders_every_observed_transition_until_teardown() {
    let source = Arc::new(MockSource::new(Duration::from_secs(5)));
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));
    let rx = scheduler.subscribe();

    let render = tokio::spawn(async move {
        let mut surface = RecordingSurface::default();
        assert_ok!(drive(&mut surface, rx).await);
        surface.frames
    });

    tokio::time::sleep(Duration::from_secs(40)).await;
    scheduler.shutdown().await;

    let frames = render.await.unwrap();
    assert!(frames.first().unwrap().is_loading());
    assert!(frames.last().unwrap().data().is_some());
    assert!(frames.iter().any(|s| s.data().is_some()));
    // two cycles (t=0, t=30), each seen loading then ready
    let ready = frames.iter().filter(|s| s.data().is_some()).count();
    assert_eq!(ready, 2);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_is_raised_to_minimum() {
    let source = Arc::new(MockSource::new(Duration::ZERO));
    let scheduler = Scheduler::start(source.clone(), request(), config(0, OverlapPolicy::Allow));

    tokio::time::sleep(MIN_INTERVAL * 2 + Duration::from_millis(500)).await;
    assert!(scheduler.is_running());
    assert_eq!(source.price_calls(), 3);
    assert!(scheduler.current().data().is_some());

    scheduler.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn panicking_source_leaves_loading_with_failure() {
    let source = Arc::new(MockSource::new(Duration::from_secs(1)));
    source.prices_panic.store(true, Ordering::SeqCst);
    let scheduler = Scheduler::start(source.clone(), request(), config(30, OverlapPolicy::Allow));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(scheduler.current().error(), Some(FALLBACK_CYCLE_MESSAGE));
    assert_eq!(scheduler.in_flight(), 0);

    // The timer survives and the next tick recovers.
    source.prices_panic.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(scheduler.current().data().is_some());

    scheduler.shutdown().await;
}
