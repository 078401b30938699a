//! Deterministic in-memory connector for tests and CI-safe examples.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use candela_core::connector::{CandelaConnector, CandleProvider, ProductsProvider, TickerProvider};
use candela_core::{CandelaError, CandleRequest, Product, RawCandle, Ticker};
use chrono::{DateTime, Utc};

const NAME: &str = "candela-mock";
/// Page size cap enforced by the real exchange.
const MAX_ROWS_PER_PAGE: usize = 300;
const PRODUCTS: &[(&str, &str, &str)] = &[
    ("BTC-USD", "BTC", "USD"),
    ("ETH-USD", "ETH", "USD"),
    ("ETH-BTC", "ETH", "BTC"),
];

/// Mock connector producing synthetic candles on the native grid.
///
/// Every bucket start `t` in `[start, end]` that is a multiple of the
/// granularity yields one candle, newest first, at most 300 per page. Prices
/// are a pure function of `t`, so overlapping pages agree.
///
/// Special symbols:
/// - `FAIL`: every candle request fails with `FetchFailed`.
/// - `MALFORMED`: every candle request fails with `MalformedResponse`.
/// - `TIMEOUT`: sleeps 200ms (Tokio time) before answering.
pub struct MockConnector {
    listed_since: Option<i64>,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CandleRequest>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector with unbounded history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listed_since: None,
            fail_on_call: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// No candles exist before `since`.
    #[must_use]
    pub fn listed_since(mut self, since: DateTime<Utc>) -> Self {
        self.listed_since = Some(since.timestamp());
        self
    }

    /// Fail the `n`-th candle request (1-based) with `FetchFailed`.
    #[must_use]
    pub const fn fail_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    /// Number of candle requests served so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every candle request received, in order.
    pub fn requests(&self) -> Vec<CandleRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Synthetic candle for bucket start `time` at `granularity` seconds.
    #[must_use]
    pub fn candle_at(time: i64, granularity: u32) -> RawCandle {
        let step = time.div_euclid(i64::from(granularity));
        // small integers keep every derived value exact in f64
        let px = 100.0 + step.rem_euclid(50) as f64;
        RawCandle {
            time,
            low: px - 1.0,
            high: px + 1.0,
            open: px,
            close: px + 0.5,
            volume: (step.rem_euclid(10) + 1) as f64,
        }
    }

    fn synthesize(&self, req: &CandleRequest) -> Vec<RawCandle> {
        let g = i64::from(req.granularity());
        let mut lo = req.start().timestamp();
        if let Some(since) = self.listed_since {
            lo = lo.max(since);
        }
        let hi = req.end().timestamp();
        let first = lo + (g - lo.rem_euclid(g)) % g;
        if first > hi {
            return Vec::new();
        }
        let last = hi - hi.rem_euclid(g);
        let mut out = Vec::new();
        let mut t = last;
        while t >= first && out.len() < MAX_ROWS_PER_PAGE {
            out.push(Self::candle_at(t, req.granularity()));
            t -= g;
        }
        out
    }
}

#[async_trait]
impl CandleProvider for MockConnector {
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, CandelaError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(req.clone());

        match req.symbol() {
            "FAIL" => {
                return Err(CandelaError::fetch_failed(
                    NAME,
                    "forced failure: candles",
                ));
            }
            "MALFORMED" => {
                return Err(CandelaError::malformed(
                    "candles for MALFORMED: expected array of arrays",
                ));
            }
            "TIMEOUT" => tokio::time::sleep(Duration::from_millis(200)).await,
            _ => {}
        }
        if self.fail_on_call == Some(n) {
            return Err(CandelaError::fetch_failed(
                NAME,
                format!("forced failure on call {n}"),
            ));
        }
        Ok(self.synthesize(req))
    }
}

#[async_trait]
impl ProductsProvider for MockConnector {
    async fn products(&self) -> Result<Vec<Product>, CandelaError> {
        Ok(PRODUCTS
            .iter()
            .map(|(id, base, quote)| Product {
                id: (*id).to_string(),
                base_currency: Some((*base).to_string()),
                quote_currency: Some((*quote).to_string()),
                display_name: Some(format!("{base}/{quote}")),
                status: Some("online".to_string()),
                trading_disabled: Some(false),
            })
            .collect())
    }
}

#[async_trait]
impl TickerProvider for MockConnector {
    async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError> {
        if !PRODUCTS.iter().any(|(id, _, _)| *id == symbol) {
            return Err(CandelaError::not_found(format!("ticker for {symbol}")));
        }
        Ok(Ticker {
            trade_id: Some(1),
            price: Some("100.50".to_string()),
            size: Some("0.25".to_string()),
            bid: Some("100.25".to_string()),
            ask: Some("100.75".to_string()),
            volume: Some("1234.5".to_string()),
            time: DateTime::from_timestamp(1_700_000_000, 0),
        })
    }
}

impl CandelaConnector for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        Some(self as &dyn CandleProvider)
    }
    fn as_products_provider(&self) -> Option<&dyn ProductsProvider> {
        Some(self as &dyn ProductsProvider)
    }
    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        Some(self as &dyn TickerProvider)
    }
}
