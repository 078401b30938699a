//! Candela fetches exchange candles over arbitrary windows and re-aggregates
//! them into the caller's timeframe.
//!
//! Overview
//! - Resolves a timeframe label (`"3m"`, `"8h"`, `"1w"`, ...) to the native
//!   granularity the exchange serves and the bucket rule used to re-aggregate it.
//! - Walks backward from "now" one bounded page at a time until the requested
//!   start date is covered, pausing between pages to respect rate limits.
//! - Merges the pages, resamples to the target timeframe (open first, high max,
//!   low min, close last, volume mean) and trims to the requested window.
//!
//! Key behaviors
//! - `limit` is clamped to `[5, 300]`. It is both the page size (native bars per
//!   request) and the maximum number of rows returned.
//! - At the floor (`limit == 5`) each page contributes only its last row.
//! - Requests below 50 rows fetch exactly one page.
//! - Every failure is fatal for the call; no partial results are returned.
//! - Pagination is bounded by `max_pages` (stop early, keep what was fetched) and
//!   by the optional `request_timeout` (fail with `RequestTimeout`).
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use candela::{Candela, parse_from_date};
//! use candela_coinbase::CoinbaseConnector;
//!
//! let cb = Arc::new(CoinbaseConnector::new_default()?);
//! let candela = Candela::builder().with_connector(cb).build()?;
//!
//! let from = parse_from_date("2024-01-01 00:00:00")?;
//! let rows = candela.fetch_ohlcv("BTC-USD", "4h", 120, from).await?;
//! for c in &rows {
//!     println!("{} o={} h={} l={} c={} v={}", c.ts, c.open, c.high, c.low, c.close, c.volume);
//! }
//! ```
//!
//! Bulk download across symbols:
//! ```rust,ignore
//! let report = candela
//!     .download()
//!     .symbols(&["BTC-USD", "ETH-USD"])?
//!     .timeframe("1d")
//!     .limit(30)
//!     .from(from)
//!     .run()
//!     .await?;
//! if let Some(btc) = report.series.get("BTC-USD") {
//!     // inspect daily candles for BTC-USD
//! }
//! ```
//!
//! See `candela/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Candela, CandelaBuilder};
pub use router::download::{DownloadBuilder, DownloadReport, DownloadWarning};

// Re-export core types for convenience
pub use candela_core::{
    CandelaConfig, CandelaConnector, CandelaError, Candle, Capability, Clock, FixedClock,
    FixedDelay, NoPacing, OhlcBar, Pacer, Pacing, Product, SystemClock, Ticker, TimeframeSpec,
    parse_from_date,
};
