//! candela-coinbase
//!
//! Public connector that implements `CandelaConnector` on top of the Coinbase
//! Exchange public REST API. Exposes native candles, the product listing, and
//! per-product tickers. No authentication is required.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
use adapter::{CbCandles, CbProducts, CbTicker, RealAdapter};
use async_trait::async_trait;
use candela_core::{
    CandelaError, CandleRequest, CoinbaseConfig, Product, RawCandle, Ticker,
    connector::{CandelaConnector, CandleProvider, ProductsProvider, TickerProvider},
};

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type CandlesAdapter = Arc<dyn CbCandles>;
#[cfg(not(feature = "test-adapters"))]
type CandlesAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type ProductsAdapter = Arc<dyn CbProducts>;
#[cfg(not(feature = "test-adapters"))]
type ProductsAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type TickerAdapter = Arc<dyn CbTicker>;
#[cfg(not(feature = "test-adapters"))]
type TickerAdapter = AdapterArc;

/// Public connector type. Production users will construct with `CoinbaseConnector::new_default()`.
pub struct CoinbaseConnector {
    candles: CandlesAdapter,
    products: ProductsAdapter,
    ticker: TickerAdapter,
}

impl CoinbaseConnector {
    /// Stable connector name.
    pub const KEY: &'static str = "candela-coinbase";

    /// Build against the public endpoint with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, CandelaError> {
        Self::with_config(&CoinbaseConfig::default())
    }

    /// Build with explicit connection settings.
    ///
    /// # Errors
    /// Returns an error for an invalid base URL or if the HTTP client cannot be constructed.
    pub fn with_config(cfg: &CoinbaseConfig) -> Result<Self, CandelaError> {
        let a = RealAdapter::new(cfg)?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from a provided `reqwest::Client`.
    ///
    /// The exchange rejects requests without a user agent, so the client
    /// should set one.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `api_url` is not an http(s) base URL.
    pub fn try_new_with_reqwest_client(
        http: reqwest::Client,
        api_url: &str,
    ) -> Result<Self, CandelaError> {
        let a = RealAdapter::with_client(http, api_url)?;
        Ok(Self::from_adapter(&a))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            candles: adapter.clone_arc_candles(),
            products: adapter.clone_arc_products(),
            ticker: adapter.clone_arc_ticker(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            candles: Arc::clone(&shared),
            products: Arc::clone(&shared),
            ticker: shared,
        }
    }
}

#[async_trait]
impl CandleProvider for CoinbaseConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela_coinbase::candles",
            skip(self, req),
            fields(
                symbol = %req.symbol(),
                start = %req.start(),
                end = %req.end(),
                granularity = req.granularity(),
            ),
        )
    )]
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, CandelaError> {
        if !self.supported_granularities().contains(&req.granularity()) {
            return Err(CandelaError::InvalidArg(format!(
                "granularity {}s is not served by coinbase",
                req.granularity()
            )));
        }
        let rows = self
            .candles
            .candles(req.symbol(), req.start(), req.end(), req.granularity())
            .await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = rows.len(), "coinbase page received");
        Ok(rows)
    }
}

#[async_trait]
impl ProductsProvider for CoinbaseConnector {
    async fn products(&self) -> Result<Vec<Product>, CandelaError> {
        self.products.products().await
    }
}

#[async_trait]
impl TickerProvider for CoinbaseConnector {
    async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError> {
        self.ticker.ticker(symbol).await
    }
}

impl CandelaConnector for CoinbaseConnector {
    fn name(&self) -> &'static str {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Coinbase"
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
