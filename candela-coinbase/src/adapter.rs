#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use candela_core::{CandelaError, CoinbaseConfig, Product, RawCandle, Ticker};

const CONNECTOR: &str = "candela-coinbase";

/// Candles abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait CbCandles: Send + Sync {
    /// Fetch native candles for `symbol` in `[start, end]` at `granularity` seconds.
    async fn candles(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: u32,
    ) -> Result<Vec<RawCandle>, CandelaError>;
}

/// Product listing abstraction.
#[async_trait]
pub trait CbProducts: Send + Sync {
    /// Fetch every listed product.
    async fn products(&self) -> Result<Vec<Product>, CandelaError>;
}

/// Ticker abstraction.
#[async_trait]
pub trait CbTicker: Send + Sync {
    /// Fetch the ticker for `symbol`.
    async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError>;
}

/// Real adapter backed by a `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections internally.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Build an HTTP client from `cfg` (timeout and user agent) and parse its base URL.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unusable base URL and `Other` if the HTTP
    /// client cannot be constructed.
    pub fn new(cfg: &CoinbaseConfig) -> Result<Self, CandelaError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.as_str())
            .build()
            .map_err(|e| CandelaError::Other(format!("failed to build http client: {e}")))?;
        Self::with_client(http, &cfg.api_url)
    }

    /// Wrap an existing `reqwest::Client`. The caller is responsible for its
    /// timeout and user agent.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `api_url` is not an absolute http(s) URL.
    pub fn with_client(http: reqwest::Client, api_url: &str) -> Result<Self, CandelaError> {
        let base = Url::parse(api_url)
            .map_err(|e| CandelaError::InvalidArg(format!("invalid api url '{api_url}': {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(CandelaError::InvalidArg(format!(
                "api url '{api_url}' must be an http(s) base url"
            )));
        }
        Ok(Self { http, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CandelaError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| CandelaError::InvalidArg(format!("api url '{}' cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body. With `missing_is_not_found`, a 404
    /// maps to `NotFound`; otherwise it is a plain `FetchFailed`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        what: &str,
        missing_is_not_found: bool,
    ) -> Result<T, CandelaError> {
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| CandelaError::fetch_failed(CONNECTOR, format!("{what}: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CandelaError::fetch_failed(CONNECTOR, format!("{what}: {e}")))?;

        if missing_is_not_found && status == StatusCode::NOT_FOUND {
            return Err(CandelaError::not_found(what.to_string()));
        }
        if !status.is_success() {
            return Err(CandelaError::fetch_failed(
                CONNECTOR,
                format!("{what}: status {status}: {}", error_message(&body)),
            ));
        }
        serde_json::from_str(&body).map_err(|e| CandelaError::malformed(format!("{what}: {e}")))
    }
}

/// The exchange reports failures as `{"message": "..."}`; fall back to a body prefix.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl CbCandles for RealAdapter {
    async fn candles(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: u32,
    ) -> Result<Vec<RawCandle>, CandelaError> {
        let url = self.endpoint(&["products", symbol, "candles"])?;
        let query = [
            ("start", rfc3339(start)),
            ("end", rfc3339(end)),
            ("granularity", granularity.to_string()),
        ];
        self.get_json(url, &query, &format!("candles for {symbol}"), false)
            .await
    }
}

#[async_trait]
impl CbProducts for RealAdapter {
    async fn products(&self) -> Result<Vec<Product>, CandelaError> {
        let url = self.endpoint(&["products"])?;
        self.get_json(url, &[], "products", true).await
    }
}

#[async_trait]
impl CbTicker for RealAdapter {
    async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError> {
        let url = self.endpoint(&["products", symbol, "ticker"])?;
        self.get_json(url, &[], &format!("ticker for {symbol}"), true)
            .await
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn CbCandles {
    /// Build a `CbCandles` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CbCandles>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, DateTime<Utc>, DateTime<Utc>, u32) -> Result<Vec<RawCandle>, CandelaError>,
    {
        struct FnCandles<F>(F);
        #[async_trait]
        impl<F> CbCandles for FnCandles<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    DateTime<Utc>,
                    DateTime<Utc>,
                    u32,
                ) -> Result<Vec<RawCandle>, CandelaError>,
        {
            async fn candles(
                &self,
                symbol: &str,
                start: DateTime<Utc>,
                end: DateTime<Utc>,
                granularity: u32,
            ) -> Result<Vec<RawCandle>, CandelaError> {
                (self.0)(symbol.to_string(), start, end, granularity)
            }
        }
        Arc::new(FnCandles(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn CbProducts {
    /// Build a `CbProducts` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CbProducts>
    where
        F: Send + Sync + 'static + Fn() -> Result<Vec<Product>, CandelaError>,
    {
        struct FnProducts<F>(F);
        #[async_trait]
        impl<F> CbProducts for FnProducts<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Vec<Product>, CandelaError>,
        {
            async fn products(&self) -> Result<Vec<Product>, CandelaError> {
                (self.0)()
            }
        }
        Arc::new(FnProducts(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn CbTicker {
    /// Build a `CbTicker` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CbTicker>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<Ticker, CandelaError>,
    {
        struct FnTicker<F>(F);
        #[async_trait]
        impl<F> CbTicker for FnTicker<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<Ticker, CandelaError>,
        {
            async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError> {
                (self.0)(symbol.to_string())
            }
        }
        Arc::new(FnTicker(f))
    }
}

/// Hand out shared adapter handles for each capability (tests only).
///
/// Unimplemented capabilities default to `unsupported` errors so tests only
/// override what they exercise.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn CbCandles>`.
    fn clone_arc_candles(&self) -> Arc<dyn CbCandles> {
        <dyn CbCandles>::from_fn(|_, _, _, _| Err(CandelaError::unsupported("candles")))
    }
    /// Clone as `Arc<dyn CbProducts>`.
    fn clone_arc_products(&self) -> Arc<dyn CbProducts> {
        <dyn CbProducts>::from_fn(|| Err(CandelaError::unsupported("products")))
    }
    /// Clone as `Arc<dyn CbTicker>`.
    fn clone_arc_ticker(&self) -> Arc<dyn CbTicker> {
        <dyn CbTicker>::from_fn(|_| Err(CandelaError::unsupported("ticker")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_candles(&self) -> Arc<dyn CbCandles> {
        Arc::new(self.clone()) as Arc<dyn CbCandles>
    }
    fn clone_arc_products(&self) -> Arc<dyn CbProducts> {
        Arc::new(self.clone()) as Arc<dyn CbProducts>
    }
    fn clone_arc_ticker(&self) -> Arc<dyn CbTicker> {
        Arc::new(self.clone()) as Arc<dyn CbTicker>
    }
}
