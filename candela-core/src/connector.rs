use async_trait::async_trait;

use crate::CandelaError;
use crate::request::CandleRequest;
use crate::timeframe::NATIVE_GRANULARITIES;
use crate::types::{Product, RawCandle, Ticker};

/// Focused role trait for connectors that serve native candles.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Fetch the native candles of one bounded window.
    ///
    /// Rows come back in whatever order the exchange uses (newest first for
    /// Coinbase); callers must not rely on it.
    async fn candles(&self, req: &CandleRequest) -> Result<Vec<RawCandle>, CandelaError>;

    /// Granularities (seconds) this connector can serve.
    fn supported_granularities(&self) -> &'static [u32] {
        NATIVE_GRANULARITIES
    }
}

/// Focused role trait for connectors that list tradable products.
#[async_trait]
pub trait ProductsProvider: Send + Sync {
    /// Fetch every listed product.
    async fn products(&self) -> Result<Vec<Product>, CandelaError>;
}

/// Focused role trait for connectors that provide last-trade snapshots.
#[async_trait]
pub trait TickerProvider: Send + Sync {
    /// Fetch the ticker of one product.
    async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError>;
}

/// Main connector trait implemented by exchange crates. Exposes capability discovery.
pub trait CandelaConnector: Send + Sync {
    /// A stable identifier, e.g. `"candela-coinbase"`.
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise candle capability by returning a usable trait object reference when supported.
    fn as_candle_provider(&self) -> Option<&dyn CandleProvider> {
        None
    }

    /// Advertise product listing capability.
    fn as_products_provider(&self) -> Option<&dyn ProductsProvider> {
        None
    }

    /// Advertise ticker capability.
    fn as_ticker_provider(&self) -> Option<&dyn TickerProvider> {
        None
    }
}
