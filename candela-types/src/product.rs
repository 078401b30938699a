use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tradable product (currency pair) as listed by the exchange.
///
/// Only `id` is required; the remaining fields are kept when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier used as the symbol, e.g. `BTC-USD`.
    pub id: String,
    /// Base currency code.
    #[serde(default)]
    pub base_currency: Option<String>,
    /// Quote currency code.
    #[serde(default)]
    pub quote_currency: Option<String>,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Listing status, e.g. `online`.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether trading is currently disabled.
    #[serde(default)]
    pub trading_disabled: Option<bool>,
}

/// Snapshot of the last trade and best quotes for a product.
///
/// The exchange encodes decimals as strings; they are kept verbatim and the
/// numeric accessors parse on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Last trade identifier.
    #[serde(default)]
    pub trade_id: Option<u64>,
    /// Last trade price.
    #[serde(default)]
    pub price: Option<String>,
    /// Last trade size.
    #[serde(default)]
    pub size: Option<String>,
    /// Best bid.
    #[serde(default)]
    pub bid: Option<String>,
    /// Best ask.
    #[serde(default)]
    pub ask: Option<String>,
    /// Rolling 24h volume.
    #[serde(default)]
    pub volume: Option<String>,
    /// Time of the last trade.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl Ticker {
    /// Last trade price as a float, if present and well-formed.
    #[must_use]
    pub fn price_f64(&self) -> Option<f64> {
        self.price.as_deref().and_then(|p| p.parse().ok())
    }

    /// Midpoint of best bid and ask, if both are present and well-formed.
    #[must_use]
    pub fn mid_f64(&self) -> Option<f64> {
        let bid: f64 = self.bid.as_deref()?.parse().ok()?;
        let ask: f64 = self.ask.as_deref()?.parse().ok()?;
        Some((bid + ask) / 2.0)
    }
}
