use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One native candle exactly as the exchange reports it.
///
/// On the wire a candle is a six-element array
/// `[time, low, high, open, close, volume]`; this type reads and writes that
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCandleRow", into = "RawCandleRow")]
pub struct RawCandle {
    /// Bucket start in seconds since the Unix epoch.
    pub time: i64,
    /// Lowest traded price.
    pub low: f64,
    /// Highest traded price.
    pub high: f64,
    /// First traded price.
    pub open: f64,
    /// Last traded price.
    pub close: f64,
    /// Base-currency volume.
    pub volume: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCandleRow(i64, f64, f64, f64, f64, f64);

impl From<RawCandleRow> for RawCandle {
    fn from(RawCandleRow(time, low, high, open, close, volume): RawCandleRow) -> Self {
        Self {
            time,
            low,
            high,
            open,
            close,
            volume,
        }
    }
}

impl From<RawCandle> for RawCandleRow {
    fn from(c: RawCandle) -> Self {
        Self(c.time, c.low, c.high, c.open, c.close, c.volume)
    }
}

impl RawCandle {
    /// Bucket start as a UTC instant, or `None` when out of chrono's range.
    #[must_use]
    pub fn ts(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Resampled OHLCV row for one target-timeframe bucket.
///
/// `volume` is the arithmetic mean of the constituent native volumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start.
    #[serde(rename = "date")]
    pub ts: DateTime<Utc>,
    /// Open of the earliest constituent.
    pub open: f64,
    /// Maximum high across constituents.
    pub high: f64,
    /// Minimum low across constituents.
    pub low: f64,
    /// Close of the latest constituent.
    pub close: f64,
    /// Mean constituent volume.
    pub volume: f64,
}

impl From<Candle> for RawCandle {
    fn from(c: Candle) -> Self {
        Self {
            time: c.ts.timestamp(),
            low: c.low,
            high: c.high,
            open: c.open,
            close: c.close,
            volume: c.volume,
        }
    }
}

/// OHLC-only projection of a [`Candle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Bucket start.
    #[serde(rename = "date")]
    pub ts: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
}

impl From<Candle> for OhlcBar {
    fn from(c: Candle) -> Self {
        Self {
            ts: c.ts,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        }
    }
}
