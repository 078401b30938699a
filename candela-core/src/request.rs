use chrono::{DateTime, Utc};

use crate::CandelaError;

/// One bounded page request against a native candle endpoint.
///
/// Validated on construction: non-empty symbol, positive granularity, and
/// `start < end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    symbol: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    granularity: u32,
}

impl CandleRequest {
    /// Build a validated request.
    ///
    /// # Errors
    /// Returns `CandelaError::InvalidArg` if the symbol is blank, the
    /// granularity is zero, or the window is empty or inverted.
    pub fn try_new(
        symbol: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: u32,
    ) -> Result<Self, CandelaError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(CandelaError::InvalidArg("symbol must not be empty".into()));
        }
        if granularity == 0 {
            return Err(CandelaError::InvalidArg(
                "granularity must be positive".into(),
            ));
        }
        if start >= end {
            return Err(CandelaError::InvalidArg(format!(
                "candle window start {start} must precede end {end}"
            )));
        }
        Ok(Self {
            symbol,
            start,
            end,
            granularity,
        })
    }

    /// Product symbol, e.g. `BTC-USD`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Inclusive window start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive window end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Native granularity in seconds.
    #[must_use]
    pub const fn granularity(&self) -> u32 {
        self.granularity
    }
}
