//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default pause between successive candle pages, in milliseconds.
pub(crate) const DEFAULT_PAGE_DELAY_MS: u64 = 333;

/// Default ceiling on the number of pages a single call may fetch.
pub(crate) const DEFAULT_MAX_PAGES: usize = 1_000;

/// Rate-limit policy applied between successive page fetches of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Pacing {
    /// Issue pages back to back.
    None,
    /// Sleep for a fixed delay before every page after the first.
    FixedDelay {
        /// Delay in milliseconds.
        delay_ms: u64,
    },
}

impl Default for Pacing {
    fn default() -> Self {
        Self::FixedDelay {
            delay_ms: DEFAULT_PAGE_DELAY_MS,
        }
    }
}

impl Pacing {
    /// Delay to wait between pages, or `None` when pacing is disabled.
    #[must_use]
    pub const fn delay(self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::FixedDelay { delay_ms } => Some(Duration::from_millis(delay_ms)),
        }
    }
}

/// Global configuration for the `Candela` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandelaConfig {
    /// Pause policy between successive page fetches.
    pub pacing: Pacing,
    /// Upper bound on pages fetched by one pipeline call. Pagination stops
    /// early (keeping what was collected) once the bound is reached.
    pub max_pages: usize,
    /// Optional deadline for a whole pipeline call (all pages, merge, resample).
    pub request_timeout: Option<Duration>,
}

impl Default for CandelaConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: None,
        }
    }
}

/// Connection settings for the Coinbase Exchange REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinbaseConfig {
    /// Base URL, without a trailing slash.
    pub api_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// User agent sent with every request; the exchange rejects anonymous clients.
    pub user_agent: String,
}

impl Default for CoinbaseConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.exchange.coinbase.com".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("candela/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
