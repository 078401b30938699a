use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with orchestrator endpoints and keep error labels
/// consistent across connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Native candle pages for a single product.
    Candles,
    /// Bulk download of resampled candles across products.
    DownloadCandles,
    /// Listing of tradable products.
    Products,
    /// Point-in-time ticker for a single product.
    Ticker,
}

impl Capability {
    /// Stable string label used in errors and telemetry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candles => "candles",
            Self::DownloadCandles => "download:candles",
            Self::Products => "products",
            Self::Ticker => "ticker",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
