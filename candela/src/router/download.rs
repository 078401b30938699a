use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use candela_core::{CandelaError, Candle, CandleWindow, Capability};

use crate::Candela;

/// Per-symbol failure collected during a bulk download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadWarning {
    /// Symbol whose pipeline failed.
    pub symbol: String,
    /// The error that aborted it.
    pub error: CandelaError,
}

/// Result of a bulk download.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadReport {
    /// Resampled candles keyed by symbol, for every symbol that succeeded.
    pub series: BTreeMap<String, Vec<Candle>>,
    /// One entry per symbol that failed.
    pub warnings: Vec<DownloadWarning>,
}

/// Builder to run the candle pipeline for several symbols at once.
pub struct DownloadBuilder<'a> {
    candela: &'a Candela,
    symbols: Vec<String>,
    timeframe: String,
    limit: usize,
    from: Option<DateTime<Utc>>,
}

impl<'a> DownloadBuilder<'a> {
    /// Create a new builder bound to a `Candela` instance.
    ///
    /// Defaults: no symbols, `"1h"` timeframe, `limit = 300`, no start date.
    #[must_use]
    pub fn new(candela: &'a Candela) -> Self {
        Self {
            candela,
            symbols: Vec::new(),
            timeframe: "1h".to_string(),
            limit: candela_core::MAX_LIMIT,
            from: None,
        }
    }

    /// Replace the symbol list.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a symbol appears twice.
    pub fn symbols<S: AsRef<str>>(mut self, symbols: &[S]) -> Result<Self, CandelaError> {
        let mut seen = HashSet::new();
        for s in symbols {
            let s = s.as_ref();
            if !seen.insert(s) {
                return Err(CandelaError::InvalidArg(format!(
                    "duplicate symbol '{s}' in symbols list"
                )));
            }
        }
        self.symbols = symbols.iter().map(|s| s.as_ref().to_string()).collect();
        Ok(self)
    }

    /// Append one symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol is already in the list.
    pub fn add_symbol(mut self, symbol: impl Into<String>) -> Result<Self, CandelaError> {
        let symbol = symbol.into();
        if self.symbols.contains(&symbol) {
            return Err(CandelaError::InvalidArg(format!(
                "duplicate symbol '{symbol}' already exists in symbols list"
            )));
        }
        self.symbols.push(symbol);
        Ok(self)
    }

    /// Target timeframe label. Validated in [`run`](Self::run).
    #[must_use]
    pub fn timeframe(mut self, label: impl Into<String>) -> Self {
        self.timeframe = label.into();
        self
    }

    /// Rows wanted per symbol; clamped to `[5, 300]`.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Earliest bucket start wanted.
    #[must_use]
    pub const fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Run one pipeline per symbol concurrently and collect the results.
    ///
    /// Behavior:
    /// - Each symbol's pipeline is sequential and paced as in
    ///   [`Candela::fetch_ohlcv`]; different symbols run concurrently.
    /// - A failing symbol is recorded in `warnings` without affecting the others.
    /// - The configured request deadline bounds the whole batch.
    ///
    /// # Errors
    /// `InvalidArg` for an empty or duplicated symbol list or a missing start
    /// date, `UnsupportedTimeframe` for an unknown label (before any fetch), and
    /// `RequestTimeout` when the deadline elapses.
    pub async fn run(self) -> Result<DownloadReport, CandelaError> {
        if self.symbols.is_empty() {
            return Err(CandelaError::InvalidArg(
                "no symbols specified for download".into(),
            ));
        }
        let mut seen = HashSet::new();
        for s in &self.symbols {
            if !seen.insert(s.as_str()) {
                return Err(CandelaError::InvalidArg(format!(
                    "duplicate symbol '{s}' detected in symbols list"
                )));
            }
        }
        let from = self.from.ok_or_else(|| {
            CandelaError::InvalidArg("download requires a start date; call from(...)".into())
        })?;
        let window = CandleWindow::new(&self.timeframe, self.limit, from)?;

        let candela = self.candela;
        let tasks = self.symbols.iter().map(|symbol| async move {
            (symbol.clone(), candela.run_pipeline(symbol, &window).await)
        });

        let joined = candela
            .with_deadline(Capability::DownloadCandles, async {
                Ok(futures::future::join_all(tasks).await)
            })
            .await?;

        let mut report = DownloadReport::default();
        for (symbol, result) in joined {
            match result {
                Ok(rows) => {
                    report.series.insert(symbol, rows);
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(%symbol, %error, "download failed for symbol");
                    report.warnings.push(DownloadWarning { symbol, error });
                }
            }
        }
        Ok(report)
    }
}

impl Candela {
    /// Start a bulk download across several symbols.
    #[must_use]
    pub fn download(&self) -> DownloadBuilder<'_> {
        DownloadBuilder::new(self)
    }
}
