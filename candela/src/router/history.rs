use chrono::{DateTime, Utc};

use candela_core::{
    CandelaError, Candle, CandleWindow, Capability, OhlcBar, merge_fragments, resample,
    trim_to_window,
};

use super::paginate::paginate;
use crate::Candela;

impl Candela {
    /// Fetch resampled OHLCV candles for `symbol`.
    ///
    /// Behavior:
    /// - `timeframe` must be a registered label; unknown labels fail before any I/O.
    /// - `limit` is clamped to `[5, 300]`; at most that many rows are returned.
    /// - Rows are ascending by bucket start, unique, and all at or after `from`.
    /// - `volume` is the mean of the constituent native volumes.
    ///
    /// # Errors
    /// `UnsupportedTimeframe` for an unknown label, `Unsupported` when no
    /// connector serves candles, `InvalidArg` when the connector does not
    /// advertise the timeframe's native granularity, `RequestTimeout` when the configured deadline
    /// elapses, and any `FetchFailed`/`MalformedResponse` from a page (which
    /// discards the pages collected so far).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::history::fetch_ohlcv",
            skip_all,
            fields(symbol = %symbol, timeframe = %timeframe, limit = limit, from = %from),
        )
    )]
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
        from: DateTime<Utc>,
    ) -> Result<Vec<Candle>, CandelaError> {
        let window = CandleWindow::new(timeframe, limit, from)?;
        self.with_deadline(Capability::Candles, self.run_pipeline(symbol, &window))
            .await
    }

    /// Fetch resampled OHLC bars (no volume) for `symbol`.
    ///
    /// Shares the pipeline, pacing, and trimming rules of [`fetch_ohlcv`](Self::fetch_ohlcv).
    ///
    /// # Errors
    /// Same as [`fetch_ohlcv`](Self::fetch_ohlcv).
    pub async fn fetch_ohlc(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
        from: DateTime<Utc>,
    ) -> Result<Vec<OhlcBar>, CandelaError> {
        let rows = self.fetch_ohlcv(symbol, timeframe, limit, from).await?;
        Ok(rows.into_iter().map(OhlcBar::from).collect())
    }

    /// Paginate, merge, resample, and trim without applying the deadline.
    pub(crate) async fn run_pipeline(
        &self,
        symbol: &str,
        window: &CandleWindow,
    ) -> Result<Vec<Candle>, CandelaError> {
        let provider = self.candle_provider()?;
        let granularity = window.timeframe().granularity;
        if !provider.supported_granularities().contains(&granularity) {
            return Err(CandelaError::InvalidArg(format!(
                "timeframe '{}' needs {granularity}s candles, which the connector does not serve",
                window.timeframe().label
            )));
        }
        let fragments = paginate(
            provider,
            symbol,
            window,
            self.clock.as_ref(),
            self.pacer.as_ref(),
            self.cfg.max_pages,
        )
        .await?;

        let series = merge_fragments(fragments);
        let resampled = resample(series, window.timeframe().rule);
        let out = trim_to_window(resampled, window.from(), window.limit());
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = out.len(), rule = %window.timeframe().rule, "pipeline done");
        Ok(out)
    }
}
