use std::sync::Arc;
use std::time::Duration;

use candela_core::connector::{CandleProvider, ProductsProvider, TickerProvider};
use candela_core::{
    CandelaConfig, CandelaConnector, CandelaError, Capability, Clock, Pacer, Pacing, SystemClock,
    pacer_for,
};

/// Orchestrator that runs candle pipelines against registered connectors.
pub struct Candela {
    pub(crate) connectors: Vec<Arc<dyn CandelaConnector>>,
    pub(crate) cfg: CandelaConfig,
    pub(crate) pacer: Arc<dyn Pacer>,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Builder for constructing a `Candela` orchestrator with custom configuration.
pub struct CandelaBuilder {
    connectors: Vec<Arc<dyn CandelaConnector>>,
    cfg: CandelaConfig,
    pacer: Option<Arc<dyn Pacer>>,
    clock: Arc<dyn Clock>,
}

impl Default for CandelaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CandelaBuilder {
    /// Create a new builder with defaults: no connectors, 333 ms between
    /// pages, at most 1000 pages per call, no deadline, wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: CandelaConfig::default(),
            pacer: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Register a connector.
    ///
    /// Each capability is served by the first registered connector that
    /// advertises it.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn CandelaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CandelaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select the built-in pacing policy. Clears any custom pacer.
    #[must_use]
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.cfg.pacing = pacing;
        self.pacer = None;
        self
    }

    /// Install a custom pacer, overriding the configured `Pacing`.
    #[must_use]
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Override the source of "now" used for the first page of every call.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Cap the number of pages a single call may fetch.
    ///
    /// When the cap is hit pagination stops and the pages collected so far
    /// are used as if the start date had been reached.
    #[must_use]
    pub const fn max_pages(mut self, n: usize) -> Self {
        self.cfg.max_pages = n;
        self
    }

    /// Bound every call (all pages plus aggregation) by a deadline.
    ///
    /// When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Candela` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector) or if `max_pages` is zero.
    pub fn build(self) -> Result<Candela, CandelaError> {
        if self.connectors.is_empty() {
            return Err(CandelaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.max_pages == 0 {
            return Err(CandelaError::InvalidArg(
                "max_pages must be at least 1".to_string(),
            ));
        }
        let pacer = self.pacer.unwrap_or_else(|| pacer_for(self.cfg.pacing));
        Ok(Candela {
            connectors: self.connectors,
            cfg: self.cfg,
            pacer,
            clock: self.clock,
        })
    }
}

impl Candela {
    /// Start building a new `Candela` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use candela::{Candela, Pacing};
    /// use candela_mock::MockConnector;
    ///
    /// let candela = Candela::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .pacing(Pacing::None)
    ///     .max_pages(50)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> CandelaBuilder {
        CandelaBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CandelaConfig {
        &self.cfg
    }

    pub(crate) fn candle_provider(&self) -> Result<&dyn CandleProvider, CandelaError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_candle_provider())
            .ok_or_else(|| CandelaError::unsupported(Capability::Candles.as_str()))
    }

    pub(crate) fn products_provider(&self) -> Result<&dyn ProductsProvider, CandelaError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_products_provider())
            .ok_or_else(|| CandelaError::unsupported(Capability::Products.as_str()))
    }

    pub(crate) fn ticker_provider(&self) -> Result<&dyn TickerProvider, CandelaError> {
        self.connectors
            .iter()
            .find_map(|c| c.as_ticker_provider())
            .ok_or_else(|| CandelaError::unsupported(Capability::Ticker.as_str()))
    }

    /// Run `fut` under the configured request deadline, if any.
    pub(crate) async fn with_deadline<T, Fut>(
        &self,
        capability: Capability,
        fut: Fut,
    ) -> Result<T, CandelaError>
    where
        Fut: std::future::Future<Output = Result<T, CandelaError>>,
    {
        match self.cfg.request_timeout {
            Some(deadline) => tokio::time::timeout(deadline, fut)
                .await
                .unwrap_or_else(|_| Err(CandelaError::request_timeout(capability.as_str()))),
            None => fut.await,
        }
    }
}
