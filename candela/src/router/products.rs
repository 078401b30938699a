use candela_core::{CandelaError, Capability, Product, Ticker};

use crate::Candela;

impl Candela {
    /// List every product the exchange offers.
    ///
    /// # Errors
    /// `Unsupported` when no connector lists products, otherwise any
    /// connector error.
    pub async fn products(&self) -> Result<Vec<Product>, CandelaError> {
        let provider = self.products_provider()?;
        self.with_deadline(Capability::Products, provider.products())
            .await
    }

    /// Product identifiers usable as `symbol` arguments, in exchange order.
    ///
    /// # Errors
    /// Same as [`products`](Self::products).
    pub async fn symbols(&self) -> Result<Vec<String>, CandelaError> {
        Ok(self.products().await?.into_iter().map(|p| p.id).collect())
    }

    /// Latest trade and best quotes for `symbol`.
    ///
    /// # Errors
    /// `Unsupported` when no connector provides tickers, `NotFound` for an
    /// unknown product, otherwise any connector error.
    pub async fn ticker(&self, symbol: &str) -> Result<Ticker, CandelaError> {
        let provider = self.ticker_provider()?;
        self.with_deadline(Capability::Ticker, provider.ticker(symbol))
            .await
    }
}
