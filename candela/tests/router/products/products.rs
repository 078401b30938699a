use std::sync::Arc;

use candela::{Candela, CandelaError};
use candela_mock::MockConnector;

use crate::helpers::{BTC_USD, BareConnector, candela_with};

#[tokio::test]
async fn symbols_are_product_ids() {
    let candela = candela_with(Arc::new(MockConnector::new()));
    let symbols = candela.symbols().await.unwrap();
    assert_eq!(symbols, vec!["BTC-USD", "ETH-USD", "ETH-BTC"]);
    let products = candela.products().await.unwrap();
    assert_eq!(products[2].quote_currency.as_deref(), Some("BTC"));
}

#[tokio::test]
async fn ticker_passthrough() {
    let candela = candela_with(Arc::new(MockConnector::new()));
    let t = candela.ticker(BTC_USD).await.unwrap();
    assert_eq!(t.price_f64(), Some(100.5));
    let err = candela.ticker("NOPE-USD").await.unwrap_err();
    assert_eq!(err, CandelaError::not_found("ticker for NOPE-USD"));
}

#[tokio::test]
async fn first_capable_connector_serves_each_capability() {
    let candela = Candela::builder()
        .with_connector(Arc::new(BareConnector))
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    assert_eq!(candela.symbols().await.unwrap().len(), 3);
}

#[tokio::test]
async fn missing_capabilities_are_unsupported() {
    let candela = Candela::builder()
        .with_connector(Arc::new(BareConnector))
        .build()
        .unwrap();
    assert_eq!(
        candela.products().await.unwrap_err(),
        CandelaError::unsupported("products")
    );
    assert_eq!(
        candela.ticker(BTC_USD).await.unwrap_err(),
        CandelaError::unsupported("ticker")
    );
}
