use std::sync::Arc;
use std::time::Duration;

use candela::{Candela, CandelaError, FixedClock, Pacing};
use candela_mock::MockConnector;

use crate::helpers::{BTC_USD, BareConnector, candela_with, hours_ago, now};

#[tokio::test]
async fn unknown_timeframe_fails_before_any_fetch() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());
    let err = candela
        .fetch_ohlcv(BTC_USD, "7m", 100, hours_ago(10))
        .await
        .unwrap_err();
    assert_eq!(err, CandelaError::unsupported_timeframe("7m"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn failed_page_aborts_the_whole_call() {
    let mock = Arc::new(MockConnector::new().fail_on_call(2));
    let candela = candela_with(mock.clone());
    let err = candela
        .fetch_ohlcv(BTC_USD, "1h", 100, hours_ago(500))
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::FetchFailed { .. }), "{err:?}");
    // no further pages after the failure
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn malformed_page_surfaces_as_malformed_response() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock);
    let err = candela
        .fetch_ohlc("MALFORMED", "1h", 10, hours_ago(10))
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn connector_without_candles_is_unsupported() {
    let candela = Candela::builder()
        .with_connector(Arc::new(BareConnector))
        .build()
        .unwrap();
    let err = candela
        .fetch_ohlcv(BTC_USD, "1h", 10, hours_ago(10))
        .await
        .unwrap_err();
    assert_eq!(err, CandelaError::unsupported("candles"));
}

#[tokio::test(start_paused = true)]
async fn deadline_fails_with_request_timeout() {
    let mock = Arc::new(MockConnector::new());
    let candela = Candela::builder()
        .with_connector(mock)
        .clock(Arc::new(FixedClock(now())))
        .pacing(Pacing::None)
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = candela
        .fetch_ohlcv("TIMEOUT", "1h", 10, hours_ago(10))
        .await
        .unwrap_err();
    assert_eq!(err, CandelaError::request_timeout("candles"));
}

#[tokio::test(start_paused = true)]
async fn deadline_covers_pacing_between_pages() {
    let mock = Arc::new(MockConnector::new());
    let candela = Candela::builder()
        .with_connector(mock.clone())
        .clock(Arc::new(FixedClock(now())))
        .pacing(Pacing::FixedDelay { delay_ms: 333 })
        .request_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let err = candela
        .fetch_ohlcv(BTC_USD, "1h", 100, hours_ago(2_000))
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::RequestTimeout { .. }), "{err:?}");
    // pages at 0, 333, 666 and 999 ms; the fifth would start after the deadline
    assert_eq!(mock.calls(), 4);
}

/// Serves only one-minute candles, delegating the fetch to a mock.
struct MinuteOnly(Arc<MockConnector>);

#[async_trait::async_trait]
impl candela_core::connector::CandleProvider for MinuteOnly {
    async fn candles(
        &self,
        req: &candela_core::CandleRequest,
    ) -> Result<Vec<candela_core::RawCandle>, CandelaError> {
        candela_core::connector::CandleProvider::candles(self.0.as_ref(), req).await
    }

    fn supported_granularities(&self) -> &'static [u32] {
        &[60]
    }
}

impl candela::CandelaConnector for MinuteOnly {
    fn name(&self) -> &'static str {
        "minute-only"
    }

    fn as_candle_provider(&self) -> Option<&dyn candela_core::connector::CandleProvider> {
        Some(self as &dyn candela_core::connector::CandleProvider)
    }
}

#[tokio::test]
async fn granularity_the_connector_does_not_serve_is_rejected_before_any_fetch() {
    let mock = Arc::new(MockConnector::new());
    let candela = Candela::builder()
        .with_connector(Arc::new(MinuteOnly(mock.clone())))
        .clock(Arc::new(FixedClock(now())))
        .pacing(Pacing::None)
        .build()
        .unwrap();

    let err = candela
        .fetch_ohlcv(BTC_USD, "1h", 10, hours_ago(10))
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::InvalidArg(_)), "{err:?}");
    assert_eq!(mock.calls(), 0);

    // 3m is built from 60s candles, which the connector does serve
    let rows = candela
        .fetch_ohlcv(BTC_USD, "3m", 10, hours_ago(1))
        .await
        .unwrap();
    assert!(!rows.is_empty());
    assert_eq!(mock.calls(), 1);
}
