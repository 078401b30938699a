use std::sync::Arc;
use std::time::Duration;

use candela::{Candela, CandelaError, FixedClock, Pacing};
use candela_mock::MockConnector;

use crate::helpers::{BTC_USD, ETH_USD, candela_with, hours_ago, now};

#[tokio::test]
async fn downloads_each_symbol_and_collects_failures() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());

    let report = candela
        .download()
        .symbols(&[BTC_USD, ETH_USD, "FAIL"])
        .unwrap()
        .timeframe("1h")
        .limit(24)
        .from(hours_ago(24))
        .run()
        .await
        .unwrap();

    assert_eq!(report.series.len(), 2);
    assert_eq!(report.series[BTC_USD].len(), 24);
    assert_eq!(report.series[ETH_USD].len(), 24);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].symbol, "FAIL");
    assert!(matches!(
        report.warnings[0].error,
        CandelaError::FetchFailed { .. }
    ));
    assert_eq!(mock.calls(), 3);
}

#[tokio::test]
async fn download_matches_single_symbol_pipeline() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock);
    let single = candela
        .fetch_ohlcv(BTC_USD, "4h", 60, hours_ago(400))
        .await
        .unwrap();
    let report = candela
        .download()
        .add_symbol(BTC_USD)
        .unwrap()
        .timeframe("4h")
        .limit(60)
        .from(hours_ago(400))
        .run()
        .await
        .unwrap();
    assert_eq!(report.series[BTC_USD], single);
}

#[test]
fn duplicate_symbols_are_rejected() {
    let candela = candela_with(Arc::new(MockConnector::new()));
    assert!(matches!(
        candela.download().symbols(&[BTC_USD, BTC_USD]),
        Err(CandelaError::InvalidArg(_))
    ));
    let dup = candela.download().add_symbol(BTC_USD).unwrap().add_symbol(BTC_USD);
    assert!(matches!(dup, Err(CandelaError::InvalidArg(_))));
}

#[tokio::test]
async fn empty_symbol_list_is_rejected() {
    let candela = candela_with(Arc::new(MockConnector::new()));
    let err = candela
        .download()
        .from(hours_ago(1))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::InvalidArg(_)), "{err:?}");
}

#[tokio::test]
async fn missing_start_date_is_rejected() {
    let candela = candela_with(Arc::new(MockConnector::new()));
    let err = candela
        .download()
        .symbols(&[BTC_USD])
        .unwrap()
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, CandelaError::InvalidArg(_)), "{err:?}");
}

#[tokio::test]
async fn unknown_timeframe_fails_before_any_fetch() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());
    let err = candela
        .download()
        .symbols(&[BTC_USD, ETH_USD])
        .unwrap()
        .timeframe("2w")
        .from(hours_ago(1))
        .run()
        .await
        .unwrap_err();
    assert_eq!(err, CandelaError::unsupported_timeframe("2w"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn deadline_bounds_the_whole_batch() {
    let candela = Candela::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .clock(Arc::new(FixedClock(now())))
        .pacing(Pacing::None)
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = candela
        .download()
        .symbols(&[BTC_USD, "TIMEOUT"])
        .unwrap()
        .from(hours_ago(10))
        .run()
        .await
        .unwrap_err();
    assert_eq!(err, CandelaError::request_timeout("download:candles"));
}
