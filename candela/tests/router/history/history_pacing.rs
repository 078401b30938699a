use std::sync::Arc;
use std::time::Duration;

use candela::{Candela, FixedClock, Pacing};
use candela_mock::MockConnector;

use crate::helpers::{BTC_USD, CountingPacer, hours_ago, now};

#[tokio::test]
async fn pacer_runs_only_between_pages() {
    let mock = Arc::new(MockConnector::new());
    let pacer = Arc::new(CountingPacer::default());
    let candela = Candela::builder()
        .with_connector(mock.clone())
        .clock(Arc::new(FixedClock(now())))
        .with_pacer(pacer.clone())
        .build()
        .unwrap();

    candela
        .fetch_ohlcv(BTC_USD, "1h", 100, hours_ago(250))
        .await
        .unwrap();
    assert_eq!(mock.calls(), 3);
    assert_eq!(pacer.pauses(), 2);

    // a single-page call never pauses
    candela
        .fetch_ohlcv(BTC_USD, "1h", 10, hours_ago(10))
        .await
        .unwrap();
    assert_eq!(pacer.pauses(), 2);
}

#[tokio::test(start_paused = true)]
async fn default_pacing_waits_333ms_between_pages() {
    let mock = Arc::new(MockConnector::new());
    let candela = Candela::builder()
        .with_connector(mock.clone())
        .clock(Arc::new(FixedClock(now())))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    candela
        .fetch_ohlc(BTC_USD, "1h", 100, hours_ago(250))
        .await
        .unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(666), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(999), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn pacing_can_be_disabled() {
    let mock = Arc::new(MockConnector::new());
    let candela = Candela::builder()
        .with_connector(mock.clone())
        .clock(Arc::new(FixedClock(now())))
        .pacing(Pacing::None)
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    candela
        .fetch_ohlcv(BTC_USD, "1h", 100, hours_ago(250))
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(mock.calls(), 3);
}
