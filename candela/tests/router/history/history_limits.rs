use std::sync::Arc;

use candela_mock::MockConnector;
use chrono::TimeDelta;

use crate::helpers::{BTC_USD, NOW, candela_with, hours_ago, now};

#[tokio::test]
async fn limit_below_floor_is_clamped_and_keeps_last_row_of_page() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());

    let rows = candela
        .fetch_ohlcv(BTC_USD, "1h", 2, hours_ago(48))
        .await
        .unwrap();

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    // clamped to five bars per page
    assert_eq!(reqs[0].end() - reqs[0].start(), TimeDelta::hours(5));
    // the exchange answers newest first, so its last row is the oldest bar
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ts, hours_ago(5));
}

#[tokio::test]
async fn limit_above_ceiling_is_clamped() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());

    let rows = candela
        .fetch_ohlcv(BTC_USD, "1h", 5_000, hours_ago(1_000))
        .await
        .unwrap();

    let reqs = mock.requests();
    assert_eq!(reqs[0].end() - reqs[0].start(), TimeDelta::hours(300));
    assert_eq!(rows.len(), 300);
    assert_eq!(rows.last().unwrap().ts.timestamp(), NOW);
}

#[tokio::test]
async fn result_never_exceeds_limit_for_resampled_timeframes() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());
    for (tf, limit) in [("3m", 40), ("30m", 120), ("4h", 75), ("1d", 5), ("1w", 60)] {
        let rows = candela
            .fetch_ohlcv(BTC_USD, tf, limit, now() - TimeDelta::days(400))
            .await
            .unwrap();
        assert!(rows.len() <= limit, "{tf}: {} rows", rows.len());
        assert!(!rows.is_empty(), "{tf}");
    }
}
