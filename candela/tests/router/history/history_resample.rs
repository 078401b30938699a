use std::sync::Arc;

use candela_mock::MockConnector;
use chrono::{Datelike, TimeDelta, Timelike, Weekday};

use crate::helpers::{BTC_USD, NOW, assert_strictly_ascending, candela_with, now};

#[tokio::test]
async fn three_minute_bars_aggregate_one_minute_candles() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());
    let from = now() - TimeDelta::minutes(30);

    let rows = candela.fetch_ohlcv(BTC_USD, "3m", 30, from).await.unwrap();

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].granularity(), 60);

    // 31 one-minute candles from now-30m to now fall into 11 buckets
    assert_eq!(rows.len(), 11);
    assert_strictly_ascending(&rows, |c| c.ts);
    assert_eq!(rows[0].ts, from);
    assert_eq!(rows[10].ts.timestamp(), NOW);

    let b = rows[0].ts.timestamp();
    let parts: Vec<_> = (0..3).map(|i| MockConnector::candle_at(b + i * 60, 60)).collect();
    assert_eq!(rows[0].open, parts[0].open);
    assert_eq!(rows[0].close, parts[2].close);
    assert_eq!(rows[0].high, parts.iter().map(|c| c.high).fold(f64::MIN, f64::max));
    assert_eq!(rows[0].low, parts.iter().map(|c| c.low).fold(f64::MAX, f64::min));
    let mean = parts.iter().map(|c| c.volume).sum::<f64>() / 3.0;
    assert!((rows[0].volume - mean).abs() < 1e-9);

    // the newest bucket has a single constituent
    let tail = MockConnector::candle_at(NOW, 60);
    assert_eq!(rows[10].volume, tail.volume);
}

#[tokio::test]
async fn eight_hour_bars_are_built_from_hourly_candles() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());

    let rows = candela
        .fetch_ohlcv(BTC_USD, "8h", 60, now() - TimeDelta::days(30))
        .await
        .unwrap();

    assert!(mock.requests().iter().all(|r| r.granularity() == 3_600));
    assert!(!rows.is_empty());
    for c in &rows {
        assert_eq!(c.ts.hour() % 8, 0, "{}", c.ts);
        assert_eq!(c.ts.minute(), 0);
    }
}

#[tokio::test]
async fn weekly_bars_start_on_epoch_aligned_thursdays() {
    let mock = Arc::new(MockConnector::new());
    let candela = candela_with(mock.clone());

    let rows = candela
        .fetch_ohlcv(BTC_USD, "1w", 60, now() - TimeDelta::days(120))
        .await
        .unwrap();

    assert!(!rows.is_empty());
    assert!(rows.iter().all(|c| c.ts.weekday() == Weekday::Thu));
    assert!(rows.len() <= 60);
}
