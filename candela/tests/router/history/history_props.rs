use std::sync::Arc;

use candela::{CandelaError, TimeframeSpec};
use candela_mock::MockConnector;
use chrono::TimeDelta;
use proptest::prelude::*;

use crate::helpers::{BTC_USD, candela_with, now};

fn arb_label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TimeframeSpec::labels().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn results_are_bounded_ordered_and_after_start(
        label in arb_label(),
        limit in 0usize..400,
        lookback_bars in 0i64..1_500,
    ) {
        let tf = TimeframeSpec::lookup(label).unwrap();
        let from = now() - TimeDelta::seconds(lookback_bars * i64::from(tf.granularity));
        let rows = tokio_test::block_on(async move {
            let candela = candela_with(Arc::new(MockConnector::new()));
            candela.fetch_ohlcv(BTC_USD, label, limit, from).await
        })
        .unwrap();

        prop_assert!(rows.len() <= limit.clamp(5, 300));
        prop_assert!(rows.iter().all(|c| c.ts >= from));
        for w in rows.windows(2) {
            prop_assert!(w[0].ts < w[1].ts);
        }
        for c in &rows {
            prop_assert!(c.low <= c.high);
            prop_assert_eq!(c.ts.timestamp().rem_euclid(tf.rule.width_seconds()), 0);
        }
    }

    #[test]
    fn unknown_labels_are_rejected(label in "[0-9]{1,2}[a-zA-Z]{1,3}") {
        prop_assume!(TimeframeSpec::lookup(&label).is_err());
        let result = tokio_test::block_on(async {
            let candela = candela_with(Arc::new(MockConnector::new()));
            candela.fetch_ohlcv(BTC_USD, &label, 10, now()).await
        });
        prop_assert_eq!(result, Err(CandelaError::unsupported_timeframe(label.clone())));
    }
}
