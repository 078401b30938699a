use chrono::{DateTime, Utc};

use crate::timeframe::ResampleRule;
use crate::types::{Candle, RawCandle};

/// Aggregate native candles into `rule`-wide buckets.
///
/// Per non-empty bucket: `open` of the earliest row, max `high`, min `low`,
/// `close` of the latest row, and the arithmetic mean of `volume`. Empty
/// buckets produce no row. Input order does not matter; output is ascending.
#[must_use]
pub fn resample(candles: Vec<RawCandle>, rule: ResampleRule) -> Vec<Candle> {
    resample_by(candles, |time| {
        DateTime::from_timestamp(rule.bucket_start(time), 0)
    })
}

/// Generic resampler that groups sorted candles by a bucket function and
/// aggregates OHLCV within each bucket. Rows whose bucket cannot be
/// represented are skipped.
fn resample_by<F>(mut candles: Vec<RawCandle>, bucket_of: F) -> Vec<Candle>
where
    F: Fn(i64) -> Option<DateTime<Utc>>,
{
    if candles.is_empty() {
        return Vec::new();
    }

    candles.sort_by_key(|c| c.time);

    let mut out: Vec<Candle> = Vec::new();
    let mut iter = candles.into_iter();
    let Some((mut cur_bucket, first)) = iter.by_ref().find_map(|c| bucket_of(c.time).map(|b| (b, c)))
    else {
        return out;
    };
    let mut agg = BucketAgg::start(&first);

    for c in iter {
        let Some(bucket) = bucket_of(c.time) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(time = c.time, "candle outside representable range; skipped");
            continue;
        };
        if bucket == cur_bucket {
            agg.absorb(&c);
        } else {
            out.push(agg.finish(cur_bucket));
            cur_bucket = bucket;
            agg = BucketAgg::start(&c);
        }
    }
    out.push(agg.finish(cur_bucket));

    out
}

struct BucketAgg {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    vol_sum: f64,
    rows: u32,
}

impl BucketAgg {
    const fn start(c: &RawCandle) -> Self {
        Self {
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            vol_sum: c.volume,
            rows: 1,
        }
    }

    fn absorb(&mut self, c: &RawCandle) {
        self.high = self.high.max(c.high);
        self.low = self.low.min(c.low);
        self.close = c.close;
        self.vol_sum += c.volume;
        self.rows += 1;
    }

    fn finish(self, ts: DateTime<Utc>) -> Candle {
        Candle {
            ts,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.vol_sum / f64::from(self.rows),
        }
    }
}
