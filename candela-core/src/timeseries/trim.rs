use chrono::{DateTime, Utc};

use crate::types::Candle;

/// Keep rows at or after `from`, then only the most recent `limit` of them.
///
/// The input is expected in ascending order, as produced by
/// [`resample`](super::resample::resample); the order is preserved.
#[must_use]
pub fn trim_to_window(candles: Vec<Candle>, from: DateTime<Utc>, limit: usize) -> Vec<Candle> {
    let mut kept: Vec<Candle> = candles.into_iter().filter(|c| c.ts >= from).collect();
    let excess = kept.len().saturating_sub(limit);
    kept.drain(..excess);
    kept
}
