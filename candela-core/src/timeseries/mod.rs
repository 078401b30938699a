//! Time-series utilities applied after pagination.
//!
//! - `merge`: concatenate page fragments, drop duplicate timestamps, sort.
//! - `resample`: aggregate native candles into target-timeframe buckets.
//! - `trim`: cut a resampled series down to the caller's window.
/// Merge of paginated fragments into one ascending series.
pub mod merge;
/// Bucket aggregation of native candles.
pub mod resample;
/// Start-date filter and row cap.
pub mod trim;
