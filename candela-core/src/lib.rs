//! candela-core
//!
//! Core types, traits, and utilities shared across the candela ecosystem.
//!
//! - `connector`: the `CandelaConnector` trait and capability provider traits.
//! - `timeframe`: the static timeframe registry and resample rules.
//! - `window`: per-call request window (clamped limit, start date, timeframe).
//! - `timeseries`: helpers to merge, resample, and trim candle series.
//! - `pacing` / `clock`: injectable seams for rate limiting and "now".
//!
//! Async runtime (Tokio)
//! ---------------------
//! `pacing::FixedDelay` sleeps with `tokio::time::sleep`, so pipelines that
//! use it must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Injectable source of the current time.
pub mod clock;
/// Connector capability traits and the primary `CandelaConnector` interface.
pub mod connector;
/// Parsing of caller-supplied start dates.
pub mod dates;
/// Rate-limit policies applied between page fetches.
pub mod pacing;
/// Validated single-page candle request.
pub mod request;
/// Timeframe registry mapping labels to native granularity and resample rule.
pub mod timeframe;
/// Time-series utilities for merging, resampling, and trimming.
pub mod timeseries;
/// Re-exports of the shared DTOs and error type.
pub mod types;
/// Per-call request window.
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use connector::CandelaConnector;
pub use dates::parse_from_date;
pub use pacing::{FixedDelay, NoPacing, Pacer, pacer_for};
pub use request::CandleRequest;
pub use timeframe::{NATIVE_GRANULARITIES, ResampleRule, TIMEFRAMES, TimeframeSpec};
pub use timeseries::merge::merge_fragments;
pub use timeseries::resample::resample;
pub use timeseries::trim::trim_to_window;
pub use types::*;
pub use window::{CandleWindow, MAX_LIMIT, MIN_LIMIT};
