use chrono::{DateTime, TimeDelta, Utc};

use crate::CandelaError;
use crate::timeframe::TimeframeSpec;

/// Smallest accepted row count; lower requests are raised to it.
pub const MIN_LIMIT: usize = 5;
/// Largest accepted row count; the exchange caps a page at 300 candles.
pub const MAX_LIMIT: usize = 300;
/// Requests below this many rows never fetch more than one page.
const MULTI_PAGE_THRESHOLD: usize = 50;

/// Immutable description of one pipeline call: clamped row count, start date,
/// and the resolved timeframe.
///
/// `limit` means "rows wanted". It sizes every page (`limit` native candles per
/// request) and bounds the length of the trimmed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleWindow {
    limit: usize,
    from: DateTime<Utc>,
    timeframe: &'static TimeframeSpec,
}

impl CandleWindow {
    /// Resolve `timeframe` and clamp `limit` into `[MIN_LIMIT, MAX_LIMIT]`.
    ///
    /// # Errors
    /// Returns `CandelaError::UnsupportedTimeframe` for an unknown label.
    pub fn new(timeframe: &str, limit: usize, from: DateTime<Utc>) -> Result<Self, CandelaError> {
        let timeframe = TimeframeSpec::lookup(timeframe)?;
        Ok(Self {
            limit: Self::clamp_limit(limit),
            from,
            timeframe,
        })
    }

    /// Clamp a caller-supplied row count into `[MIN_LIMIT, MAX_LIMIT]`.
    #[must_use]
    pub const fn clamp_limit(limit: usize) -> usize {
        if limit < MIN_LIMIT {
            MIN_LIMIT
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        }
    }

    /// Clamped row count.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Earliest bucket start the caller wants.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Resolved timeframe.
    #[must_use]
    pub const fn timeframe(&self) -> &'static TimeframeSpec {
        self.timeframe
    }

    /// Time covered by one page: `limit` native candles.
    #[must_use]
    pub fn page_span(&self) -> TimeDelta {
        // limit <= 300 and granularity <= 86_400, so the product fits comfortably.
        TimeDelta::seconds(self.limit as i64 * i64::from(self.timeframe.granularity))
    }

    /// At the floor limit only the most recent bar of each page is wanted.
    #[must_use]
    pub const fn keeps_last_row_only(&self) -> bool {
        self.limit == MIN_LIMIT
    }

    /// Whether the page that starts at `page_start` is the final one.
    ///
    /// Pagination ends once the requested start date falls inside (or after the
    /// start of) the page just fetched, or immediately for small requests.
    #[must_use]
    pub fn is_last_page(&self, page_start: DateTime<Utc>) -> bool {
        self.from > page_start || self.limit < MULTI_PAGE_THRESHOLD
    }
}
