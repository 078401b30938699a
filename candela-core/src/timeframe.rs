use core::fmt;
use core::str::FromStr;

use crate::CandelaError;

/// Granularities (seconds) the exchange's candle endpoint serves natively.
pub const NATIVE_GRANULARITIES: &[u32] = &[60, 300, 900, 3_600, 21_600, 86_400];

/// Unit of a [`ResampleRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RuleUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl RuleUnit {
    const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "D",
        }
    }
}

/// Target bucket width used to re-aggregate native candles.
///
/// Buckets are aligned to the Unix epoch: a candle at `t` belongs to the bucket
/// starting at `t - t.rem_euclid(width)`. Rules render and parse with the
/// labels of the mapping table (`"3min"`, `"1h"`, `"30D"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResampleRule {
    count: u32,
    unit: RuleUnit,
}

impl ResampleRule {
    /// Rule of `n` seconds.
    #[must_use]
    pub const fn seconds(n: u32) -> Self {
        Self {
            count: n,
            unit: RuleUnit::Second,
        }
    }

    /// Rule of `n` minutes.
    #[must_use]
    pub const fn minutes(n: u32) -> Self {
        Self {
            count: n,
            unit: RuleUnit::Minute,
        }
    }

    /// Rule of `n` hours.
    #[must_use]
    pub const fn hours(n: u32) -> Self {
        Self {
            count: n,
            unit: RuleUnit::Hour,
        }
    }

    /// Rule of `n` days.
    #[must_use]
    pub const fn days(n: u32) -> Self {
        Self {
            count: n,
            unit: RuleUnit::Day,
        }
    }

    /// Bucket width in seconds.
    #[must_use]
    pub const fn width_seconds(self) -> i64 {
        self.count as i64 * self.unit.seconds()
    }

    /// Start (epoch seconds) of the bucket containing `ts`.
    #[must_use]
    pub const fn bucket_start(self, ts: i64) -> i64 {
        let step = self.width_seconds();
        ts - ts.rem_euclid(step)
    }
}

impl fmt::Display for ResampleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for ResampleRule {
    type Err = CandelaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|ch: char| !ch.is_ascii_digit())
            .ok_or_else(|| CandelaError::InvalidArg(format!("resample rule '{s}' has no unit")))?;
        let (num, unit) = s.split_at(split);
        let count: u32 = if num.is_empty() {
            1
        } else {
            num.parse()
                .map_err(|_| CandelaError::InvalidArg(format!("invalid resample rule '{s}'")))?
        };
        if count == 0 {
            return Err(CandelaError::InvalidArg(format!(
                "resample rule '{s}' has zero width"
            )));
        }
        let unit = match unit.trim() {
            "s" | "S" => RuleUnit::Second,
            "min" | "T" => RuleUnit::Minute,
            "h" | "H" => RuleUnit::Hour,
            "D" | "d" => RuleUnit::Day,
            other => {
                return Err(CandelaError::InvalidArg(format!(
                    "unknown resample unit '{other}' in '{s}'"
                )));
            }
        };
        Ok(Self { count, unit })
    }
}

/// One row of the timeframe registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeSpec {
    /// Caller-facing label, e.g. `"3m"`.
    pub label: &'static str,
    /// Native granularity (seconds) requested from the exchange.
    pub granularity: u32,
    /// Bucket rule applied to the native candles.
    pub rule: ResampleRule,
}

impl TimeframeSpec {
    const fn new(label: &'static str, granularity: u32, rule: ResampleRule) -> Self {
        Self {
            label,
            granularity,
            rule,
        }
    }

    /// True when the exchange serves this timeframe directly and resampling
    /// only regroups candles one-to-one.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.rule.width_seconds() == self.granularity as i64
    }

    /// Look up a timeframe by label.
    ///
    /// # Errors
    /// Returns `CandelaError::UnsupportedTimeframe` when `label` is not registered.
    pub fn lookup(label: &str) -> Result<&'static Self, CandelaError> {
        TIMEFRAMES
            .iter()
            .find(|tf| tf.label == label)
            .ok_or_else(|| CandelaError::unsupported_timeframe(label))
    }

    /// All registered labels, in table order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        TIMEFRAMES.iter().map(|tf| tf.label)
    }
}

/// The registry. Labels whose width is not a native granularity are built by
/// aggregating the largest native granularity that divides them.
pub static TIMEFRAMES: &[TimeframeSpec] = &[
    TimeframeSpec::new("1m", 60, ResampleRule::minutes(1)),
    TimeframeSpec::new("3m", 60, ResampleRule::minutes(3)),
    TimeframeSpec::new("5m", 300, ResampleRule::minutes(5)),
    TimeframeSpec::new("15m", 900, ResampleRule::minutes(15)),
    TimeframeSpec::new("30m", 900, ResampleRule::minutes(30)),
    TimeframeSpec::new("1h", 3_600, ResampleRule::hours(1)),
    TimeframeSpec::new("2h", 3_600, ResampleRule::hours(2)),
    TimeframeSpec::new("4h", 3_600, ResampleRule::hours(4)),
    TimeframeSpec::new("6h", 21_600, ResampleRule::hours(6)),
    TimeframeSpec::new("8h", 3_600, ResampleRule::hours(8)),
    TimeframeSpec::new("12h", 21_600, ResampleRule::hours(12)),
    TimeframeSpec::new("1d", 86_400, ResampleRule::days(1)),
    TimeframeSpec::new("3d", 86_400, ResampleRule::days(3)),
    TimeframeSpec::new("1w", 86_400, ResampleRule::days(7)),
    TimeframeSpec::new("1M", 86_400, ResampleRule::days(30)),
];
