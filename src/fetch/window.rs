//! Reporting window resolution
//!
//! The window is either given explicitly (`--from`/`--to`), derived from a
//! look-back length (`--last`, default 30 days), or, in "most recent N runs"
//! mode, recomputed afterwards from the runs actually fetched.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::ConfigError;
use crate::metrics::RunRecord;

/// Look-back used when `--last` is empty.
pub const DEFAULT_LOOKBACK: &str = "30d";

const NANOS_PER_SECOND: f64 = 1e9;

/// Inclusive time range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }

    /// Value for the `created` run filter: `<from>..<to>` in RFC3339.
    pub fn created_filter(&self) -> String {
        format!(
            "{}..{}",
            self.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// The span of anchor times across `records`.
    ///
    /// With no records the window runs from the earliest representable time
    /// to `now`.
    pub fn observed(records: &[RunRecord], now: DateTime<Utc>) -> Self {
        let anchors = records.iter().map(RunRecord::anchor_time);
        match (anchors.clone().min(), anchors.max()) {
            (Some(from), Some(to)) => Self { from, to },
            _ => Self {
                from: DateTime::<Utc>::MIN_UTC,
                to: now,
            },
        }
    }
}

fn parse_timestamp(flag: &'static str, value: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ConfigError::InvalidFlag {
            flag,
            reason: format!("{}: {}", value, e),
        })
}

/// Resolve the reporting window from the `--from`, `--to` and `--last` flags.
///
/// `to` defaults to `now`; `from` defaults to `to - last`. Empty strings
/// count as unset.
pub fn resolve_time_range(
    now: DateTime<Utc>,
    from: Option<&str>,
    to: Option<&str>,
    last: Option<&str>,
) -> Result<TimeWindow, ConfigError> {
    fn given(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    let to = match given(to) {
        Some(value) => parse_timestamp("to", value)?,
        None => now,
    };

    let from = match given(from) {
        Some(value) => parse_timestamp("from", value)?,
        None => {
            let lookback = parse_lookback(last.unwrap_or_default())?;
            to.checked_sub_signed(lookback)
                .ok_or_else(|| ConfigError::InvalidFlag {
                    flag: "last",
                    reason: "look-back reaches before the earliest supported date".to_string(),
                })?
        }
    };

    if from >= to {
        return Err(ConfigError::EmptyWindow);
    }
    Ok(TimeWindow { from, to })
}

/// Parse a look-back length.
///
/// Empty input means [`DEFAULT_LOOKBACK`]; otherwise see [`parse_span`].
pub fn parse_lookback(input: &str) -> Result<Duration, ConfigError> {
    let input = input.trim();
    let input = if input.is_empty() {
        DEFAULT_LOOKBACK
    } else {
        input
    };
    parse_span("last", input)
}

/// Parse a duration given on the command line or in the config file.
///
/// Accepts compound clock durations (`90m`, `1h30m`, `1.5h`, `500ms`) and
/// calendar units with a positive, possibly fractional count: `7d`, `4w`,
/// `3mo` (a month is 30 days). `flag` names the source in error messages.
pub fn parse_span(flag: &'static str, input: &str) -> Result<Duration, ConfigError> {
    let input = input.trim().to_lowercase();

    if let Some(duration) = parse_clock_duration(&input) {
        return Ok(duration);
    }

    let units = [
        ("mo", Duration::days(30)),
        ("d", Duration::days(1)),
        ("w", Duration::weeks(1)),
    ];
    for (suffix, unit) in units {
        if let Some(amount) = input.strip_suffix(suffix) {
            return scale(flag, amount, unit);
        }
    }

    Err(ConfigError::InvalidFlag {
        flag,
        reason: format!("unrecognised duration {:?} (try 7d, 4w, 3mo or 12h)", input),
    })
}

fn scale(flag: &'static str, amount: &str, unit: Duration) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidFlag { flag, reason };

    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid count {:?}", amount)))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(invalid("duration must be > 0".to_string()));
    }

    let unit_secs = unit.num_seconds() as f64;
    Ok(Duration::nanoseconds(
        (amount * unit_secs * NANOS_PER_SECOND) as i64,
    ))
}

/// Sequence of `<number><unit>` pairs with units `ns`, `us`, `ms`, `s`,
/// `m`, `h`. Returns `None` when the input isn't in that form.
fn parse_clock_duration(input: &str) -> Option<Duration> {
    if input.is_empty() {
        return None;
    }
    if input == "0" {
        return Some(Duration::zero());
    }

    let mut rest = input;
    let mut nanos = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value: f64 = rest[..number_len].parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => NANOS_PER_SECOND,
            "m" => 60.0 * NANOS_PER_SECOND,
            "h" => 3600.0 * NANOS_PER_SECOND,
            _ => return None,
        };
        nanos += value * per_unit;
        rest = &rest[unit_len..];
    }

    Some(Duration::nanoseconds(nanos as i64))
}
