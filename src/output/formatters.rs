//! Reusable formatting utilities for CLI output
//!
//! Helpers for durations, rates, timestamps and runner usage shared by the
//! table views.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::metrics::RunnerUsage;

/// Runner labels shown per table cell before the rest are elided.
pub const RUNNER_SUMMARY_LIMIT: usize = 3;

/// Format a duration for humans.
///
/// Returns "-" for zero or negative durations. Anything under a second is
/// shown in milliseconds; longer durations are truncated to whole seconds.
///
/// # Example output
/// - `2h 15m 30s`
/// - `5m 10s`
/// - `45s`
/// - `850ms`
pub fn format_duration(duration: Duration) -> String {
    if duration <= Duration::zero() {
        return "-".to_string();
    }

    let secs = duration.num_seconds();
    if secs == 0 {
        return format!("{}ms", duration.num_milliseconds());
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format a 0-1 failure fraction as a percentage.
pub fn format_failure_rate(rate: f64) -> String {
    if rate <= 0.0 {
        return "0%".to_string();
    }
    format!("{:.1}%", rate * 100.0)
}

/// Format a timestamp as RFC3339 with second precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Compact runner usage, e.g. `ubuntu-latest(12/1h 2m 0s), macos-14(3/9m 0s)`.
///
/// At most `limit` entries are shown; `...` marks the rest.
pub fn format_runner_summary(usages: &[RunnerUsage], limit: usize) -> String {
    if usages.is_empty() {
        return "-".to_string();
    }

    let mut parts: Vec<String> = usages
        .iter()
        .take(limit.max(1))
        .map(|u| format!("{}({}/{})", u.label, u.runs, format_duration(u.duration)))
        .collect();
    if usages.len() > parts.len() {
        parts.push("...".to_string());
    }
    parts.join(", ")
}
