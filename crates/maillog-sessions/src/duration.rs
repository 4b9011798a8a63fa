use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::DurationError;

/// Lexical timestamp format of log lines: `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
/// The fraction is optional; no zone offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// How a session's duration is derived from its start and end timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationMode {
    /// `end - start`, formatted as an absolute elapsed time. Hours may exceed 24.
    #[default]
    Elapsed,
    /// `end - start` added to midnight and printed as a wall-clock time,
    /// wrapping every 24 hours. Matches output of the older tooling: a session
    /// of 49h30m reads `01:30:00`, one whose status precedes its client by
    /// five seconds reads `23:59:55`.
    Legacy,
}

impl std::fmt::Display for DurationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationMode::Elapsed => write!(f, "elapsed"),
            DurationMode::Legacy => write!(f, "legacy"),
        }
    }
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DurationError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|source| {
        DurationError::TimestampParse {
            timestamp: raw.to_string(),
            source,
        }
    })
}

/// Compute the formatted duration between two raw timestamps.
///
/// Returns `Ok(None)` when either timestamp has not been captured yet.
pub fn compute_duration(
    start: &str,
    end: &str,
    mode: DurationMode,
) -> Result<Option<String>, DurationError> {
    if start.is_empty() || end.is_empty() {
        return Ok(None);
    }

    let start_at = parse_timestamp(start)?;
    let end_at = parse_timestamp(end)?;

    let formatted = match mode {
        DurationMode::Elapsed => {
            let delta = end_at - start_at;
            format_elapsed(if delta < Duration::zero() { -delta } else { delta })
        }
        DurationMode::Legacy => format_clock(end_at - start_at),
    };

    Ok(Some(formatted))
}

/// Format a non-negative duration as `HH:MM:SS[.ffffff]`.
fn format_elapsed(delta: Duration) -> String {
    let (seconds, nanos) = split_seconds(delta);
    format!(
        "{:02}:{:02}:{:02}{}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60,
        fraction(nanos)
    )
}

/// Format `00:00:00 + delta` as a time of day.
fn format_clock(delta: Duration) -> String {
    let (seconds, nanos) = split_seconds(delta);
    let of_day = seconds.rem_euclid(SECONDS_PER_DAY);
    format!(
        "{:02}:{:02}:{:02}{}",
        of_day / 3600,
        (of_day % 3600) / 60,
        of_day % 60,
        fraction(nanos)
    )
}

/// Split into whole seconds (floored) and a non-negative nanosecond remainder.
fn split_seconds(delta: Duration) -> (i64, i64) {
    let seconds = delta.num_seconds();
    let nanos = (delta - Duration::seconds(seconds))
        .num_nanoseconds()
        .unwrap_or(0);
    if nanos < 0 {
        (seconds - 1, nanos + NANOS_PER_SECOND)
    } else {
        (seconds, nanos)
    }
}

/// Microsecond fraction with trailing zeros trimmed; empty when zero.
fn fraction(nanos: i64) -> String {
    let micros = nanos / 1_000;
    if micros == 0 {
        return String::new();
    }
    let digits = format!("{:06}", micros);
    format!(".{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elapsed(start: &str, end: &str) -> String {
        compute_duration(start, end, DurationMode::Elapsed)
            .unwrap()
            .unwrap()
    }

    fn legacy(start: &str, end: &str) -> String {
        compute_duration(start, end, DurationMode::Legacy)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_parse_with_and_without_fraction() {
        let with = parse_timestamp("2021-01-01T10:00:00.250000").unwrap();
        let without = parse_timestamp("2021-01-01T10:00:00").unwrap();
        assert_eq!((with - without).num_milliseconds(), 250);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        for raw in [
            "2021-01-01 10:00:00",
            "2021-01-01T10:00:00Z",
            "10:00:00",
            "yesterday",
            "2021-13-01T10:00:00",
        ] {
            assert!(parse_timestamp(raw).is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn test_missing_timestamp_is_noop() {
        assert_eq!(
            compute_duration("", "2021-01-01T10:00:05", DurationMode::Elapsed).unwrap(),
            None
        );
        assert_eq!(
            compute_duration("2021-01-01T10:00:00", "", DurationMode::Legacy).unwrap(),
            None
        );
    }

    #[test]
    fn test_elapsed_whole_seconds() {
        assert_eq!(
            elapsed("2021-01-01T10:00:00.000000", "2021-01-01T10:00:05.000000"),
            "00:00:05"
        );
        assert_eq!(
            elapsed("2021-01-01T10:00:00", "2021-01-01T10:00:00"),
            "00:00:00"
        );
    }

    #[test]
    fn test_elapsed_fraction_is_trimmed() {
        assert_eq!(
            elapsed("2021-01-01T10:00:00.000000", "2021-01-01T10:01:02.500000"),
            "00:01:02.5"
        );
        assert_eq!(
            elapsed("2021-01-01T10:00:00", "2021-01-01T10:00:00.000123"),
            "00:00:00.000123"
        );
    }

    #[test]
    fn test_elapsed_hours_exceed_a_day() {
        assert_eq!(
            elapsed("2021-01-01T10:00:00", "2021-01-03T11:30:00"),
            "49:30:00"
        );
    }

    #[test]
    fn test_elapsed_is_absolute() {
        assert_eq!(
            elapsed("2021-01-01T10:00:05.5", "2021-01-01T10:00:00"),
            "00:00:05.5"
        );
    }

    #[test]
    fn test_legacy_matches_elapsed_within_a_day() {
        assert_eq!(
            legacy("2021-01-01T10:00:00.000000", "2021-01-01T10:00:05.000000"),
            "00:00:05"
        );
        assert_eq!(
            legacy("2021-01-01T10:00:00", "2021-01-01T10:01:02.5"),
            "00:01:02.5"
        );
    }

    #[test]
    fn test_legacy_wraps_multi_day() {
        assert_eq!(
            legacy("2021-01-01T10:00:00", "2021-01-03T11:30:00"),
            "01:30:00"
        );
        assert_eq!(
            elapsed("2021-01-01T10:00:00", "2021-01-03T11:30:00"),
            "49:30:00"
        );
    }

    #[test]
    fn test_legacy_wraps_end_before_start() {
        assert_eq!(
            legacy("2021-01-01T10:00:05", "2021-01-01T10:00:00"),
            "23:59:55"
        );
        assert_eq!(
            legacy("2021-01-01T10:00:00.25", "2021-01-01T10:00:00"),
            "23:59:59.75"
        );
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let err = compute_duration("garbage", "2021-01-01T10:00:00", DurationMode::Elapsed)
            .unwrap_err();
        match err {
            DurationError::TimestampParse { timestamp, .. } => assert_eq!(timestamp, "garbage"),
        }
    }

    #[test]
    fn test_mode_display_and_default() {
        assert_eq!(DurationMode::Elapsed.to_string(), "elapsed");
        assert_eq!(DurationMode::Legacy.to_string(), "legacy");
        assert_eq!(DurationMode::default(), DurationMode::Elapsed);
    }
}
