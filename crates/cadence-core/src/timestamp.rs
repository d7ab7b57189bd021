//! Parsing for Slack `ts` values (`<unixSeconds>.<fraction>`).

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Reasons a raw `ts` value cannot be turned into an instant.
pub enum TimestampError {
    #[error("timestamp '{0}' has no '.' separator")]
    MissingSeparator(String),
    #[error("invalid seconds component '{0}'")]
    InvalidSeconds(String),
    #[error("invalid fraction component '{0}'")]
    InvalidFraction(String),
    #[error("timestamp '{0}' is outside the representable range")]
    OutOfRange(String),
}

/// Parses a Slack message timestamp into a UTC instant.
///
/// The value is split on the first `.`. The left side is whole seconds since
/// the Unix epoch and the right side is read as a nanosecond count, so
/// `"1512085950.000123"` lands 123ns after the second. Fractions outside
/// `0..1_000_000_000` carry over into the seconds.
pub fn parse_slack_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let (seconds_raw, fraction_raw) = raw
        .split_once('.')
        .ok_or_else(|| TimestampError::MissingSeparator(raw.to_string()))?;
    let seconds = seconds_raw
        .parse::<i64>()
        .map_err(|_| TimestampError::InvalidSeconds(seconds_raw.to_string()))?;
    let fraction = fraction_raw
        .parse::<i64>()
        .map_err(|_| TimestampError::InvalidFraction(fraction_raw.to_string()))?;

    DateTime::<Utc>::from_timestamp(seconds, 0)
        .and_then(|base| base.checked_add_signed(TimeDelta::nanoseconds(fraction)))
        .ok_or_else(|| TimestampError::OutOfRange(raw.to_string()))
}
