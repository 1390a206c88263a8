use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{InputError, MalformedKind};

/// Input values are milliseconds; histograms are fed seconds.
pub const MS_PER_SEC: f64 = 1000.0;

/// Naive layouts accepted besides RFC 3339; read as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub line_number: usize,
    /// Seconds since the Unix epoch, when the line carried a timestamp.
    pub time: Option<f64>,
    /// Observed value in seconds.
    pub value: f64,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
///
/// The value is the last whitespace-separated token; anything before it is
/// the timestamp, so `2024-01-01 10:00:00.250 42` works as well as
/// `2024-01-01T10:00:00.250Z 42`.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] when the value or timestamp cannot be
/// parsed, when the value is not finite, or when `require_timestamp` is set
/// and the line only has a value.
pub fn parse_line(
    line: &str,
    line_number: usize,
    require_timestamp: bool,
) -> Result<Option<Sample>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let malformed = |kind| InputError::malformed(line_number, line, kind);

    let (timestamp, value_text) = trimmed
        .rsplit_once(char::is_whitespace)
        .map_or((None, trimmed), |(timestamp, value)| {
            (Some(timestamp.trim()), value)
        });
    let millis: f64 = value_text
        .parse()
        .map_err(|_err| malformed(MalformedKind::InvalidValue))?;
    if !millis.is_finite() {
        return Err(malformed(MalformedKind::NonFiniteValue));
    }

    let time = match timestamp {
        Some(text) => Some(
            parse_timestamp(text)
                .map(epoch_seconds)
                .ok_or_else(|| malformed(MalformedKind::InvalidTimestamp))?,
        ),
        None if require_timestamp => return Err(malformed(MalformedKind::MissingTimestamp)),
        None => None,
    };

    Ok(Some(Sample {
        line_number,
        time,
        value: millis / MS_PER_SEC,
    }))
}

/// Parses an ISO-8601-ish timestamp: RFC 3339 with an offset, or a naive
/// date-time (`T` or space separated, optional fraction) taken as UTC.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS.iter().find_map(|layout| {
        NaiveDateTime::parse_from_str(text, layout)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

fn epoch_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / 1_000_000.0
}
