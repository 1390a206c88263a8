use std::str::FromStr;
use std::time::Duration;

use super::types::PositiveUsize;
use crate::buckets::BucketGenerator;
use crate::error::ConfigError;
use crate::quantile::QuantileLevel;

const LINEAR_EXPECTED: &str = "start,width,count";
const EXPONENTIAL_EXPECTED: &str = "start,factor,count";
const LOG_LINEAR_EXPECTED: &str = "min_exp,max_exp,steps";

pub(super) fn parse_boundary(s: &str) -> Result<f64, ConfigError> {
    s.trim()
        .parse::<f64>()
        .map_err(|err| ConfigError::InvalidBoundary {
            value: s.to_owned(),
            source: err,
        })
}

pub(super) fn parse_quantile(s: &str) -> Result<QuantileLevel, ConfigError> {
    s.parse::<QuantileLevel>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ConfigError> {
    s.parse::<PositiveUsize>()
}

pub(crate) fn parse_linear_buckets(s: &str) -> Result<BucketGenerator, ConfigError> {
    let [start, width, count] = split_generator(s, LINEAR_EXPECTED)?;
    Ok(BucketGenerator::Linear {
        start: generator_part(s, start, LINEAR_EXPECTED)?,
        width: generator_part(s, width, LINEAR_EXPECTED)?,
        count: generator_part(s, count, LINEAR_EXPECTED)?,
    })
}

pub(crate) fn parse_exponential_buckets(s: &str) -> Result<BucketGenerator, ConfigError> {
    let [start, factor, count] = split_generator(s, EXPONENTIAL_EXPECTED)?;
    Ok(BucketGenerator::Exponential {
        start: generator_part(s, start, EXPONENTIAL_EXPECTED)?,
        factor: generator_part(s, factor, EXPONENTIAL_EXPECTED)?,
        count: generator_part(s, count, EXPONENTIAL_EXPECTED)?,
    })
}

pub(crate) fn parse_log_linear_buckets(s: &str) -> Result<BucketGenerator, ConfigError> {
    let [min_exp, max_exp, steps] = split_generator(s, LOG_LINEAR_EXPECTED)?;
    Ok(BucketGenerator::LogLinear {
        min_exp: generator_part(s, min_exp, LOG_LINEAR_EXPECTED)?,
        max_exp: generator_part(s, max_exp, LOG_LINEAR_EXPECTED)?,
        steps: generator_part(s, steps, LOG_LINEAR_EXPECTED)?,
    })
}

fn split_generator<'arg>(
    s: &'arg str,
    expected: &'static str,
) -> Result<[&'arg str; 3], ConfigError> {
    let invalid = || ConfigError::InvalidGenerator {
        value: s.to_owned(),
        expected,
    };
    let mut parts = s.split(',').map(str::trim);
    let first = parts.next().ok_or_else(invalid)?;
    let second = parts.next().ok_or_else(invalid)?;
    let third = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok([first, second, third])
}

fn generator_part<T: FromStr>(
    s: &str,
    part: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    part.parse().map_err(|_err| ConfigError::InvalidGenerator {
        value: s.to_owned(),
        expected,
    })
}

/// Parses `250ms`, `15s`, `5m` or `1h`; a bare number is seconds.
///
/// # Errors
///
/// Returns an error when the value is empty, malformed, overflows, or is zero.
pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ConfigError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ConfigError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ConfigError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ConfigError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => Duration::from_secs(number.checked_mul(60).ok_or(ConfigError::DurationOverflow)?),
        "h" => Duration::from_secs(
            number
                .checked_mul(3600)
                .ok_or(ConfigError::DurationOverflow)?,
        ),
        _ => {
            return Err(ConfigError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ConfigError::DurationZero);
    }

    Ok(duration)
}
