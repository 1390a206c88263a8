use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{
    AnalyzerArgs, PositiveUsize, parse_exponential_buckets, parse_linear_buckets,
    parse_log_linear_buckets,
};
use crate::error::ConfigError;
use crate::quantile::QuantileLevel;

use super::types::ConfigFile;

const BUCKET_SOURCES: [&str; 4] = [
    "buckets",
    "linear_buckets",
    "exponential_buckets",
    "log_linear_buckets",
];

/// Applies configuration values to CLI arguments. Values given on the command
/// line are left alone.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut AnalyzerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if config.rate == Some(true) && config.chunk_size.is_some() {
        return Err(ConfigError::Conflict {
            left: "rate",
            right: "chunk_size",
        });
    }

    if !BUCKET_SOURCES.iter().any(|name| is_cli(matches, name)) {
        apply_bucket_source(args, config)?;
    }

    if !is_cli(matches, "input")
        && let Some(input) = config.input.clone()
    {
        args.input = Some(input);
    }

    if !is_cli(matches, "chunk_size")
        && let Some(chunk_size) = config.chunk_size
    {
        args.chunk_size = PositiveUsize::try_from(chunk_size)?;
    }

    if !is_cli(matches, "rate")
        && !is_cli(matches, "chunk_size")
        && let Some(rate) = config.rate
    {
        args.rate = rate;
    }

    if !is_cli(matches, "sampling_interval")
        && let Some(interval) = config.sampling_interval.as_ref()
    {
        args.sampling_interval = interval.to_duration()?;
    }

    if !is_cli(matches, "lookback")
        && let Some(lookback) = config.lookback.as_ref()
    {
        args.lookback = lookback.to_duration()?;
    }

    if !is_cli(matches, "quantiles")
        && let Some(quantiles) = config.quantiles.as_ref()
    {
        if quantiles.is_empty() {
            return Err(ConfigError::QuantilesEmpty);
        }
        args.quantiles = quantiles
            .iter()
            .map(|value| QuantileLevel::new(*value))
            .collect::<Result<_, _>>()?;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "windows")
        && let Some(windows) = config.windows
    {
        args.windows = windows;
    }

    Ok(())
}

fn apply_bucket_source(args: &mut AnalyzerArgs, config: &ConfigFile) -> Result<(), ConfigError> {
    let sources = [
        ("buckets", config.buckets.is_some()),
        ("linear_buckets", config.linear_buckets.is_some()),
        ("exponential_buckets", config.exponential_buckets.is_some()),
        ("log_linear_buckets", config.log_linear_buckets.is_some()),
    ];
    let mut present = sources.iter().filter(|(_, set)| *set).map(|(name, _)| *name);
    if let (Some(left), Some(right)) = (present.next(), present.next()) {
        return Err(ConfigError::Conflict { left, right });
    }

    if let Some(buckets) = config.buckets.clone() {
        args.buckets = buckets;
    }
    if let Some(spec) = config.linear_buckets.as_deref() {
        args.linear_buckets = Some(parse_linear_buckets(spec)?);
    }
    if let Some(spec) = config.exponential_buckets.as_deref() {
        args.exponential_buckets = Some(parse_exponential_buckets(spec)?);
    }
    if let Some(spec) = config.log_linear_buckets.as_deref() {
        args.log_linear_buckets = Some(parse_log_linear_buckets(spec)?);
    }
    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
