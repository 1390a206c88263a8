//! Entry points for the fuzz targets under `fuzz/`.
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{AnalyzerArgs, parse_duration_arg};
use crate::config::types::ConfigFile;
use crate::config::{AnalyzerConfig, apply_config};
use crate::error::{AppError, AppResult, ConfigError};

thread_local! {
    static BASE_MATCHES: ArgMatches =
        AnalyzerArgs::command().get_matches_from(["histsim", "0.1", "1"]);
}

/// Parses a duration argument (e.g. `15s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input).map_err(AppError::from)
}

/// Parses TOML config text, merges it over default arguments and validates
/// the result.
///
/// # Errors
///
/// Returns an error when the TOML is invalid or the merged config fails
/// validation.
pub fn apply_config_from_toml(input: &str) -> AppResult<AnalyzerConfig> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from("<fuzz>"),
            source: err,
        })
    })?;
    BASE_MATCHES.with(|matches| {
        let mut args = AnalyzerArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, &config)?;
        Ok(AnalyzerConfig::from_args(&args)?)
    })
}
