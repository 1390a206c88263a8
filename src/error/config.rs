use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Cannot set both '{left}' and '{right}'.")]
    Conflict {
        left: &'static str,
        right: &'static str,
    },
    #[error("Bucket list must not be empty.")]
    BucketsEmpty,
    #[error("Bucket boundary {index} ({value}) must be a finite number > 0.")]
    BoundaryNotPositive { index: usize, value: f64 },
    #[error(
        "Bucket boundary {index} ({value}) must be greater than the previous boundary ({previous})."
    )]
    BoundariesNotAscending {
        index: usize,
        value: f64,
        previous: f64,
    },
    #[error("Bucket-quantile estimation needs at least {min} boundaries, got {actual}.")]
    TooFewBoundaries { min: usize, actual: usize },
    #[error("Invalid bucket boundary '{value}': {source}")]
    InvalidBoundary {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Invalid bucket generator '{value}'. Expected {expected}.")]
    InvalidGenerator {
        value: String,
        expected: &'static str,
    },
    #[error("Bucket generator failed: {source}")]
    Generator {
        #[source]
        source: prometheus::Error,
    },
    #[error("Chunk size must be >= 1.")]
    ChunkSizeZero,
    #[error("Invalid chunk size '{value}': {source}")]
    InvalidChunkSize {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Quantile '{value}' must be strictly between 0 and 1.")]
    QuantileOutOfRange { value: f64 },
    #[error("Invalid quantile '{value}': {source}")]
    InvalidQuantile {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Quantile list must not be empty.")]
    QuantilesEmpty,
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Lookback ({lookback_ms}ms) must be a multiple of the sampling interval ({interval_ms}ms).")]
    LookbackNotAligned { lookback_ms: u128, interval_ms: u128 },
    #[error("Lookback ({lookback_ms}ms) must cover at least two sampling intervals ({interval_ms}ms).")]
    LookbackTooShort { lookback_ms: u128, interval_ms: u128 },
    #[error("Unsupported output format '{value}'. Expected text or json.")]
    InvalidOutputFormat { value: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
