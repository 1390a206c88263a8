use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_arg};
use crate::error::ConfigError;

/// Keys accepted in `histsim.toml` / `histsim.json`; each mirrors a CLI flag.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub buckets: Option<Vec<f64>>,
    pub linear_buckets: Option<String>,
    pub exponential_buckets: Option<String>,
    pub log_linear_buckets: Option<String>,
    pub input: Option<String>,
    pub chunk_size: Option<usize>,
    pub rate: Option<bool>,
    pub sampling_interval: Option<DurationValue>,
    pub lookback: Option<DurationValue>,
    pub quantiles: Option<Vec<f64>>,
    pub output_format: Option<OutputFormat>,
    pub windows: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ConfigError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
