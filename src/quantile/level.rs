use serde::Serialize;

use crate::error::ConfigError;

/// Levels evaluated when none are configured.
pub const DEFAULT_LEVELS: [f64; 7] = [0.999, 0.99, 0.98, 0.95, 0.75, 0.50, 0.25];

/// A quantile level strictly inside `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct QuantileLevel(f64);

impl QuantileLevel {
    /// # Errors
    ///
    /// Returns an error when `value` is not strictly between 0 and 1.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::QuantileOutOfRange { value })
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn defaults() -> Vec<QuantileLevel> {
        DEFAULT_LEVELS.iter().copied().map(QuantileLevel).collect()
    }
}

impl std::str::FromStr for QuantileLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|err| ConfigError::InvalidQuantile {
                value: s.to_owned(),
                source: err,
            })?;
        QuantileLevel::new(value)
    }
}

impl std::fmt::Display for QuantileLevel {
    /// Renders as a percentile label, e.g. `p50` or `p99.9`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let percent = format!("{:.3}", self.0 * 100.0);
        let trimmed = percent.trim_end_matches('0').trim_end_matches('.');
        write!(f, "p{}", trimmed)
    }
}
