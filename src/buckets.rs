//! Generators for candidate bucket layouts.
use crate::error::ConfigError;
use crate::histogram::BucketSet;

/// A bucket layout described by a generator flag instead of explicit bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BucketGenerator {
    Linear {
        start: f64,
        width: f64,
        count: usize,
    },
    Exponential {
        start: f64,
        factor: f64,
        count: usize,
    },
    LogLinear {
        min_exp: i32,
        max_exp: i32,
        steps: u32,
    },
}

impl BucketGenerator {
    /// # Errors
    ///
    /// Returns an error when the generator arguments are out of range or
    /// produce an invalid bucket set.
    pub fn generate(&self) -> Result<BucketSet, ConfigError> {
        match *self {
            BucketGenerator::Linear {
                start,
                width,
                count,
            } => linear(start, width, count),
            BucketGenerator::Exponential {
                start,
                factor,
                count,
            } => exponential(start, factor, count),
            BucketGenerator::LogLinear {
                min_exp,
                max_exp,
                steps,
            } => log_linear(min_exp, max_exp, steps),
        }
    }
}

/// `count` boundaries starting at `start`, `width` apart.
///
/// # Errors
///
/// Returns an error when `count` is zero, `width` is not positive, or the
/// resulting boundaries are not all positive.
pub fn linear(start: f64, width: f64, count: usize) -> Result<BucketSet, ConfigError> {
    let bounds = prometheus::linear_buckets(start, width, count)
        .map_err(|source| ConfigError::Generator { source })?;
    BucketSet::new(bounds)
}

/// `count` boundaries starting at `start`, each `factor` times the previous.
///
/// # Errors
///
/// Returns an error when `count` is zero, `start` is not positive, or
/// `factor` is not greater than one.
pub fn exponential(start: f64, factor: f64, count: usize) -> Result<BucketSet, ConfigError> {
    let bounds = prometheus::exponential_buckets(start, factor, count)
        .map_err(|source| ConfigError::Generator { source })?;
    BucketSet::new(bounds)
}

/// `steps` evenly spaced boundaries per power of ten from `10^min_exp` up to
/// and including `10^max_exp`.
///
/// `log_linear(-3, -1, 2)` yields `0.001, 0.0055, 0.01, 0.055, 0.1`.
///
/// # Errors
///
/// Returns an error when `min_exp >= max_exp` or `steps` is zero.
pub fn log_linear(min_exp: i32, max_exp: i32, steps: u32) -> Result<BucketSet, ConfigError> {
    if min_exp >= max_exp || steps == 0 {
        return Err(ConfigError::InvalidGenerator {
            value: format!("{},{},{}", min_exp, max_exp, steps),
            expected: "min_exp < max_exp and steps >= 1",
        });
    }
    let mut bounds = Vec::new();
    for exponent in min_exp..max_exp {
        let decade = 10f64.powi(exponent);
        for step in 0..steps {
            bounds.push(decade * (1.0 + 9.0 * f64::from(step) / f64::from(steps)));
        }
    }
    bounds.push(10f64.powi(max_exp));
    BucketSet::new(bounds)
}
