use serde::{Serialize, Serializer};

use crate::error::AppResult;
use crate::quantile::QuantileLevel;

/// Relative gap between estimate and truth, `|1 - max/min| * 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorRatio {
    Percent(f64),
    /// One side of the ratio was zero (or the ratio was not finite).
    Degenerate,
}

impl ErrorRatio {
    #[must_use]
    pub fn between(actual: f64, estimated: f64) -> Self {
        if actual == 0.0 || estimated == 0.0 {
            return ErrorRatio::Degenerate;
        }
        let high = actual.max(estimated);
        let low = actual.min(estimated);
        let percent = (1.0 - high / low).abs() * 100.0;
        if percent.is_finite() {
            ErrorRatio::Percent(percent)
        } else {
            ErrorRatio::Degenerate
        }
    }

    #[must_use]
    pub const fn percent(self) -> Option<f64> {
        match self {
            ErrorRatio::Percent(value) => Some(value),
            ErrorRatio::Degenerate => None,
        }
    }
}

impl std::fmt::Display for ErrorRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorRatio::Percent(value) => write!(f, "{:.2}%", value),
            ErrorRatio::Degenerate => f.write_str("n/a"),
        }
    }
}

impl Serialize for ErrorRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ErrorRatio::Percent(value) => serializer.serialize_f64(*value),
            ErrorRatio::Degenerate => serializer.serialize_none(),
        }
    }
}

/// True vs. bucket-estimated quantile for one chunk or window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuantileErrorReport {
    pub quantile: QuantileLevel,
    pub actual: f64,
    pub estimated: f64,
    pub error: ErrorRatio,
}

impl QuantileErrorReport {
    #[must_use]
    pub fn new(quantile: QuantileLevel, actual: f64, estimated: f64) -> Self {
        Self {
            quantile,
            actual,
            estimated,
            error: ErrorRatio::between(actual, estimated),
        }
    }
}

/// What part of the input a window covered.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WindowSpan {
    /// 1-based sample ordinals, inclusive.
    Samples { first: u64, last: u64 },
    /// Seconds since the first sample, `[start, end)`.
    Time { start: f64, end: f64 },
}

impl std::fmt::Display for WindowSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowSpan::Samples { first, last } => write!(f, "samples {}-{}", first, last),
            WindowSpan::Time { start, end } => write!(f, "[{}s, {}s)", start, end),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub index: usize,
    pub span: WindowSpan,
    pub samples: usize,
    pub reports: Vec<QuantileErrorReport>,
}

/// Receives each evaluated chunk or window as soon as it is produced.
pub trait WindowSink {
    /// # Errors
    ///
    /// Returns an error when the window cannot be written out.
    fn accept(&mut self, window: WindowReport) -> AppResult<()>;
}
