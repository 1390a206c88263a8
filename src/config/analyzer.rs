use crate::args::{AnalyzerArgs, OutputFormat};
use crate::error::ConfigError;
use crate::histogram::BucketSet;
use crate::input::InputSource;
use crate::quantile::QuantileLevel;
use crate::stream::{StreamMode, window_capacity};

/// Bucket-quantile interpolation needs a lower and an upper bound.
pub const MIN_BOUNDARIES: usize = 2;

/// Validated settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub buckets: BucketSet,
    pub levels: Vec<QuantileLevel>,
    pub mode: StreamMode,
    pub input: InputSource,
    pub output_format: OutputFormat,
    pub show_windows: bool,
}

impl AnalyzerConfig {
    /// Validates merged arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when no valid bucket layout with at least two bounds
    /// is given, or when the windowed-mode durations do not line up.
    pub fn from_args(args: &AnalyzerArgs) -> Result<Self, ConfigError> {
        let buckets = args.bucket_generator().map_or_else(
            || BucketSet::new(args.buckets.clone()),
            |generator| generator.generate(),
        )?;
        if buckets.len() < MIN_BOUNDARIES {
            return Err(ConfigError::TooFewBoundaries {
                min: MIN_BOUNDARIES,
                actual: buckets.len(),
            });
        }

        let levels = if args.quantiles.is_empty() {
            QuantileLevel::defaults()
        } else {
            distinct_levels(&args.quantiles)
        };

        let mode = if args.rate {
            window_capacity(args.sampling_interval, args.lookback)?;
            StreamMode::Windowed {
                sampling_interval: args.sampling_interval,
                lookback: args.lookback,
            }
        } else {
            StreamMode::Chunked {
                chunk_size: args.chunk_size.get(),
            }
        };

        Ok(Self {
            buckets,
            levels,
            mode,
            input: InputSource::from_arg(args.input.as_deref()),
            output_format: args.output_format,
            show_windows: args.windows,
        })
    }
}

/// Keeps the first occurrence of each level, in the order given.
fn distinct_levels(levels: &[QuantileLevel]) -> Vec<QuantileLevel> {
    let mut distinct: Vec<QuantileLevel> = Vec::with_capacity(levels.len());
    for level in levels {
        if !distinct.contains(level) {
            distinct.push(*level);
        }
    }
    distinct
}
