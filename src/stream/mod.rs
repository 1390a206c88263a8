//! Bounded-memory processing of a sample stream, either in fixed-size
//! chunks or in sliding time windows of histogram snapshots.
mod chunked;
mod evaluate;
mod stopwatch;
mod windowed;


use std::time::Duration;

use crate::error::{AppResult, ConfigError};
use crate::histogram::BucketSet;
use crate::input::Sample;
use crate::quantile::QuantileLevel;
use crate::report::WindowSink;

pub use chunked::ChunkedProcessor;
pub use stopwatch::Stopwatch;
pub use windowed::{WindowedProcessor, window_capacity};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Scrape interval of the simulated Prometheus server.
pub const DEFAULT_SAMPLING_INTERVAL: Duration = Duration::from_secs(15);
/// Range of the simulated `rate(...[5m])` selector.
pub const DEFAULT_LOOKBACK: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    Chunked {
        chunk_size: usize,
    },
    Windowed {
        sampling_interval: Duration,
        lookback: Duration,
    },
}

impl StreamMode {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            StreamMode::Chunked { .. } => "chunked",
            StreamMode::Windowed { .. } => "rate",
        }
    }

    #[must_use]
    pub const fn requires_timestamps(&self) -> bool {
        matches!(self, StreamMode::Windowed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub samples: u64,
    pub windows_processed: usize,
    pub windows_skipped: usize,
}

impl StreamStats {
    const fn next_window_index(&self) -> usize {
        self.windows_processed
            .saturating_add(self.windows_skipped)
            .saturating_add(1)
    }
}

pub trait StreamProcessor {
    /// Feeds one sample, emitting any chunk or window it completes.
    ///
    /// # Errors
    ///
    /// Returns an error when the sample cannot be used by this mode or when
    /// evaluating a completed window fails for a reason other than an empty
    /// population.
    fn ingest(&mut self, sample: &Sample, sink: &mut dyn WindowSink) -> AppResult<()>;

    /// Flushes the trailing partial chunk or window at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an error when evaluating the final window fails.
    fn finish(&mut self, sink: &mut dyn WindowSink) -> AppResult<()>;

    fn stats(&self) -> StreamStats;
}

/// Builds the processor for `mode`.
///
/// # Errors
///
/// Returns an error when the mode's sizes are invalid.
pub fn build_processor(
    mode: &StreamMode,
    buckets: BucketSet,
    levels: Vec<QuantileLevel>,
) -> Result<Box<dyn StreamProcessor>, ConfigError> {
    match *mode {
        StreamMode::Chunked { chunk_size } => Ok(Box::new(ChunkedProcessor::new(
            buckets, levels, chunk_size,
        )?)),
        StreamMode::Windowed {
            sampling_interval,
            lookback,
        } => Ok(Box::new(WindowedProcessor::new(
            buckets,
            levels,
            sampling_interval,
            lookback,
        )?)),
    }
}
