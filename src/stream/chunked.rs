use super::evaluate::{compare_levels, emit};
use super::{StreamProcessor, StreamStats};
use crate::error::{AppResult, ConfigError};
use crate::histogram::{BucketSet, CumulativeHistogram};
use crate::input::Sample;
use crate::quantile::{QuantileLevel, RawSampleBuffer};
use crate::report::{WindowSink, WindowSpan};

/// Evaluates every `chunk_size` consecutive samples on their own.
pub struct ChunkedProcessor {
    levels: Vec<QuantileLevel>,
    chunk_size: usize,
    histogram: CumulativeHistogram,
    raw: RawSampleBuffer,
    chunk_first: u64,
    stats: StreamStats,
}

impl ChunkedProcessor {
    /// # Errors
    ///
    /// Returns an error when `chunk_size` is zero.
    pub fn new(
        buckets: BucketSet,
        levels: Vec<QuantileLevel>,
        chunk_size: usize,
    ) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::ChunkSizeZero);
        }
        Ok(Self {
            levels,
            chunk_size,
            histogram: CumulativeHistogram::new(buckets),
            raw: RawSampleBuffer::with_capacity(chunk_size),
            chunk_first: 1,
            stats: StreamStats::default(),
        })
    }

    fn flush(&mut self, sink: &mut dyn WindowSink) -> AppResult<()> {
        if self.raw.is_empty() {
            return Ok(());
        }
        let samples = self.raw.len();
        let outcome = compare_levels(&self.levels, &mut self.raw, &self.histogram.snapshot());
        let span = WindowSpan::Samples {
            first: self.chunk_first,
            last: self.stats.samples,
        };
        self.histogram.reset();
        self.raw.clear();
        self.chunk_first = self.stats.samples.saturating_add(1);
        emit(outcome, span, samples, &mut self.stats, sink)
    }
}

impl StreamProcessor for ChunkedProcessor {
    fn ingest(&mut self, sample: &Sample, sink: &mut dyn WindowSink) -> AppResult<()> {
        self.stats.samples = self.stats.samples.saturating_add(1);
        self.histogram.add_datum(sample.value);
        self.raw.push(sample.value);
        if self.raw.len() >= self.chunk_size {
            self.flush(sink)?;
        }
        Ok(())
    }

    fn finish(&mut self, sink: &mut dyn WindowSink) -> AppResult<()> {
        self.flush(sink)
    }

    fn stats(&self) -> StreamStats {
        self.stats
    }
}
