use std::collections::VecDeque;
use std::time::Duration;

use super::evaluate::{compare_levels, emit};
use super::{StreamProcessor, StreamStats};
use crate::error::{AppError, AppResult, ConfigError, InputError, MalformedKind};
use crate::histogram::{BucketSet, CumulativeHistogram, HistogramSnapshot};
use crate::input::Sample;
use crate::quantile::{QuantileLevel, RawSampleBuffer};
use crate::rate::extrapolate;
use crate::report::{WindowSink, WindowSpan};

/// Number of snapshots a lookback window holds.
///
/// # Errors
///
/// Returns an error when the interval is zero, when the lookback is not a
/// whole number of intervals, or when it spans fewer than two.
pub fn window_capacity(sampling_interval: Duration, lookback: Duration) -> Result<usize, ConfigError> {
    let interval_ms = sampling_interval.as_millis();
    let lookback_ms = lookback.as_millis();
    if interval_ms == 0 || lookback_ms == 0 {
        return Err(ConfigError::DurationZero);
    }
    if lookback_ms % interval_ms != 0 {
        return Err(ConfigError::LookbackNotAligned {
            lookback_ms,
            interval_ms,
        });
    }
    let capacity = lookback_ms / interval_ms;
    if capacity < 2 {
        return Err(ConfigError::LookbackTooShort {
            lookback_ms,
            interval_ms,
        });
    }
    usize::try_from(capacity).map_err(|_err| ConfigError::DurationOverflow)
}

/// Simulates `histogram_quantile(q, rate(h[lookback]))` as a dashboard
/// would evaluate it after every scrape.
///
/// One histogram accumulates for the whole run, the way a live process's
/// counters do, and is snapshotted at the end of every sampling interval
/// (aligned to the first sample). Once `capacity` snapshots are held the
/// window is evaluated and the oldest snapshot is evicted together with the
/// raw values it covered.
pub struct WindowedProcessor {
    levels: Vec<QuantileLevel>,
    interval: f64,
    lookback: f64,
    capacity: usize,
    origin: Option<f64>,
    intervals_closed: u64,
    running: CumulativeHistogram,
    snapshots: VecDeque<HistogramSnapshot>,
    raw: VecDeque<(f64, f64)>,
    pending: bool,
    evaluated_latest: bool,
    stats: StreamStats,
}

impl WindowedProcessor {
    /// # Errors
    ///
    /// Returns an error when the interval and lookback do not form a window
    /// of at least two snapshots.
    pub fn new(
        buckets: BucketSet,
        levels: Vec<QuantileLevel>,
        sampling_interval: Duration,
        lookback: Duration,
    ) -> Result<Self, ConfigError> {
        let capacity = window_capacity(sampling_interval, lookback)?;
        Ok(Self {
            levels,
            interval: sampling_interval.as_secs_f64(),
            lookback: lookback.as_secs_f64(),
            capacity,
            origin: None,
            intervals_closed: 0,
            running: CumulativeHistogram::new(buckets),
            snapshots: VecDeque::with_capacity(capacity),
            raw: VecDeque::new(),
            pending: false,
            evaluated_latest: false,
            stats: StreamStats::default(),
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn next_boundary(&self) -> f64 {
        interval_end(self.intervals_closed, self.interval)
    }

    fn close_interval(&mut self, sink: &mut dyn WindowSink) -> AppResult<()> {
        let at = self.next_boundary();
        self.snapshots
            .push_back(HistogramSnapshot::new(at, self.running.snapshot()));
        self.intervals_closed = self.intervals_closed.saturating_add(1);
        self.pending = false;
        self.evaluated_latest = false;

        if self.snapshots.len() >= self.capacity {
            self.evaluate(sink)?;
            if let Some(evicted) = self.snapshots.pop_front() {
                while self
                    .raw
                    .front()
                    .is_some_and(|(elapsed, _)| *elapsed < evicted.at)
                {
                    self.raw.pop_front();
                }
            }
        }
        Ok(())
    }

    fn evaluate(&mut self, sink: &mut dyn WindowSink) -> AppResult<()> {
        let Some(window_end) = self.snapshots.back().map(|snapshot| snapshot.at) else {
            return Ok(());
        };
        let window_start = window_end - self.lookback;
        self.evaluated_latest = true;

        let mut raw: RawSampleBuffer = self
            .raw
            .iter()
            .filter(|(elapsed, _)| *elapsed >= window_start && *elapsed < window_end)
            .map(|(_, value)| *value)
            .collect();
        let samples = raw.len();
        let outcome = extrapolate(self.snapshots.make_contiguous(), window_start, window_end)
            .and_then(|rates| compare_levels(&self.levels, &mut raw, &rates));
        let span = WindowSpan::Time {
            start: window_start.max(0.0),
            end: window_end,
        };
        emit(outcome, span, samples, &mut self.stats, sink)
    }
}

/// Seconds after the origin at which interval `closed` (0-based) ends.
pub(super) fn interval_end(closed: u64, interval: f64) -> f64 {
    (closed as f64 + 1.0) * interval
}

impl StreamProcessor for WindowedProcessor {
    fn ingest(&mut self, sample: &Sample, sink: &mut dyn WindowSink) -> AppResult<()> {
        let Some(time) = sample.time else {
            return Err(AppError::input(InputError::malformed(
                sample.line_number,
                "",
                MalformedKind::MissingTimestamp,
            )));
        };
        let origin = *self.origin.get_or_insert(time);
        let elapsed = time - origin;
        while elapsed >= self.next_boundary() {
            self.close_interval(sink)?;
        }
        self.running.add_datum(sample.value);
        self.raw.push_back((elapsed, sample.value));
        self.pending = true;
        self.stats.samples = self.stats.samples.saturating_add(1);
        Ok(())
    }

    fn finish(&mut self, sink: &mut dyn WindowSink) -> AppResult<()> {
        if self.origin.is_none() {
            return Ok(());
        }
        if self.pending {
            self.close_interval(sink)?;
        }
        if !self.evaluated_latest && self.snapshots.len() >= 2 {
            self.evaluate(sink)?;
        }
        Ok(())
    }

    fn stats(&self) -> StreamStats {
        self.stats
    }
}
