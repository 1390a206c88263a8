//! Range-vector `rate()` extrapolation over histogram snapshots.
//!
//! Mirrors how the query engine turns the first and last samples inside a
//! lookback window into a per-second rate: the sampled interval is stretched
//! towards each window edge by the real gap when that gap is under 1.1x the
//! average scrape gap, and by half a scrape gap otherwise.
//!
//! Counter resets are not detected. A later snapshot with a lower count
//! produces a negative rate for that bucket, exactly as the simulated
//! dashboard query path would.
use crate::error::QuantileError;
use crate::histogram::{BucketSet, CumulativeBuckets, HistogramSnapshot};

#[cfg(test)]
mod tests;

/// Multiplier on the average scrape gap below which the distance to a window
/// edge is extrapolated in full.
const EXTRAPOLATION_THRESHOLD: f64 = 1.1;

/// Per-second rate of every bucket over a window, shaped like a snapshot.
#[derive(Debug, Clone)]
pub struct RateVector {
    buckets: BucketSet,
    rates: Vec<f64>,
    total: f64,
    extrapolated_interval: f64,
}

impl RateVector {
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Seconds the observed span was stretched to before dividing.
    #[must_use]
    pub const fn extrapolated_interval(&self) -> f64 {
        self.extrapolated_interval
    }
}

impl CumulativeBuckets for RateVector {
    fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    fn cumulative(&self, index: usize) -> Option<f64> {
        self.rates.get(index).copied()
    }

    fn total(&self) -> f64 {
        self.total
    }
}

/// Computes the extrapolated per-second rate of every bucket (and `+Inf`)
/// between the first and last snapshot, for the window
/// `[window_start, window_end]` in seconds.
///
/// # Errors
///
/// Returns an error when fewer than two snapshots are given, when the
/// snapshots are out of order or use different bucket layouts, or when the
/// sampled interval or the window has zero length.
pub fn extrapolate(
    snapshots: &[HistogramSnapshot],
    window_start: f64,
    window_end: f64,
) -> Result<RateVector, QuantileError> {
    let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) else {
        return Err(QuantileError::TooFewSnapshots { actual: 0 });
    };
    if snapshots.len() < 2 {
        return Err(QuantileError::TooFewSnapshots {
            actual: snapshots.len(),
        });
    }
    validate_sequence(snapshots)?;

    let window = window_end - window_start;
    if window <= 0.0 {
        return Err(QuantileError::ZeroWindow);
    }
    let sampled_interval = last.at - first.at;
    if sampled_interval <= 0.0 {
        return Err(QuantileError::ZeroSampledInterval);
    }

    let duration_to_start = first.at - window_start;
    let duration_to_end = window_end - last.at;
    let gaps = snapshots.len().saturating_sub(1) as f64;
    let average_gap = sampled_interval / gaps;
    let threshold = average_gap * EXTRAPOLATION_THRESHOLD;

    let mut extrapolated_interval = sampled_interval;
    extrapolated_interval += if duration_to_start < threshold {
        duration_to_start
    } else {
        average_gap / 2.0
    };
    extrapolated_interval += if duration_to_end < threshold {
        duration_to_end
    } else {
        average_gap / 2.0
    };
    let factor = extrapolated_interval / sampled_interval / window;

    let rates = first
        .counts
        .counts()
        .iter()
        .zip(last.counts.counts())
        .map(|(from, to)| (*to as f64 - *from as f64) * factor)
        .collect();
    let total = (last.counts.inf_count() as f64 - first.counts.inf_count() as f64) * factor;

    Ok(RateVector {
        buckets: first.counts.buckets().clone(),
        rates,
        total,
        extrapolated_interval,
    })
}

fn validate_sequence(snapshots: &[HistogramSnapshot]) -> Result<(), QuantileError> {
    let mut previous: Option<&HistogramSnapshot> = None;
    for (index, snapshot) in snapshots.iter().enumerate() {
        if let Some(previous) = previous {
            if !snapshot
                .counts
                .buckets()
                .same_layout(previous.counts.buckets())
            {
                return Err(QuantileError::BucketLayoutMismatch { index });
            }
            if snapshot.at < previous.at {
                return Err(QuantileError::SnapshotsUnordered { index });
            }
        }
        previous = Some(snapshot);
    }
    Ok(())
}
