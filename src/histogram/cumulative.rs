use super::BucketSet;
use crate::error::QuantileError;

/// Read access to cumulative bucket totals, shared by count snapshots and
/// extrapolated rate vectors so both can be fed to the quantile estimator.
pub trait CumulativeBuckets {
    fn buckets(&self) -> &BucketSet;

    /// Cumulative value of the bucket at `index`; `None` past the last bound.
    fn cumulative(&self, index: usize) -> Option<f64>;

    /// The `+Inf` bucket.
    fn total(&self) -> f64;
}

/// Mutable accumulator of samples into cumulative buckets.
#[derive(Debug, Clone)]
pub struct CumulativeHistogram {
    buckets: BucketSet,
    counts: Vec<u64>,
    total: u64,
    sum: f64,
}

impl CumulativeHistogram {
    #[must_use]
    pub fn new(buckets: BucketSet) -> Self {
        let counts = vec![0; buckets.len()];
        Self {
            buckets,
            counts,
            total: 0,
            sum: 0.0,
        }
    }

    /// Adds one observation to every bucket whose bound is `>= value`, to
    /// `+Inf`, and to the running sum.
    pub fn add_datum(&mut self, value: f64) {
        let first = self.buckets.bucket_index(value);
        for count in self.counts.iter_mut().skip(first) {
            *count = count.saturating_add(1);
        }
        self.total = self.total.saturating_add(1);
        self.sum += value;
    }

    #[must_use]
    pub fn count(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    #[must_use]
    pub const fn inf_count(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    #[must_use]
    pub const fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    /// Copies the current counts out; later `add_datum` calls do not affect
    /// the returned value.
    #[must_use]
    pub fn snapshot(&self) -> BucketCounts {
        BucketCounts {
            buckets: self.buckets.clone(),
            counts: self.counts.clone(),
            total: self.total,
            sum: self.sum,
        }
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|count| *count = 0);
        self.total = 0;
        self.sum = 0.0;
    }
}

/// Frozen copy of a histogram's counts.
#[derive(Debug, Clone)]
pub struct BucketCounts {
    buckets: BucketSet,
    counts: Vec<u64>,
    total: u64,
    sum: f64,
}

impl BucketCounts {
    /// Builds counts directly, e.g. from a scraped exposition.
    ///
    /// # Errors
    ///
    /// Returns an error when `counts` does not have one entry per bound.
    pub fn from_parts(
        buckets: BucketSet,
        counts: Vec<u64>,
        total: u64,
        sum: f64,
    ) -> Result<Self, QuantileError> {
        if counts.len() != buckets.len() {
            return Err(QuantileError::ShapeMismatch {
                boundaries: buckets.len(),
                counts: counts.len(),
            });
        }
        Ok(Self {
            buckets,
            counts,
            total,
            sum,
        })
    }

    #[must_use]
    pub fn count(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub const fn inf_count(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }
}

impl CumulativeBuckets for BucketCounts {
    fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    fn cumulative(&self, index: usize) -> Option<f64> {
        self.counts.get(index).map(|count| *count as f64)
    }

    fn total(&self) -> f64 {
        self.total as f64
    }
}

/// Bucket counts as scraped at `at` seconds into the run.
#[derive(Debug, Clone)]
pub struct HistogramSnapshot {
    pub at: f64,
    pub counts: BucketCounts,
}

impl HistogramSnapshot {
    #[must_use]
    pub const fn new(at: f64, counts: BucketCounts) -> Self {
        Self { at, counts }
    }
}
