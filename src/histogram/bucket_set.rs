use std::sync::Arc;

use crate::error::ConfigError;

/// Strictly ascending, positive bucket upper bounds (the `le` labels).
///
/// Buckets are addressed by index everywhere; the bound values only feed
/// display and interpolation. Cloning shares the underlying slice.
#[derive(Debug, Clone)]
pub struct BucketSet {
    bounds: Arc<[f64]>,
}

impl BucketSet {
    /// Builds a bucket set from ascending upper bounds.
    ///
    /// # Errors
    ///
    /// Returns an error when the list is empty, when a bound is not a finite
    /// positive number, or when bounds are not strictly ascending.
    pub fn new(bounds: Vec<f64>) -> Result<Self, ConfigError> {
        if bounds.is_empty() {
            return Err(ConfigError::BucketsEmpty);
        }
        let mut previous: Option<f64> = None;
        for (index, value) in bounds.iter().copied().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::BoundaryNotPositive { index, value });
            }
            if let Some(previous) = previous.filter(|previous| value <= *previous) {
                return Err(ConfigError::BoundariesNotAscending {
                    index,
                    value,
                    previous,
                });
            }
            previous = Some(value);
        }
        Ok(Self {
            bounds: Arc::from(bounds),
        })
    }

    #[must_use]
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.bounds.get(index).copied()
    }

    /// Smallest bound; a validated set always has one.
    #[must_use]
    pub fn first(&self) -> f64 {
        self.bounds.first().copied().unwrap_or(0.0)
    }

    /// Largest finite bound, the value estimates saturate at.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.bounds.last().copied().unwrap_or(0.0)
    }

    /// Index of the first bucket whose bound is `>= value`, or `len()` when
    /// the value only falls into `+Inf`.
    #[must_use]
    pub fn bucket_index(&self, value: f64) -> usize {
        self.bounds.partition_point(|bound| *bound < value)
    }

    /// True when both sets carry the same bounds in the same order.
    #[must_use]
    pub fn same_layout(&self, other: &BucketSet) -> bool {
        Arc::ptr_eq(&self.bounds, &other.bounds)
            || (self.bounds.len() == other.bounds.len()
                && self
                    .bounds
                    .iter()
                    .zip(other.bounds.iter())
                    .all(|(left, right)| left.to_bits() == right.to_bits()))
    }

    /// Formats a bound the way the exposition format prints `le` labels.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        self.get(index)
            .map_or_else(|| "+Inf".to_owned(), |bound| format!("{}", bound))
    }
}
