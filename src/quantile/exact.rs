use super::QuantileLevel;
use crate::error::QuantileError;

/// Nearest-rank quantile of already sorted values: the element at
/// `floor(q * n) - 1`, clamped to the first element.
///
/// This is the ground truth bucket estimates are compared against; it is
/// deliberately not interpolated.
///
/// # Errors
///
/// Returns [`QuantileError::EmptyPopulation`] when `sorted` is empty.
pub fn exact_quantile(level: QuantileLevel, sorted: &[f64]) -> Result<f64, QuantileError> {
    if sorted.is_empty() {
        return Err(QuantileError::EmptyPopulation);
    }
    let rank = (level.get() * sorted.len() as f64).floor() as usize;
    sorted
        .get(rank.saturating_sub(1))
        .copied()
        .ok_or(QuantileError::EmptyPopulation)
}

/// Raw values of one chunk or window, sorted lazily on the first quantile
/// request after an append.
#[derive(Debug, Default, Clone)]
pub struct RawSampleBuffer {
    values: Vec<f64>,
    sorted: bool,
}

impl RawSampleBuffer {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            sorted: true,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
        self.sorted = false;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.sorted = true;
    }

    /// # Errors
    ///
    /// Returns [`QuantileError::EmptyPopulation`] when no values were pushed.
    pub fn quantile(&mut self, level: QuantileLevel) -> Result<f64, QuantileError> {
        if !self.sorted {
            self.values.sort_unstable_by(f64::total_cmp);
            self.sorted = true;
        }
        exact_quantile(level, &self.values)
    }
}

impl FromIterator<f64> for RawSampleBuffer {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            sorted: false,
        }
    }
}
