use super::QuantileLevel;
use crate::error::QuantileError;
use crate::histogram::CumulativeBuckets;

/// Estimates a quantile from cumulative buckets alone, the way the query
/// engine's `histogram_quantile` does.
///
/// The target rank is `q * total`. The first bucket whose cumulative value
/// reaches the rank is located and the result is linearly interpolated
/// between that bucket's lower and upper bounds. Ranks that only `+Inf`
/// reaches saturate at the largest finite bound, and ranks inside the first
/// bucket report the first bound, so every estimate stays inside
/// `[bounds[0], bounds[last]]`. Both are known sources of error and are kept.
/// Prometheus interpolates first-bucket ranks from 0 instead; this does not.
///
/// # Errors
///
/// Returns an error when fewer than two bounds are configured, or
/// [`QuantileError::EmptyPopulation`] when the `+Inf` bucket is zero.
pub fn estimate<B>(level: QuantileLevel, buckets: &B) -> Result<f64, QuantileError>
where
    B: CumulativeBuckets + ?Sized,
{
    let bounds = buckets.buckets().bounds();
    if bounds.len() < 2 {
        return Err(QuantileError::TooFewBoundaries {
            actual: bounds.len(),
        });
    }
    let total = buckets.total();
    if total <= 0.0 || !total.is_finite() {
        return Err(QuantileError::EmptyPopulation);
    }
    let rank = total * level.get();

    let located = bounds.iter().enumerate().find_map(|(index, bound)| {
        buckets
            .cumulative(index)
            .filter(|count| *count >= rank)
            .map(|count| (index, *bound, count))
    });
    let Some((index, bucket_end, count)) = located else {
        return Ok(buckets.buckets().last());
    };
    if index == 0 {
        return Ok(bucket_end);
    }

    let previous = index.saturating_sub(1);
    let bucket_start = bounds.get(previous).copied().unwrap_or(0.0);
    let count_below = buckets.cumulative(previous).unwrap_or(0.0);
    let count_in_bucket = count - count_below;
    if count_in_bucket <= 0.0 {
        return Ok(bucket_start);
    }
    let local_rank = rank - count_below;
    Ok(bucket_start + (bucket_end - bucket_start) * (local_rank / count_in_bucket))
}
