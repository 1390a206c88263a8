use super::extrapolate;
use crate::error::{AppError, AppResult, QuantileError};
use crate::histogram::{BucketCounts, BucketSet, CumulativeBuckets, HistogramSnapshot};
use crate::quantile::{QuantileLevel, estimate};

const TOLERANCE: f64 = 1e-9;

fn snapshot(set: &BucketSet, at: f64, counts: &[u64], total: u64) -> AppResult<HistogramSnapshot> {
    let counts = BucketCounts::from_parts(set.clone(), counts.to_vec(), total, 0.0)?;
    Ok(HistogramSnapshot::new(at, counts))
}

fn scenario_buckets() -> AppResult<BucketSet> {
    Ok(BucketSet::new(vec![0.25, 0.5, 1.0, 2.5])?)
}

#[test]
fn two_snapshots_extrapolate_to_window_start_and_half_gap_at_end() -> AppResult<()> {
    let set = scenario_buckets()?;
    let snapshots = vec![
        snapshot(&set, 15.0, &[1, 3, 5, 6], 7)?,
        snapshot(&set, 30.0, &[2, 6, 10, 12], 14)?,
    ];
    let rates = extrapolate(&snapshots, 0.0, 300.0)?;
    if (rates.extrapolated_interval() - 37.5).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Expected extrapolated interval 37.5, got {}",
            rates.extrapolated_interval()
        )));
    }
    let first = rates.cumulative(0).unwrap_or(f64::NAN);
    if (first - 1.0 * (37.5 / 15.0) / 300.0).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Unexpected 0.25 bucket rate {}",
            first
        )));
    }
    if (first - 0.008_333_333).abs() > 1e-6 {
        return Err(AppError::quantile("Rate should be about 0.008333"));
    }
    if (rates.total() - 7.0 * 2.5 / 300.0).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Unexpected +Inf rate {}",
            rates.total()
        )));
    }
    Ok(())
}

#[test]
fn identical_snapshots_yield_zero_rates() -> AppResult<()> {
    let set = scenario_buckets()?;
    let snapshots = vec![
        snapshot(&set, 15.0, &[1, 3, 5, 6], 7)?,
        snapshot(&set, 30.0, &[1, 3, 5, 6], 7)?,
    ];
    let rates = extrapolate(&snapshots, 0.0, 300.0)?;
    if rates.rates().iter().any(|rate| *rate != 0.0) || rates.total() != 0.0 {
        return Err(AppError::quantile(format!(
            "Expected all zero rates, got {:?}",
            rates.rates()
        )));
    }
    Ok(())
}

#[test]
fn full_window_extrapolates_both_edges_in_full() -> AppResult<()> {
    let set = scenario_buckets()?;
    let snapshots: Vec<HistogramSnapshot> = (1..=20u32)
        .map(|step| {
            let count = u64::from(step) * 10;
            snapshot(&set, f64::from(step) * 15.0, &[count, count, count, count], count)
        })
        .collect::<AppResult<_>>()?;
    // Window (0, 300]: first scrape is one gap from the start, last is on the end.
    let rates = extrapolate(&snapshots, 0.0, 300.0)?;
    if (rates.extrapolated_interval() - 300.0).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Expected 300s, got {}",
            rates.extrapolated_interval()
        )));
    }
    // 190 increments over 285s stretched to 300s, per second of a 300s window.
    let expected = 190.0 * (300.0 / 285.0) / 300.0;
    if (rates.total() - expected).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Expected {} got {}",
            expected,
            rates.total()
        )));
    }
    Ok(())
}

#[test]
fn distant_edges_fall_back_to_half_gap() -> AppResult<()> {
    let set = scenario_buckets()?;
    let snapshots = vec![
        snapshot(&set, 100.0, &[0, 0, 0, 0], 0)?,
        snapshot(&set, 110.0, &[1, 1, 1, 1], 1)?,
        snapshot(&set, 120.0, &[2, 2, 2, 2], 2)?,
    ];
    let rates = extrapolate(&snapshots, 0.0, 300.0)?;
    if (rates.extrapolated_interval() - 30.0).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Expected 20 + 5 + 5, got {}",
            rates.extrapolated_interval()
        )));
    }
    Ok(())
}

#[test]
fn counter_reset_is_not_corrected() -> AppResult<()> {
    let set = scenario_buckets()?;
    let snapshots = vec![
        snapshot(&set, 15.0, &[5, 5, 5, 5], 5)?,
        snapshot(&set, 30.0, &[1, 1, 1, 1], 1)?,
    ];
    let rates = extrapolate(&snapshots, 15.0, 30.0)?;
    if rates.total() >= 0.0 {
        return Err(AppError::quantile(
            "A reset counter should surface as a negative rate",
        ));
    }
    Ok(())
}

#[test]
fn rate_vector_feeds_bucket_estimate() -> AppResult<()> {
    let set = BucketSet::new(vec![0.1, 0.25, 0.5])?;
    let snapshots = vec![
        snapshot(&set, 15.0, &[0, 0, 0], 0)?,
        snapshot(&set, 30.0, &[3, 8, 9], 9)?,
    ];
    let rates = extrapolate(&snapshots, 0.0, 30.0)?;
    let p50 = estimate(QuantileLevel::new(0.5)?, &rates)?;
    if (p50 - 0.145).abs() > TOLERANCE {
        return Err(AppError::quantile(format!(
            "Scaling by the rate factor must not move the estimate, got {}",
            p50
        )));
    }
    Ok(())
}

#[test]
fn rejects_degenerate_inputs() -> AppResult<()> {
    let set = scenario_buckets()?;
    let other = BucketSet::new(vec![0.25, 0.5, 1.0, 5.0])?;
    let one = vec![snapshot(&set, 15.0, &[0, 0, 0, 0], 0)?];
    match extrapolate(&one, 0.0, 300.0) {
        Err(QuantileError::TooFewSnapshots { actual: 1 }) => {}
        other_result => {
            return Err(AppError::quantile(format!(
                "Expected too few snapshots, got {:?}",
                other_result.map(|rates| rates.total())
            )));
        }
    }
    let same_time = vec![
        snapshot(&set, 15.0, &[0, 0, 0, 0], 0)?,
        snapshot(&set, 15.0, &[1, 1, 1, 1], 1)?,
    ];
    if !matches!(
        extrapolate(&same_time, 0.0, 300.0),
        Err(QuantileError::ZeroSampledInterval)
    ) {
        return Err(AppError::quantile("Expected zero sampled interval"));
    }
    let mixed = vec![
        snapshot(&set, 15.0, &[0, 0, 0, 0], 0)?,
        snapshot(&other, 30.0, &[1, 1, 1, 1], 1)?,
    ];
    if !matches!(
        extrapolate(&mixed, 0.0, 300.0),
        Err(QuantileError::BucketLayoutMismatch { index: 1 })
    ) {
        return Err(AppError::quantile("Expected layout mismatch"));
    }
    let backwards = vec![
        snapshot(&set, 30.0, &[0, 0, 0, 0], 0)?,
        snapshot(&set, 15.0, &[1, 1, 1, 1], 1)?,
    ];
    if !matches!(
        extrapolate(&backwards, 0.0, 300.0),
        Err(QuantileError::SnapshotsUnordered { index: 1 })
    ) {
        return Err(AppError::quantile("Expected unordered snapshots"));
    }
    let window = vec![
        snapshot(&set, 15.0, &[0, 0, 0, 0], 0)?,
        snapshot(&set, 30.0, &[1, 1, 1, 1], 1)?,
    ];
    if !matches!(
        extrapolate(&window, 30.0, 30.0),
        Err(QuantileError::ZeroWindow)
    ) {
        return Err(AppError::quantile("Expected zero window"));
    }
    Ok(())
}
