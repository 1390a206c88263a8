use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuantileError {
    #[error("Quantile requested on an empty population.")]
    EmptyPopulation,
    #[error("Bucket-quantile estimation needs at least 2 boundaries, got {actual}.")]
    TooFewBoundaries { actual: usize },
    #[error("Boundary count ({boundaries}) does not match bucket count ({counts}).")]
    ShapeMismatch { boundaries: usize, counts: usize },
    #[error("Rate extrapolation needs at least 2 snapshots, got {actual}.")]
    TooFewSnapshots { actual: usize },
    #[error("Snapshot {index} uses a different bucket layout than the first snapshot.")]
    BucketLayoutMismatch { index: usize },
    #[error("Snapshot {index} is older than the snapshot before it.")]
    SnapshotsUnordered { index: usize },
    #[error("Snapshots span a zero-length interval.")]
    ZeroSampledInterval,
    #[error("Rate window must have a positive length.")]
    ZeroWindow,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
