//! Prometheus-style cumulative histograms over a fixed set of `le` bounds.
mod bucket_set;
mod cumulative;


pub use bucket_set::BucketSet;
pub use cumulative::{BucketCounts, CumulativeBuckets, CumulativeHistogram, HistogramSnapshot};
