//! True (nearest-rank) and bucket-interpolated quantiles.
mod bucket;
mod exact;
mod level;


pub use bucket::estimate;
pub use exact::{RawSampleBuffer, exact_quantile};
pub use level::{DEFAULT_LEVELS, QuantileLevel};
