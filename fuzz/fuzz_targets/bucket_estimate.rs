#![no_main]

use histsim::histogram::{BucketSet, CumulativeHistogram};
use histsim::quantile::{QuantileLevel, estimate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(buckets) = BucketSet::new(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]) else {
        return;
    };
    let mut histogram = CumulativeHistogram::new(buckets);
    for chunk in data.chunks_exact(2).take(512) {
        let millis = u16::from_le_bytes([chunk[0], chunk[1]]);
        histogram.add_datum(f64::from(millis) / 1000.0);
    }
    let snapshot = histogram.snapshot();
    for level in QuantileLevel::defaults() {
        if let Ok(value) = estimate(level, &snapshot) {
            debug_assert!((0.005..=1.0).contains(&value));
        }
    }
});
