#![no_main]

use libfuzzer_sys::fuzz_target;
use histsim::stream::{StreamMode, window_capacity};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = histsim::fuzzing::apply_config_from_toml(input) {
            debug_assert!(config.buckets.len() >= histsim::config::MIN_BOUNDARIES);
            debug_assert!(!config.levels.is_empty());
            if let StreamMode::Windowed {
                sampling_interval,
                lookback,
            } = config.mode
            {
                debug_assert!(window_capacity(sampling_interval, lookback).is_ok());
            }
        }
    }
});
