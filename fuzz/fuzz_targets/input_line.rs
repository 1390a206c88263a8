#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for (index, line) in input.lines().take(64).enumerate() {
            if let Ok(Some(sample)) = histsim::input::parse_line(line, index + 1, false) {
                debug_assert!(sample.value.is_finite());
            }
        }
    }
});
