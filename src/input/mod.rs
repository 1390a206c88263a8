//! Line-oriented latency input: `value` or `timestamp value`, in milliseconds.
mod parsing;
mod reader;


pub use parsing::{MS_PER_SEC, Sample, parse_line, parse_timestamp};
pub use reader::{InputSource, SampleReader};
