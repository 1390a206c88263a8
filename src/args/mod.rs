//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::AnalyzerArgs;
pub use types::{OutputFormat, PositiveUsize};

pub(crate) use parsers::{
    parse_duration_arg, parse_exponential_buckets, parse_linear_buckets, parse_log_linear_buckets,
};
