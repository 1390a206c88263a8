use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_boundary, parse_duration_arg, parse_exponential_buckets, parse_linear_buckets,
    parse_log_linear_buckets, parse_positive_usize, parse_quantile,
};
use super::types::{OutputFormat, PositiveUsize};
use crate::buckets::BucketGenerator;
use crate::quantile::QuantileLevel;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Replays recorded latencies through Prometheus-style histogram buckets and reports how far histogram_quantile() drifts from the true quantiles."
)]
pub struct AnalyzerArgs {
    /// Ascending bucket upper bounds in seconds
    #[arg(value_name = "BUCKETS", value_parser = parse_boundary)]
    pub buckets: Vec<f64>,

    /// Generate linear buckets: start,width,count
    #[arg(
        long = "linear-buckets",
        value_parser = parse_linear_buckets,
        conflicts_with_all = ["buckets", "exponential_buckets", "log_linear_buckets"]
    )]
    pub linear_buckets: Option<BucketGenerator>,

    /// Generate exponential buckets: start,factor,count
    #[arg(
        long = "exponential-buckets",
        value_parser = parse_exponential_buckets,
        conflicts_with_all = ["buckets", "log_linear_buckets"]
    )]
    pub exponential_buckets: Option<BucketGenerator>,

    /// Generate log-linear buckets: min_exp,max_exp,steps per power of ten
    #[arg(
        long = "log-linear-buckets",
        value_parser = parse_log_linear_buckets,
        allow_hyphen_values = true,
        conflicts_with = "buckets"
    )]
    pub log_linear_buckets: Option<BucketGenerator>,

    /// Input file with one `value` or `timestamp value` per line, in milliseconds (- for stdin)
    #[arg(long, short)]
    pub input: Option<String>,

    /// Samples per independently evaluated chunk
    #[arg(
        long = "chunk-size",
        short = 'n',
        default_value = "1000",
        value_parser = parse_positive_usize,
        conflicts_with = "rate"
    )]
    pub chunk_size: PositiveUsize,

    /// Simulate histogram_quantile(q, rate(h[lookback])) over timestamped input
    #[arg(long)]
    pub rate: bool,

    /// Scrape interval used to snapshot the histogram (supports ms/s/m/h)
    #[arg(long = "sampling-interval", default_value = "15s", value_parser = parse_duration_arg)]
    pub sampling_interval: Duration,

    /// Range of the simulated rate() selector (supports ms/s/m/h)
    #[arg(long, default_value = "300s", value_parser = parse_duration_arg)]
    pub lookback: Duration,

    /// Quantile level to evaluate, strictly between 0 and 1 (repeatable)
    #[arg(long = "quantile", short = 'q', value_parser = parse_quantile)]
    pub quantiles: Vec<QuantileLevel>,

    /// Output format for the summary
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Print one line per quantile for every evaluated chunk or window
    #[arg(long)]
    pub windows: bool,

    /// Path to config file (TOML/JSON)
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl AnalyzerArgs {
    /// The generator selected by whichever generator flag was given.
    #[must_use]
    pub fn bucket_generator(&self) -> Option<BucketGenerator> {
        self.linear_buckets
            .or(self.exponential_buckets)
            .or(self.log_linear_buckets)
    }
}
