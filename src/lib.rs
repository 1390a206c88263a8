//! Core library for the `histsim` CLI.
//!
//! `histsim` replays recorded latencies through Prometheus-style cumulative
//! histogram buckets and measures how far `histogram_quantile()` (optionally
//! over `rate()`) drifts from the true nearest-rank quantile of the same
//! data. Inputs are processed in bounded memory, either in fixed-size chunks
//! or in sliding time windows of scraped snapshots, and the per-window errors
//! are reduced to min/max/average statistics per quantile level.
//!
//! The numerical building blocks live in [`histogram`], [`quantile`] and
//! [`rate`]; [`stream`] drives them over an input stream and [`report`]
//! aggregates the results.
pub mod app;
pub mod args;
pub mod buckets;
pub mod config;
pub mod entry;
pub mod error;
pub mod histogram;
pub mod input;
pub mod logger;
pub mod quantile;
pub mod rate;
pub mod report;
pub mod stream;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
