//! Run orchestration: reader → processor → aggregator → output.
mod runner;
mod sink;

#[cfg(test)]
mod tests;

pub use runner::{RunOutcome, run_analysis};
