//! Per-window error reports and their run-level aggregation.
mod aggregator;
mod render;
mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{AggregateSummary, ErrorAggregator, QuantileSummary, Stats};
pub use render::{JsonReport, RunTotals, render_summary_text, render_window_lines};
pub use types::{ErrorRatio, QuantileErrorReport, WindowReport, WindowSink, WindowSpan};
