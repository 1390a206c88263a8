use std::time::Duration;

use serde::Serialize;

use super::{AggregateSummary, QuantileSummary, Stats, WindowReport};

/// Run-level counters printed under the summary table.
#[derive(Debug, Clone, Copy)]
pub struct RunTotals {
    pub mode: &'static str,
    pub samples: u64,
    pub windows_processed: usize,
    pub windows_skipped: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'report> {
    pub mode: &'static str,
    pub samples: u64,
    pub windows_processed: usize,
    pub windows_skipped: usize,
    pub elapsed_ms: u128,
    pub summary: &'report [QuantileSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<&'report [WindowReport]>,
}

impl<'report> JsonReport<'report> {
    #[must_use]
    pub fn new(
        totals: &RunTotals,
        summary: &'report AggregateSummary,
        windows: Option<&'report [WindowReport]>,
    ) -> Self {
        Self {
            mode: totals.mode,
            samples: totals.samples,
            windows_processed: totals.windows_processed,
            windows_skipped: totals.windows_skipped,
            elapsed_ms: totals.elapsed.as_millis(),
            summary: &summary.quantiles,
            windows,
        }
    }
}

#[must_use]
pub fn render_window_lines(window: &WindowReport) -> Vec<String> {
    window
        .reports
        .iter()
        .map(|report| {
            format!(
                "window {} {} samples={} {} actual={:.6} estimated={:.6} error={}",
                window.index,
                window.span,
                window.samples,
                report.quantile,
                report.actual,
                report.estimated,
                report.error
            )
        })
        .collect()
}

#[must_use]
pub fn render_summary_text(summary: &AggregateSummary, totals: &RunTotals) -> Vec<String> {
    let mut lines = Vec::with_capacity(summary.quantiles.len().saturating_add(6));
    lines.push(format!(
        "{:<8} {:>7} {:>5} {:>9} {:>9} {:>9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "quantile",
        "reports",
        "n/a",
        "err min",
        "err avg",
        "err max",
        "act min",
        "act avg",
        "act max",
        "est min",
        "est avg",
        "est max"
    ));
    for row in &summary.quantiles {
        let (err_min, err_avg, err_max) = stats_cells(row.error, |value| format!("{:.2}%", value));
        let (act_min, act_avg, act_max) = stats_cells(row.actual, |value| format!("{:.6}", value));
        let (est_min, est_avg, est_max) =
            stats_cells(row.estimated, |value| format!("{:.6}", value));
        lines.push(format!(
            "{:<8} {:>7} {:>5} {:>9} {:>9} {:>9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            row.quantile.to_string(),
            row.reports,
            row.degenerate,
            err_min,
            err_avg,
            err_max,
            act_min,
            act_avg,
            act_max,
            est_min,
            est_avg,
            est_max
        ));
    }
    lines.push(String::new());
    lines.push(format!("Mode: {}", totals.mode));
    lines.push(format!("Samples: {}", totals.samples));
    lines.push(format!(
        "Windows: {} evaluated, {} skipped",
        totals.windows_processed, totals.windows_skipped
    ));
    lines.push(format!("Elapsed: {}ms", totals.elapsed.as_millis()));
    lines
}

fn stats_cells<F>(stats: Option<Stats>, format_value: F) -> (String, String, String)
where
    F: Fn(f64) -> String,
{
    stats.map_or_else(
        || ("-".to_owned(), "-".to_owned(), "-".to_owned()),
        |stats| {
            (
                format_value(stats.min),
                format_value(stats.average),
                format_value(stats.max),
            )
        },
    )
}
