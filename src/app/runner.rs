use std::io::{BufRead, Write};

use super::sink::RunSink;
use crate::args::OutputFormat;
use crate::config::AnalyzerConfig;
use crate::error::AppResult;
use crate::input::SampleReader;
use crate::report::{
    AggregateSummary, ErrorAggregator, JsonReport, RunTotals, WindowReport, render_summary_text,
};
use crate::stream::{Stopwatch, build_processor};

/// What a finished run produced, after it has been written out.
#[derive(Debug)]
pub struct RunOutcome {
    pub totals: RunTotals,
    pub summary: AggregateSummary,
    pub windows: Option<Vec<WindowReport>>,
}

/// Streams every sample from `reader` through the configured processor and
/// writes the per-window lines (if enabled) and the summary to `out`.
///
/// # Errors
///
/// Returns an error on the first malformed input line, on read or write
/// failures, or when a window cannot be evaluated for a reason other than an
/// empty population.
pub fn run_analysis<R, W>(config: &AnalyzerConfig, reader: R, out: &mut W) -> AppResult<RunOutcome>
where
    R: BufRead,
    W: Write,
{
    let stopwatch = Stopwatch::start();
    let levels: Vec<String> = config.levels.iter().map(ToString::to_string).collect();
    tracing::info!(
        mode = config.mode.name(),
        buckets = config.buckets.len(),
        quantiles = %levels.join(","),
        input = %config.input,
        "Starting analysis"
    );

    let mut processor =
        build_processor(&config.mode, config.buckets.clone(), config.levels.clone())?;
    let json = config.output_format == OutputFormat::Json;
    let stream_lines = config.show_windows && !json;
    let (aggregator, windows) = {
        let mut sink = RunSink::new(
            ErrorAggregator::new(&config.levels),
            if stream_lines { Some(&mut *out) } else { None },
            config.show_windows && json,
        );
        let mut samples = SampleReader::new(reader, config.mode.requires_timestamps());
        while let Some(sample) = samples.next_sample()? {
            processor.ingest(&sample, &mut sink)?;
        }
        processor.finish(&mut sink)?;
        tracing::debug!(lines = samples.lines_read(), "Input exhausted");
        sink.into_parts()
    };

    let stats = processor.stats();
    let totals = RunTotals {
        mode: config.mode.name(),
        samples: stats.samples,
        windows_processed: stats.windows_processed,
        windows_skipped: stats.windows_skipped,
        elapsed: stopwatch.elapsed(),
    };
    let summary = aggregator.summarize();

    if json {
        serde_json::to_writer_pretty(
            &mut *out,
            &JsonReport::new(&totals, &summary, windows.as_deref()),
        )?;
        writeln!(out)?;
    } else {
        if stream_lines && stats.windows_processed > 0 {
            writeln!(out)?;
        }
        for line in render_summary_text(&summary, &totals) {
            writeln!(out, "{}", line)?;
        }
    }

    if stats.windows_processed == 0 {
        tracing::warn!("No chunk or window had data to compare.");
    }
    tracing::info!(
        elapsed_ms = totals.elapsed.as_millis(),
        windows_processed = totals.windows_processed,
        windows_skipped = totals.windows_skipped,
        samples = totals.samples,
        "Analysis finished"
    );

    Ok(RunOutcome {
        totals,
        summary,
        windows,
    })
}
