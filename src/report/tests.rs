use std::time::Duration;

use super::{
    ErrorAggregator, ErrorRatio, JsonReport, QuantileErrorReport, RunTotals, WindowReport,
    WindowSink, WindowSpan, render_summary_text, render_window_lines,
};
use crate::error::{AppError, AppResult};
use crate::quantile::QuantileLevel;

fn level(value: f64) -> AppResult<QuantileLevel> {
    Ok(QuantileLevel::new(value)?)
}

fn totals() -> RunTotals {
    RunTotals {
        mode: "chunked",
        samples: 9,
        windows_processed: 1,
        windows_skipped: 0,
        elapsed: Duration::from_millis(3),
    }
}

#[test]
fn error_ratio_matches_nine_value_scenario() -> AppResult<()> {
    let ratio = ErrorRatio::between(0.130, 0.145);
    let Some(percent) = ratio.percent() else {
        return Err(AppError::quantile("Expected a defined ratio"));
    };
    if (percent - 11.538_461_538).abs() > 1e-6 {
        return Err(AppError::quantile(format!("Unexpected error {}", percent)));
    }
    if ErrorRatio::between(0.145, 0.130) != ratio {
        return Err(AppError::quantile("Ratio should be symmetric"));
    }
    Ok(())
}

#[test]
fn zero_side_is_degenerate_not_infinite() -> AppResult<()> {
    for (actual, estimated) in [(0.0, 0.5), (0.5, 0.0), (0.0, 0.0)] {
        let ratio = ErrorRatio::between(actual, estimated);
        if ratio != ErrorRatio::Degenerate || ratio.to_string() != "n/a" {
            return Err(AppError::quantile(format!(
                "Expected degenerate ratio for {} / {}",
                actual, estimated
            )));
        }
    }
    let json = serde_json::to_string(&ErrorRatio::Degenerate)?;
    if json != "null" {
        return Err(AppError::quantile(format!("Unexpected JSON {}", json)));
    }
    Ok(())
}

#[test]
fn summary_excludes_degenerate_from_error_stats_only() -> AppResult<()> {
    let p50 = level(0.5)?;
    let mut aggregator = ErrorAggregator::new(&[p50]);
    aggregator.record(QuantileErrorReport::new(p50, 1.0, 1.1));
    aggregator.record(QuantileErrorReport::new(p50, 2.0, 2.4));
    aggregator.record(QuantileErrorReport::new(p50, 0.0, 0.5));
    let summary = aggregator.summarize();
    let Some(row) = summary.get(p50) else {
        return Err(AppError::quantile("Missing p50 row"));
    };
    if row.reports != 3 || row.degenerate != 1 {
        return Err(AppError::quantile(format!(
            "Unexpected counts {} / {}",
            row.reports, row.degenerate
        )));
    }
    let Some(error) = row.error else {
        return Err(AppError::quantile("Missing error stats"));
    };
    if (error.min - 10.0).abs() > 1e-9 || (error.max - 20.0).abs() > 1e-9 {
        return Err(AppError::quantile(format!("Unexpected error stats {:?}", error)));
    }
    if (error.average - 15.0).abs() > 1e-9 {
        return Err(AppError::quantile("Average must ignore the degenerate report"));
    }
    let Some(actual) = row.actual else {
        return Err(AppError::quantile("Missing actual stats"));
    };
    if actual.min != 0.0 || (actual.average - 1.0).abs() > 1e-9 {
        return Err(AppError::quantile("Actual stats must include every report"));
    }
    Ok(())
}

#[test]
fn summarize_is_idempotent() -> AppResult<()> {
    let p99 = level(0.99)?;
    let p50 = level(0.5)?;
    let mut aggregator = ErrorAggregator::new(&[p99, p50]);
    aggregator.record(QuantileErrorReport::new(p99, 0.9, 1.0));
    aggregator.record(QuantileErrorReport::new(p50, 0.2, 0.25));
    let first = aggregator.summarize();
    let second = aggregator.summarize();
    if first != second {
        return Err(AppError::quantile("Summaries differ"));
    }
    if aggregator.len() != 2 {
        return Err(AppError::quantile("Summarize must not alter the log"));
    }
    let order: Vec<QuantileLevel> = first.quantiles.iter().map(|row| row.quantile).collect();
    if order != vec![p99, p50] {
        return Err(AppError::quantile("Rows should follow configured order"));
    }
    Ok(())
}

#[test]
fn level_without_reports_has_no_stats() -> AppResult<()> {
    let p75 = level(0.75)?;
    let aggregator = ErrorAggregator::new(&[p75]);
    let summary = aggregator.summarize();
    let Some(row) = summary.get(p75) else {
        return Err(AppError::quantile("Missing p75 row"));
    };
    if row.reports != 0 || row.error.is_some() || row.actual.is_some() {
        return Err(AppError::quantile("Empty level should have no stats"));
    }
    if !aggregator.is_empty() {
        return Err(AppError::quantile("Aggregator should be empty"));
    }
    Ok(())
}

#[test]
fn window_sink_records_every_report_including_unknown_levels() -> AppResult<()> {
    let p50 = level(0.5)?;
    let p90 = level(0.9)?;
    let mut aggregator = ErrorAggregator::new(&[p50]);
    aggregator.accept(WindowReport {
        index: 1,
        span: WindowSpan::Samples { first: 1, last: 2 },
        samples: 2,
        reports: vec![
            QuantileErrorReport::new(p50, 1.0, 1.0),
            QuantileErrorReport::new(p90, 2.0, 1.0),
        ],
    })?;
    let summary = aggregator.summarize();
    if summary.quantiles.len() != 2 || summary.get(p90).is_none() {
        return Err(AppError::quantile("Expected a row for p90"));
    }
    Ok(())
}

#[test]
fn text_rendering_lists_rows_and_footer() -> AppResult<()> {
    let p50 = level(0.5)?;
    let report = QuantileErrorReport::new(p50, 0.130, 0.145);
    let window = WindowReport {
        index: 1,
        span: WindowSpan::Samples { first: 1, last: 9 },
        samples: 9,
        reports: vec![report],
    };
    let window_lines = render_window_lines(&window);
    let Some(line) = window_lines.first() else {
        return Err(AppError::quantile("Missing window line"));
    };
    if !line.contains("p50") || !line.contains("error=11.54%") || !line.contains("samples 1-9") {
        return Err(AppError::quantile(format!("Unexpected window line {}", line)));
    }

    let mut aggregator = ErrorAggregator::new(&[p50]);
    aggregator.accept(window)?;
    let lines = render_summary_text(&aggregator.summarize(), &totals());
    if !lines.iter().any(|line| line.starts_with("p50") && line.contains("11.54%")) {
        return Err(AppError::quantile(format!("Missing p50 row in {:?}", lines)));
    }
    if !lines.iter().any(|line| line == "Windows: 1 evaluated, 0 skipped") {
        return Err(AppError::quantile("Missing windows footer"));
    }
    Ok(())
}

#[test]
fn json_report_omits_windows_unless_requested() -> AppResult<()> {
    let p50 = level(0.5)?;
    let mut aggregator = ErrorAggregator::new(&[p50]);
    aggregator.record(QuantileErrorReport::new(p50, 0.130, 0.145));
    let summary = aggregator.summarize();
    let value = serde_json::to_value(JsonReport::new(&totals(), &summary, None))?;
    if value.get("windows").is_some() {
        return Err(AppError::quantile("Windows should be omitted"));
    }
    let quantile = value
        .get("summary")
        .and_then(|rows| rows.get(0))
        .and_then(|row| row.get("quantile"))
        .and_then(serde_json::Value::as_f64);
    if quantile != Some(0.5) {
        return Err(AppError::quantile(format!("Unexpected quantile {:?}", quantile)));
    }
    if value.get("mode").and_then(serde_json::Value::as_str) != Some("chunked") {
        return Err(AppError::quantile("Unexpected mode"));
    }
    Ok(())
}

#[test]
fn repeated_levels_share_one_row() -> AppResult<()> {
    let p50 = level(0.5)?;
    let mut aggregator = ErrorAggregator::new(&[p50, p50]);
    aggregator.record(QuantileErrorReport::new(p50, 0.2, 0.25));
    let summary = aggregator.summarize();
    if summary.quantiles.len() != 1 || summary.get(p50).map(|row| row.reports) != Some(1) {
        return Err(AppError::quantile(format!("Unexpected rows {:?}", summary.quantiles)));
    }
    Ok(())
}
