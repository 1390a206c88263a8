use std::io::Cursor;
use std::time::Duration;

use clap::Parser;

use super::run_analysis;
use crate::args::{AnalyzerArgs, OutputFormat};
use crate::config::AnalyzerConfig;
use crate::error::{AppError, AppResult, InputError, MalformedKind};
use crate::histogram::BucketSet;
use crate::input::InputSource;
use crate::quantile::QuantileLevel;
use crate::stream::StreamMode;

const SCENARIO_BOUNDS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];
const SCENARIO_INPUT: &str = "336\n42\n73\n67\n130\n157\n174\n153\n138\n";
const SCENARIO_LINE: &str =
    "window 1 samples 1-9 samples=9 p50 actual=0.130000 estimated=0.145000 error=11.54%";

fn config(
    mode: StreamMode,
    output_format: OutputFormat,
    show_windows: bool,
) -> AppResult<AnalyzerConfig> {
    Ok(AnalyzerConfig {
        buckets: BucketSet::new(SCENARIO_BOUNDS.to_vec())?,
        levels: vec![QuantileLevel::new(0.5)?],
        mode,
        input: InputSource::Stdin,
        output_format,
        show_windows,
    })
}

fn run_to_string(config: &AnalyzerConfig, input: &str) -> AppResult<(super::RunOutcome, String)> {
    let mut out = Vec::new();
    let outcome = run_analysis(config, Cursor::new(input), &mut out)?;
    let text = String::from_utf8(out).map_err(|err| AppError::config(format!("{}", err)))?;
    Ok((outcome, text))
}

#[test]
fn text_run_prints_window_lines_and_summary() -> AppResult<()> {
    let config = config(
        StreamMode::Chunked { chunk_size: 1000 },
        OutputFormat::Text,
        true,
    )?;
    let (outcome, text) = run_to_string(&config, SCENARIO_INPUT)?;
    if !text.contains(SCENARIO_LINE) {
        return Err(AppError::config(format!("Missing window line in:\n{}", text)));
    }
    if !text.contains("Windows: 1 evaluated, 0 skipped") || !text.contains("Samples: 9") {
        return Err(AppError::config(format!("Missing footer in:\n{}", text)));
    }
    if outcome.totals.samples != 9 || outcome.windows.is_some() {
        return Err(AppError::config("Unexpected outcome"));
    }
    Ok(())
}

#[test]
fn json_run_emits_single_document() -> AppResult<()> {
    let config = config(
        StreamMode::Chunked { chunk_size: 4 },
        OutputFormat::Json,
        true,
    )?;
    let (outcome, text) = run_to_string(&config, SCENARIO_INPUT)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    if value.get("windows_processed").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(AppError::config(format!("Unexpected document {}", value)));
    }
    let windows = value
        .get("windows")
        .and_then(serde_json::Value::as_array)
        .map(Vec::len);
    if windows != Some(3) || outcome.windows.map(|windows| windows.len()) != Some(3) {
        return Err(AppError::config("Expected three retained windows"));
    }
    let Some(row) = outcome.summary.quantiles.first() else {
        return Err(AppError::config("Missing summary row"));
    };
    if row.reports != 3 {
        return Err(AppError::config(format!("Expected 3 reports, got {}", row.reports)));
    }
    Ok(())
}

#[test]
fn rate_run_reads_timestamps() -> AppResult<()> {
    let config = config(
        StreamMode::Windowed {
            sampling_interval: Duration::from_secs(15),
            lookback: Duration::from_secs(30),
        },
        OutputFormat::Text,
        false,
    )?;
    let input: String = (0..60)
        .map(|second| format!("2024-03-01T10:{:02}:{:02}Z 120\n", second / 60, second % 60))
        .collect();
    let (outcome, text) = run_to_string(&config, &input)?;
    if outcome.totals.windows_processed != 3 || outcome.totals.mode != "rate" {
        return Err(AppError::config(format!("Unexpected totals {:?}", outcome.totals)));
    }
    if text.contains("window ") {
        return Err(AppError::config("Window lines were not requested"));
    }
    Ok(())
}

#[test]
fn malformed_line_fails_the_run() -> AppResult<()> {
    let config = config(
        StreamMode::Chunked { chunk_size: 2 },
        OutputFormat::Text,
        false,
    )?;
    let mut out = Vec::new();
    match run_analysis(&config, Cursor::new("10\n20\nfast\n"), &mut out) {
        Err(AppError::Input(InputError::Malformed {
            line_number: 3,
            kind: MalformedKind::InvalidValue,
            ..
        })) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::config("Expected the run to fail")),
    }
}

#[test]
fn empty_input_reports_no_windows() -> AppResult<()> {
    let config = config(
        StreamMode::Chunked { chunk_size: 10 },
        OutputFormat::Text,
        false,
    )?;
    let (outcome, text) = run_to_string(&config, "# nothing recorded\n")?;
    if outcome.totals.windows_processed != 0 || !text.contains("Windows: 0 evaluated, 0 skipped") {
        return Err(AppError::config(format!("Unexpected output:\n{}", text)));
    }
    Ok(())
}

#[test]
fn repeated_level_reports_once_per_window() -> AppResult<()> {
    let args = AnalyzerArgs::try_parse_from([
        "histsim", "-n", "2", "-q", "0.5", "-q", "0.5", "0.05", "0.1", "0.25",
    ])?;
    let config = AnalyzerConfig::from_args(&args)?;
    let (outcome, _) = run_to_string(&config, "50\n60\n70\n80\n")?;
    let rows = &outcome.summary.quantiles;
    if rows.len() != 1 || rows.first().map(|row| row.reports) != Some(2) {
        return Err(AppError::config(format!("Unexpected summary rows {:?}", rows)));
    }
    Ok(())
}
