use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_analysis;
use crate::args::AnalyzerArgs;
use crate::config::{AnalyzerConfig, apply_config, load_config};
use crate::error::AppResult;

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["histsim.toml", "histsim.json"];

/// Runs the `histsim` command line.
///
/// # Errors
///
/// Returns an error when arguments or configuration are invalid, the input
/// cannot be read or is malformed, or the report cannot be written.
pub fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }
    let config = AnalyzerConfig::from_args(&args).inspect_err(|err| {
        tracing::error!("{}", err);
    })?;

    let reader = config.input.open()?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_analysis(&config, reader, &mut out).inspect_err(|err| {
        tracing::error!("{}", err);
    })?;
    out.flush()?;
    Ok(())
}

fn parse_args() -> AppResult<Option<(AnalyzerArgs, ArgMatches)>> {
    let mut cmd = AnalyzerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = AnalyzerArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
