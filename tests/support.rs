use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run the `histsim` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_histsim<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = histsim_bin()?;
    Command::new(bin)
        .current_dir(dir)
        .args(args)
        .env("HISTSIM_LOG", "error")
        .output()
        .map_err(|err| format!("run histsim failed: {}", err))
}

/// Run the `histsim` binary with `input` piped to stdin.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed or fed.
pub fn run_histsim_with_stdin<I, S>(dir: &Path, args: I, input: &str) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = histsim_bin()?;
    let mut child = Command::new(bin)
        .current_dir(dir)
        .args(args)
        .env("HISTSIM_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| format!("spawn histsim failed: {}", err))?;
    {
        let Some(mut stdin) = child.stdin.take() else {
            return Err("stdin was not piped".to_owned());
        };
        stdin
            .write_all(input.as_bytes())
            .map_err(|err| format!("write stdin failed: {}", err))?;
    }
    child
        .wait_with_output()
        .map_err(|err| format!("wait histsim failed: {}", err))
}

/// Formats captured output for failure messages.
#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

fn histsim_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_histsim").map_or_else(
        || Err("CARGO_BIN_EXE_histsim missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
