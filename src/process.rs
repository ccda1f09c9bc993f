use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches,
    NoMatches,
}

/// Split a configured command string into program + leading arguments.
/// Whitespace only; the target path is always its own argv entry, never
/// interpolated into a shell string.
fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run an external program against `target` with the terminal attached,
/// blocking until it exits.
pub fn run_interactive(command: &str, target: &Path) -> Result<ExitStatus> {
    let (program, args) = split_command(command).ok_or_else(|| Error::Process {
        command: command.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
    })?;

    log::debug!("spawning {program} {args:?} {}", target.display());
    let status = Command::new(program)
        .args(&args)
        .arg(target)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::Process {
            command: command.to_string(),
            source: e,
        })?;
    log::debug!("{program} exited with {status}");
    Ok(status)
}

#[cfg(not(windows))]
fn search_command(term: &str, target: &Path) -> Command {
    let mut cmd = Command::new("grep");
    cmd.args(["-r", "-i", "-n"]).arg(term).arg(target);
    cmd
}

#[cfg(windows)]
fn search_command(term: &str, target: &Path) -> Command {
    let mut cmd = Command::new("findstr");
    cmd.args(["/s", "/i"]).arg(term).arg(target.join("*"));
    cmd
}

/// Both grep and findstr reserve exit status 1 for "searched fine, found
/// nothing".
fn is_no_matches(status: ExitStatus) -> bool {
    status.code() == Some(1)
}

/// Run the platform search utility over `target`, streaming its output to
/// the terminal. "No matches" is a normal outcome, not a failure.
pub fn run_search(term: &str, target: &Path) -> Result<SearchOutcome> {
    let mut cmd = search_command(term, target);
    log::debug!("searching with {cmd:?}");
    let status = cmd.status().map_err(|e| Error::Process {
        command: format!("{:?}", cmd.get_program()),
        source: e,
    })?;

    if status.success() {
        Ok(SearchOutcome::Matches)
    } else if is_no_matches(status) {
        Ok(SearchOutcome::NoMatches)
    } else {
        Err(Error::Search { status })
    }
}
