//! Small helpers shared across CLI tests.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, GenerateOutcome, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn read_text(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => panic!("failed to read {}: {err}", path.display()),
    }
}

/// Parses `args` after the binary name.
pub(super) fn parse<'a>(args: impl IntoIterator<Item = &'a str>) -> Cli {
    let argv = std::iter::once("chromagen").chain(args);
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn run_generate_args<'a>(
    args: impl IntoIterator<Item = &'a str>,
) -> Result<GenerateOutcome, CliError> {
    match run_cli(parse(std::iter::once("generate").chain(args)))? {
        ExecutionSummary::Generated(outcome) => Ok(outcome),
        other => panic!("generate produced {other:?}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
