//! Command-line interface orchestration for chromagen.
//!
//! `generate` builds one graph and optional constraints, `inspect` reports
//! statistics for existing files and `matrix` writes the benchmark corpus
//! together with its CSV index.

mod commands;
mod matrix;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GenerateOutcome, InspectCommand,
    MatrixCommand, render_summary, run_cli,
};
pub use matrix::{Algorithm, BenchmarkCase, MatrixPlan, MatrixReport, NO_CONSTRAINTS};

#[cfg(test)]
mod test_helpers;
