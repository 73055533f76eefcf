//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside the measured closures.

use chromagen_core::ChromagenError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph or constraint generation failed.
    #[error("fixture generation failed: {0}")]
    Generation(#[from] ChromagenError),
}
