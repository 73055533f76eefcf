//! Support library for the chromagen CLI binary.
//!
//! Exposes the command pipeline and logging setup so doctests and tests can
//! drive commands without spawning a subprocess.

pub mod cli;
pub mod logging;
