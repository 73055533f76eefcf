//! Benchmark parameter types.
//!
//! Each struct doubles as the Criterion parameter label through `Display`.

use std::fmt;

use chromagen_core::DensityMode;

/// Parameters for a graph generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices.
    pub node_count: usize,
    /// Density band the edge count is snapped into.
    pub density: DensityMode,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.node_count, self.density.as_str())
    }
}

/// Parameters for a constraint generation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ConstraintBenchParams {
    /// Number of vertices in the fixture graph.
    pub node_count: usize,
    /// Constraints requested per generation.
    pub count: usize,
    /// Collisions injected per generation.
    pub collisions: usize,
}

impl fmt::Display for ConstraintBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},c={},k={}",
            self.node_count, self.count, self.collisions
        )
    }
}
