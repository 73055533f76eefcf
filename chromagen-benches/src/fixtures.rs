//! Seeded graph fixtures shared by the benchmarks.

use chromagen_core::{DensityMode, Graph, GraphBuilder};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Seed used for every fixture and measured generator.
pub const SEED: u64 = 42;

/// Returns the generator every benchmark starts from.
#[must_use]
pub fn bench_rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}

/// Builds a banded random graph from [`SEED`].
///
/// # Errors
/// Returns [`BenchSetupError::Generation`] if graph generation fails.
pub fn banded_graph(node_count: usize, density: DensityMode) -> Result<Graph, BenchSetupError> {
    let graph = GraphBuilder::new(node_count)
        .with_density(density)
        .build(&mut bench_rng())?;
    Ok(graph)
}

/// Number of colors a graph-aware generator needs for `graph`.
#[must_use]
pub fn required_colors(graph: &Graph) -> usize {
    graph.max_degree().saturating_add(1)
}
