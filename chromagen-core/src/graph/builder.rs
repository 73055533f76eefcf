//! Builder combining edge-count classification with random construction.

use rand::Rng;
use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    density::{DensityMode, classify},
    graph::Graph,
};

/// Configures and generates random [`Graph`] instances.
///
/// The requested edge count defaults to `-1`, which classifies to the
/// spanning-tree minimum unless a density band overrides it.
///
/// # Examples
/// ```
/// use chromagen_core::{DensityMode, GraphBuilder};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = GraphBuilder::new(10)
///     .with_density(DensityMode::Sparse)
///     .build(&mut rng)?;
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.edge_count(), 11);
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    node_count: usize,
    requested_edges: i64,
    density: Option<DensityMode>,
}

impl GraphBuilder {
    /// Creates a builder for a graph of `node_count` vertices.
    #[must_use]
    pub const fn new(node_count: usize) -> Self {
        Self {
            node_count,
            requested_edges: -1,
            density: None,
        }
    }

    /// Overrides the requested edge count. Negative values mean "unset".
    #[must_use]
    pub const fn with_requested_edges(mut self, edges: i64) -> Self {
        self.requested_edges = edges;
        self
    }

    /// Selects a density band, or clears it with `None`.
    #[must_use]
    pub const fn with_density_mode(mut self, density: Option<DensityMode>) -> Self {
        self.density = density;
        self
    }

    /// Selects a density band.
    #[must_use]
    pub const fn with_density(self, density: DensityMode) -> Self {
        self.with_density_mode(Some(density))
    }

    /// Returns the configured vertex count.
    #[rustfmt::skip]
    #[must_use]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the configured edge request.
    #[rustfmt::skip]
    #[must_use]
    pub const fn requested_edges(&self) -> i64 { self.requested_edges }

    /// Returns the configured density band.
    #[rustfmt::skip]
    #[must_use]
    pub const fn density(&self) -> Option<DensityMode> { self.density }

    /// Edge count the builder will generate after classification.
    #[must_use]
    pub fn target_edges(&self) -> usize {
        if self.node_count == 0 {
            return 0;
        }
        classify(self.node_count, self.requested_edges, self.density)
    }

    /// Classifies the edge request and generates the graph.
    ///
    /// # Errors
    /// Propagates [`Graph::random`] failures; with a classified edge count
    /// these do not occur in practice.
    #[instrument(
        name = "graph.build",
        err,
        skip(self, rng),
        fields(node_count = self.node_count, density = field::Empty, edges = field::Empty),
    )]
    pub fn build<R: Rng>(self, rng: &mut R) -> Result<Graph> {
        let span = Span::current();
        span.record(
            "density",
            field::display(self.density.map_or("unset", DensityMode::as_str)),
        );
        let edges = self.target_edges();
        span.record("edges", edges);

        let graph = Graph::random(self.node_count, edges, rng)?;
        info!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            max_degree = graph.max_degree(),
            "graph generated"
        );
        Ok(graph)
    }
}
