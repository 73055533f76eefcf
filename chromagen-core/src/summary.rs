//! Statistics reported after a generation run.

use std::fmt;

use crate::{constraints::ConstraintSet, graph::Graph};

/// Counts describing a generated graph and its constraints.
///
/// # Examples
/// ```
/// use chromagen_core::{GenerationSummary, Graph};
///
/// let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)])?;
/// let summary = GenerationSummary::for_graph(&graph, 4);
/// assert_eq!(summary.density_percent(), 50.0);
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationSummary {
    node_count: usize,
    edge_count: usize,
    constraint_count: usize,
    color_count: usize,
    collision_count: usize,
}

impl GenerationSummary {
    /// Summarises a graph without constraints.
    #[must_use]
    pub fn for_graph(graph: &Graph, color_count: usize) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            constraint_count: 0,
            color_count,
            collision_count: 0,
        }
    }

    /// Adds the constraint count and the collision count against `graph`.
    #[must_use]
    pub fn with_constraints(mut self, graph: &Graph, constraints: &ConstraintSet) -> Self {
        self.constraint_count = constraints.len();
        self.collision_count = constraints.collision_count(graph);
        self
    }

    /// Number of vertices.
    #[rustfmt::skip]
    #[must_use]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Number of edges.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Number of constraints, zero without a set.
    #[rustfmt::skip]
    #[must_use]
    pub const fn constraint_count(&self) -> usize { self.constraint_count }

    /// Size of the color budget.
    #[rustfmt::skip]
    #[must_use]
    pub const fn color_count(&self) -> usize { self.color_count }

    /// Matching color pairs across edges.
    #[rustfmt::skip]
    #[must_use]
    pub const fn collision_count(&self) -> usize { self.collision_count }

    /// Edge count as a percentage of the complete graph's edge count.
    ///
    /// Graphs with fewer than two vertices report `0.0`.
    #[must_use]
    pub fn density_percent(&self) -> f64 {
        if self.node_count < 2 {
            return 0.0;
        }
        let (edges, nodes) = (self.edge_count as f64, self.node_count as f64);
        200.0 * edges / (nodes * (nodes - 1.0))
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices: {}", self.node_count)?;
        writeln!(f, "edges: {}", self.edge_count)?;
        writeln!(f, "constraints: {}", self.constraint_count)?;
        writeln!(f, "colors: {}", self.color_count)?;
        writeln!(f, "collisions: {}", self.collision_count)?;
        write!(f, "density: {:.2}%", self.density_percent())
    }
}
