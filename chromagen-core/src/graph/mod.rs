//! Undirected simple graphs and their random construction.
//!
//! A [`Graph`] stores its edges in generation order together with adjacency
//! lists so the constraint generator can look up neighbours cheaply. Graphs
//! are immutable once built.

mod builder;

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    Result,
    density::max_edges,
    error::{ChromagenError, GraphError},
};

pub use builder::GraphBuilder;

/// An undirected edge in the orientation it was generated or parsed in.
///
/// # Examples
/// ```
/// use chromagen_core::Edge;
///
/// let edge = Edge::new(3, 1);
/// assert_eq!(edge.source(), 3);
/// assert_eq!(edge.canonical(), (1, 3));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge between `source` and `target`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self { Self { source, target } }

    /// Returns the first endpoint as written.
    #[rustfmt::skip]
    #[must_use]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the second endpoint as written.
    #[rustfmt::skip]
    #[must_use]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the endpoints ordered smallest first, identifying the edge
    /// regardless of orientation.
    #[must_use]
    pub const fn canonical(&self) -> (usize, usize) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

/// An immutable undirected simple graph over vertices `0..node_count`.
///
/// # Examples
/// ```
/// use chromagen_core::Graph;
///
/// let graph = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.degree(1), 2);
/// assert_eq!(graph.max_degree(), 2);
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates a graph with `node_count` vertices and no edges.
    #[must_use]
    pub fn empty(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// # Errors
    /// Returns [`ChromagenError::Graph`] when an edge is a self-loop, repeats
    /// an earlier edge in either orientation, or references a vertex outside
    /// `0..node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::empty(node_count);
        let mut seen = HashSet::new();
        for (source, target) in edges {
            for vertex in [source, target] {
                if vertex >= node_count {
                    return Err(GraphError::VertexOutOfRange { vertex, node_count }.into());
                }
            }
            if source == target {
                return Err(GraphError::SelfLoop { vertex: source }.into());
            }
            let edge = Edge::new(source, target);
            if !seen.insert(edge.canonical()) {
                return Err(GraphError::DuplicateEdge {
                    first: source,
                    second: target,
                }
                .into());
            }
            graph.push_edge(edge);
        }
        Ok(graph)
    }

    /// Generates a random graph with exactly `edge_count` edges.
    ///
    /// Each round shuffles the full vertex list and links consecutive
    /// vertices of the permutation, skipping pairs that are already joined,
    /// until `edge_count` edges exist. With `edge_count == node_count - 1` the
    /// first round is a Hamiltonian path, so the result is a spanning tree.
    /// A zero `node_count` yields the empty graph.
    ///
    /// # Errors
    /// Returns [`ChromagenError::EdgeCountExceedsMaximum`] when `edge_count`
    /// exceeds `node_count * (node_count - 1) / 2`.
    ///
    /// # Examples
    /// ```
    /// use chromagen_core::Graph;
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let graph = Graph::random(6, 9, &mut rng)?;
    /// assert_eq!(graph.edge_count(), 9);
    /// # Ok::<(), chromagen_core::ChromagenError>(())
    /// ```
    #[instrument(name = "graph.random", err, skip(rng))]
    pub fn random<R: Rng>(node_count: usize, edge_count: usize, rng: &mut R) -> Result<Self> {
        if node_count == 0 {
            return Ok(Self::empty(0));
        }
        let maximum = max_edges(node_count);
        if edge_count > maximum {
            return Err(ChromagenError::EdgeCountExceedsMaximum {
                requested: edge_count,
                node_count,
                maximum,
            });
        }

        let mut graph = Self::empty(node_count);
        graph.edges.reserve(edge_count);
        let mut seen = HashSet::with_capacity(edge_count);
        let mut permutation: Vec<usize> = (0..node_count).collect();
        let mut rounds = 0_usize;

        while graph.edges.len() < edge_count {
            permutation.shuffle(rng);
            rounds += 1;
            for pair in permutation.windows(2) {
                let &[source, target] = pair else {
                    continue;
                };
                let edge = Edge::new(source, target);
                if seen.insert(edge.canonical()) {
                    graph.push_edge(edge);
                    if graph.edges.len() >= edge_count {
                        break;
                    }
                }
            }
        }

        debug!(node_count, edge_count, rounds, "random graph generated");
        Ok(graph)
    }

    fn push_edge(&mut self, edge: Edge) {
        if let Some(list) = self.adjacency.get_mut(edge.source) {
            list.push(edge.target);
        }
        if let Some(list) = self.adjacency.get_mut(edge.target) {
            list.push(edge.source);
        }
        self.edges.push(edge);
    }

    /// Number of vertices.
    #[rustfmt::skip]
    #[must_use]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Number of edges.
    #[rustfmt::skip]
    #[must_use]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Edges in generation order.
    #[rustfmt::skip]
    #[must_use]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Neighbours of `vertex` in the order their edges were added.
    ///
    /// Vertices outside the graph have no neighbours.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> &[usize] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbours(vertex).len()
    }

    /// Largest vertex degree, or zero for an edgeless graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns `true` when `left` and `right` are joined in either orientation.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        self.neighbours(left).contains(&right)
    }

    /// Returns `true` when every vertex is reachable from vertex `0`.
    ///
    /// The empty graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.node_count == 0 {
            return true;
        }
        let mut visited = vec![false; self.node_count];
        let mut stack = vec![0_usize];
        let mut reached = 0_usize;
        while let Some(vertex) = stack.pop() {
            let Some(flag) = visited.get_mut(vertex) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            reached += 1;
            stack.extend(self.neighbours(vertex).iter().copied());
        }
        reached == self.node_count
    }
}
