//! Per-vertex color constraints and their generation.
//!
//! A [`ConstraintSet`] is an ordered list of `(vertex, color)` pairs. The
//! [`ConstraintBuilder`] produces one from a [`Graph`](crate::Graph) in one
//! of three [`ConstraintMode`]s:
//!
//! - `Free` samples pairs uniformly with no regard for adjacency.
//! - `Strict` never records a color on a vertex when a neighbour already
//!   holds exactly that single color, so no edge ends up with both endpoints
//!   forced onto the same color.
//! - `Collision` builds a strict base and then injects a fixed number of
//!   pairs that copy a neighbour's color, giving a known count of
//!   unsatisfiable adjacencies.

mod generator;
mod injection;
mod policy;
mod report;
mod sampling;

use crate::graph::Graph;

pub use generator::ConstraintBuilder;
pub use policy::{ColorPolicy, ConstraintMode, OverconstraintPolicy};
pub use report::{ClampedRequest, ConstraintReport, GeneratedConstraints};

/// A single `(vertex, color)` pair.
///
/// # Examples
/// ```
/// use chromagen_core::Constraint;
///
/// let constraint = Constraint::new(4, 2);
/// assert_eq!(constraint.vertex(), 4);
/// assert_eq!(constraint.color(), 2);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Constraint {
    vertex: usize,
    color: usize,
}

impl Constraint {
    /// Creates a constraint recording `color` on `vertex`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(vertex: usize, color: usize) -> Self { Self { vertex, color } }

    /// Vertex the color is recorded on.
    #[rustfmt::skip]
    #[must_use]
    pub const fn vertex(&self) -> usize { self.vertex }

    /// Recorded color value.
    #[rustfmt::skip]
    #[must_use]
    pub const fn color(&self) -> usize { self.color }
}

/// An ordered sequence of [`Constraint`]s.
///
/// # Examples
/// ```
/// use chromagen_core::{Constraint, ConstraintSet, Graph};
///
/// let graph = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// let set = ConstraintSet::from_constraints(vec![
///     Constraint::new(0, 1),
///     Constraint::new(1, 1),
///     Constraint::new(1, 2),
/// ]);
/// assert_eq!(set.colors_of(1), vec![1, 2]);
/// assert_eq!(set.collision_count(&graph), 1);
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Wraps an explicit list of constraints, keeping its order.
    #[must_use]
    pub const fn from_constraints(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    /// Constraints in sequence order.
    #[rustfmt::skip]
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] { &self.constraints }

    /// Number of constraints.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.constraints.len() }

    /// Returns `true` when no constraint is recorded.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.constraints.is_empty() }

    /// Iterates over the constraints in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Colors recorded on `vertex`, in sequence order.
    #[must_use]
    pub fn colors_of(&self, vertex: usize) -> Vec<usize> {
        self.constraints
            .iter()
            .filter(|constraint| constraint.vertex == vertex)
            .map(|constraint| constraint.color)
            .collect()
    }

    /// Number of distinct vertices carrying at least one constraint.
    #[must_use]
    pub fn constrained_vertices(&self) -> usize {
        let mut vertices: Vec<usize> = self.constraints.iter().map(|c| c.vertex).collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices.len()
    }

    /// Counts matching color pairs across every edge of `graph`.
    ///
    /// For each edge the colors recorded on one endpoint are compared with
    /// every color recorded on the other; each equal pair counts once.
    /// Constraints on vertices outside the graph are ignored.
    #[must_use]
    pub fn collision_count(&self, graph: &Graph) -> usize {
        let per_vertex = self.per_vertex(graph.node_count());
        graph
            .edges()
            .iter()
            .map(|edge| {
                let left = colors_at(&per_vertex, edge.source());
                let right = colors_at(&per_vertex, edge.target());
                left.iter()
                    .map(|color| right.iter().filter(|other| *other == color).count())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Counts edges whose endpoints both hold exactly one color and share it.
    ///
    /// Such an edge cannot be colored properly. Strict generation without
    /// injection never produces one.
    #[must_use]
    pub fn forced_conflicts(&self, graph: &Graph) -> usize {
        let per_vertex = self.per_vertex(graph.node_count());
        graph
            .edges()
            .iter()
            .filter(|edge| {
                matches!(
                    (colors_at(&per_vertex, edge.source()), colors_at(&per_vertex, edge.target())),
                    ([left], [right]) if left == right
                )
            })
            .count()
    }

    fn per_vertex(&self, node_count: usize) -> Vec<Vec<usize>> {
        let mut per_vertex = vec![Vec::new(); node_count];
        for constraint in &self.constraints {
            if let Some(colors) = per_vertex.get_mut(constraint.vertex) {
                colors.push(constraint.color);
            }
        }
        per_vertex
    }
}

fn colors_at(per_vertex: &[Vec<usize>], vertex: usize) -> &[usize] {
    per_vertex
        .get(vertex)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
