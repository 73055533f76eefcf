//! Base pass: uniform pair sampling with optional neighbour protection.

use rand::Rng;
use tracing::debug;

use crate::{Result, error::ChromagenError, graph::Graph};

/// Palette indices recorded per vertex during one generation call.
#[derive(Debug)]
pub(super) struct HeldColors {
    per_vertex: Vec<Vec<usize>>,
}

impl HeldColors {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            per_vertex: vec![Vec::new(); node_count],
        }
    }

    pub(super) fn colors(&self, vertex: usize) -> &[usize] {
        self.per_vertex
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(super) fn holds(&self, vertex: usize, color: usize) -> bool {
        self.colors(vertex).contains(&color)
    }

    pub(super) fn insert(&mut self, vertex: usize, color: usize) {
        if let Some(colors) = self.per_vertex.get_mut(vertex) {
            colors.push(color);
        }
    }

    /// Vertices holding at least one color, ascending.
    pub(super) fn constrained(&self) -> Vec<usize> {
        self.per_vertex
            .iter()
            .enumerate()
            .filter(|(_, colors)| !colors.is_empty())
            .map(|(vertex, _)| vertex)
            .collect()
    }

    /// Returns `true` when some neighbour of `vertex` holds exactly `color`
    /// and nothing else.
    pub(super) fn boxes_in_neighbour(&self, graph: &Graph, vertex: usize, color: usize) -> bool {
        graph
            .neighbours(vertex)
            .iter()
            .any(|&neighbour| matches!(self.colors(neighbour), [only] if *only == color))
    }

    fn accepts(&self, graph: &Graph, vertex: usize, color: usize, graph_aware: bool) -> bool {
        !self.holds(vertex, color) && !(graph_aware && self.boxes_in_neighbour(graph, vertex, color))
    }

    fn any_acceptable(&self, graph: &Graph, palette_len: usize, graph_aware: bool) -> bool {
        (0..graph.node_count()).any(|vertex| {
            (0..palette_len).any(|color| self.accepts(graph, vertex, color, graph_aware))
        })
    }
}

/// Parameters of one base pass.
#[derive(Clone, Copy, Debug)]
pub(super) struct BasePass {
    pub(super) palette_len: usize,
    pub(super) count: usize,
    pub(super) graph_aware: bool,
}

impl BasePass {
    /// Samples `count` new pairs of `(vertex, palette index)` into `held`,
    /// returning them in acceptance order.
    ///
    /// Sampling is uniform over vertices and palette indices. After as many
    /// consecutive rejections as there are pairs in total, a full scan
    /// decides whether any acceptable pair is left.
    pub(super) fn run<R: Rng>(
        self,
        graph: &Graph,
        held: &mut HeldColors,
        rng: &mut R,
    ) -> Result<Vec<(usize, usize)>> {
        let node_count = graph.node_count();
        let mut accepted = Vec::with_capacity(self.count);
        if self.count == 0 || node_count == 0 || self.palette_len == 0 {
            return Ok(accepted);
        }

        let stall_limit = node_count.saturating_mul(self.palette_len);
        let mut misses = 0_usize;
        let mut scans = 0_usize;
        while accepted.len() < self.count {
            let vertex = rng.gen_range(0..node_count);
            let color = rng.gen_range(0..self.palette_len);
            if held.accepts(graph, vertex, color, self.graph_aware) {
                held.insert(vertex, color);
                accepted.push((vertex, color));
                misses = 0;
                continue;
            }

            misses += 1;
            if misses >= stall_limit {
                scans += 1;
                if !held.any_acceptable(graph, self.palette_len, self.graph_aware) {
                    return Err(ChromagenError::ConstraintSpaceExhausted {
                        requested: self.count,
                        generated: accepted.len(),
                    });
                }
                misses = 0;
            }
        }

        debug!(
            count = self.count,
            graph_aware = self.graph_aware,
            scans,
            "base constraints sampled"
        );
        Ok(accepted)
    }
}
