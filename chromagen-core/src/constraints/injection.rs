//! Collision injection on top of a strict base.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, warn};

use super::sampling::HeldColors;
use crate::graph::Graph;

/// Adds up to `target` pairs that copy a neighbour's color onto an already
/// constrained vertex, returning them in injection order.
///
/// Each injected pair creates at least one new matching pair on an edge. A
/// vertex leaves the pool once none of its neighbours holds a color it lacks
/// and rejoins when a neighbour gains a color.
pub(super) fn inject<R: Rng>(
    graph: &Graph,
    held: &mut HeldColors,
    target: usize,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let mut injected = Vec::with_capacity(target);
    if target == 0 {
        return injected;
    }

    let mut pool = held.constrained();
    let mut in_pool = vec![false; graph.node_count()];
    for &vertex in &pool {
        mark(&mut in_pool, vertex, true);
    }

    while injected.len() < target && !pool.is_empty() {
        let slot = rng.gen_range(0..pool.len());
        let Some(&vertex) = pool.get(slot) else {
            break;
        };
        let candidates = candidate_colors(graph, held, vertex);
        if candidates.is_empty() {
            pool.swap_remove(slot);
            mark(&mut in_pool, vertex, false);
            continue;
        }

        let pick = rng.gen_range(0..candidates.len());
        let Some(&color) = candidates.iter().nth(pick) else {
            continue;
        };
        held.insert(vertex, color);
        injected.push((vertex, color));

        for &neighbour in graph.neighbours(vertex) {
            let pooled = in_pool.get(neighbour).copied().unwrap_or(true);
            if !pooled && !held.colors(neighbour).is_empty() {
                mark(&mut in_pool, neighbour, true);
                pool.push(neighbour);
            }
        }
    }

    if injected.len() < target {
        warn!(
            target,
            injected = injected.len(),
            "graph ran out of injectable collisions"
        );
    } else {
        debug!(target, "collisions injected");
    }
    injected
}

fn mark(in_pool: &mut [bool], vertex: usize, value: bool) {
    if let Some(slot) = in_pool.get_mut(vertex) {
        *slot = value;
    }
}

/// Colors held by some neighbour of `vertex` but not by `vertex` itself.
fn candidate_colors(graph: &Graph, held: &HeldColors, vertex: usize) -> BTreeSet<usize> {
    graph
        .neighbours(vertex)
        .iter()
        .flat_map(|&neighbour| held.colors(neighbour).iter().copied())
        .filter(|&color| !held.holds(vertex, color))
        .collect()
}
