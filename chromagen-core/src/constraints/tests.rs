//! Unit tests for constraint generation.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{
    ClampedRequest, ColorPolicy, Constraint, ConstraintBuilder, ConstraintMode, ConstraintSet,
    OverconstraintPolicy,
};
use crate::{
    density::EdgeBounds,
    error::ChromagenError,
    graph::Graph,
    test_utils::{cycle, star, suite_proptest_config},
};

fn assert_unique_pairs(set: &ConstraintSet) {
    let mut seen = HashSet::new();
    for constraint in set {
        assert!(seen.insert(*constraint), "duplicate pair {constraint:?}");
    }
}

#[test]
fn five_cycle_with_three_colors_is_strict_satisfiable() {
    let graph = cycle(5);
    for seed in 0..32 {
        let generated = ConstraintBuilder::new(6)
            .with_colors(ColorPolicy::FixedCount(3))
            .with_mode(ConstraintMode::Strict)
            .generate(&graph, &mut SmallRng::seed_from_u64(seed))
            .expect("three colors suffice for a 5-cycle");
        let report = generated.report();
        assert_eq!(report.generated(), 6);
        assert_eq!(report.required_colors(), 3);
        assert_eq!(report.forced_conflicts(), 0, "seed {seed}");
        assert_eq!(generated.constraints().forced_conflicts(&graph), 0);
        assert_unique_pairs(generated.constraints());
    }
}

#[rstest]
#[case::strict(ConstraintMode::Strict)]
#[case::collision(ConstraintMode::Collision { target: 1 })]
fn five_cycle_with_two_colors_is_rejected(#[case] mode: ConstraintMode) {
    let err = ConstraintBuilder::new(4)
        .with_colors(ColorPolicy::FixedCount(2))
        .with_mode(mode)
        .generate(&cycle(5), &mut SmallRng::seed_from_u64(1))
        .expect_err("two colors are below max degree + 1");
    assert_eq!(
        err,
        ChromagenError::InsufficientColorBudget {
            supplied: 2,
            required: 3,
        }
    );
}

#[test]
fn free_mode_accepts_a_short_palette() {
    let generated = ConstraintBuilder::new(4)
        .with_colors(ColorPolicy::FixedCount(2))
        .generate(&cycle(5), &mut SmallRng::seed_from_u64(1))
        .expect("free mode ignores the degree bound");
    assert_eq!(generated.report().color_count(), 2);
    assert!(generated.constraints().iter().all(|c| c.color() < 2));
}

#[test]
fn degree_derived_palette_is_raised() {
    let graph = star(6);
    let generated = ConstraintBuilder::new(3)
        .with_colors(ColorPolicy::DegreeDerivedMinimum { at_least: 4 })
        .with_mode(ConstraintMode::Strict)
        .generate(&graph, &mut SmallRng::seed_from_u64(3))
        .expect("raised palette fits the star");
    assert_eq!(generated.report().color_count(), 7);
    assert_eq!(generated.report().required_colors(), 7);
}

#[test]
fn free_mode_keeps_the_degree_derived_budget() {
    let generated = ConstraintBuilder::new(3)
        .with_colors(ColorPolicy::DegreeDerivedMinimum { at_least: 4 })
        .with_mode(ConstraintMode::Free)
        .generate(&star(6), &mut SmallRng::seed_from_u64(3))
        .expect("free mode accepts any non-empty palette");
    assert_eq!(generated.report().color_count(), 4);
    assert_eq!(generated.report().required_colors(), 7);
    assert!(generated.constraints().iter().all(|c| c.color() < 4));
}

#[test]
fn fixed_list_maps_palette_values() {
    let generated = ConstraintBuilder::new(6)
        .with_colors(ColorPolicy::FixedList(vec![7, 3, 7, 9]))
        .with_mode(ConstraintMode::Strict)
        .generate(&cycle(6), &mut SmallRng::seed_from_u64(8))
        .expect("three distinct colors cover a cycle");
    assert_eq!(generated.report().color_count(), 3);
    assert!(
        generated
            .constraints()
            .iter()
            .all(|c| [3, 7, 9].contains(&c.color()))
    );
}

#[test]
fn empty_palette_is_rejected_in_free_mode() {
    let err = ConstraintBuilder::new(1)
        .with_colors(ColorPolicy::FixedList(Vec::new()))
        .generate(&cycle(3), &mut SmallRng::seed_from_u64(0))
        .expect_err("no colors to record");
    assert_eq!(
        err,
        ChromagenError::InsufficientColorBudget {
            supplied: 0,
            required: 1,
        }
    );
}

#[test]
fn empty_graph_is_rejected() {
    let err = ConstraintBuilder::new(1)
        .generate(&Graph::empty(0), &mut SmallRng::seed_from_u64(0))
        .expect_err("no vertices to constrain");
    assert_eq!(err, ChromagenError::InvalidVertexCount { got: 0 });
}

#[test]
fn oversized_request_is_clamped_and_reported() {
    let generated = ConstraintBuilder::new(100)
        .with_colors(ColorPolicy::FixedCount(3))
        .generate(&cycle(5), &mut SmallRng::seed_from_u64(4))
        .expect("clamping is the default");
    let report = generated.report();
    assert_eq!(report.requested(), 100);
    assert_eq!(report.generated(), 15);
    assert_eq!(
        report.clamped(),
        Some(ClampedRequest {
            requested: 100,
            granted: 15,
        })
    );
    assert_unique_pairs(generated.constraints());
}

#[test]
fn oversized_request_can_be_rejected() {
    let err = ConstraintBuilder::new(100)
        .with_colors(ColorPolicy::FixedCount(3))
        .with_overconstraint_policy(OverconstraintPolicy::Reject)
        .generate(&cycle(5), &mut SmallRng::seed_from_u64(4))
        .expect_err("rejection was requested");
    assert_eq!(
        err,
        ChromagenError::OverconstrainedRequest {
            requested: 100,
            maximum: 15,
        }
    );
}

#[test]
fn collision_target_above_constraint_count_is_rejected() {
    let err = ConstraintBuilder::new(5)
        .with_colors(ColorPolicy::FixedCount(3))
        .with_mode(ConstraintMode::Collision { target: 10 })
        .generate(&cycle(5), &mut SmallRng::seed_from_u64(4))
        .expect_err("target exceeds count");
    assert_eq!(
        err,
        ChromagenError::CollisionTargetExceedsConstraints {
            target: 10,
            constraints: 5,
        }
    );
}

#[test]
fn collisions_are_injected_at_the_front() {
    let graph = cycle(31);
    let generated = ConstraintBuilder::new(30)
        .with_colors(ColorPolicy::FixedCount(3))
        .with_mode(ConstraintMode::Collision { target: 5 })
        .generate(&graph, &mut SmallRng::seed_from_u64(21))
        .expect("cycle has room for collisions");
    let (set, report) = generated.into_parts();
    assert_eq!(set.len(), 30);
    assert_eq!(report.collision_target(), 5);
    assert_eq!(report.injected_collisions(), 5);
    assert!(report.collision_count() >= 5);
    assert_unique_pairs(&set);

    for constraint in set.iter().take(report.injected_collisions()) {
        let shared = graph
            .neighbours(constraint.vertex())
            .iter()
            .any(|&neighbour| set.colors_of(neighbour).contains(&constraint.color()));
        assert!(shared, "{constraint:?} copies no neighbour color");
    }
}

#[test]
fn injection_stops_when_no_candidate_remains() {
    // The base pass places nothing, so there is no color to copy.
    let graph = Graph::from_edges(2, [(0, 1)]).expect("valid edge");
    let generated = ConstraintBuilder::new(1)
        .with_colors(ColorPolicy::FixedCount(2))
        .with_mode(ConstraintMode::Collision { target: 1 })
        .generate(&graph, &mut SmallRng::seed_from_u64(0))
        .expect("shortfall is reported, not raised");
    assert_eq!(generated.report().injected_collisions(), 0);
    assert!(generated.constraints().is_empty());
}

#[test]
fn strict_exhaustion_surfaces_as_an_error() {
    let graph = Graph::from_edges(2, [(0, 1)]).expect("valid edge");
    let builder = ConstraintBuilder::new(4)
        .with_colors(ColorPolicy::FixedCount(2))
        .with_mode(ConstraintMode::Strict);
    for seed in 0..32 {
        match builder.generate(&graph, &mut SmallRng::seed_from_u64(seed)) {
            Ok(generated) => assert_eq!(generated.constraints().len(), 4),
            Err(err) => assert_eq!(
                err,
                ChromagenError::ConstraintSpaceExhausted {
                    requested: 4,
                    generated: 2,
                }
            ),
        }
    }
}

#[test]
fn same_seed_reproduces_the_same_constraints() {
    let graph = cycle(12);
    let builder = ConstraintBuilder::new(15)
        .with_colors(ColorPolicy::FixedCount(4))
        .with_mode(ConstraintMode::Collision { target: 3 });
    let first = builder
        .generate(&graph, &mut SmallRng::seed_from_u64(77))
        .expect("fits");
    let second = builder
        .generate(&graph, &mut SmallRng::seed_from_u64(77))
        .expect("fits");
    assert_eq!(first, second);
}

#[test]
fn collision_count_sums_matching_pairs_per_edge() {
    let graph = Graph::from_edges(3, [(0, 1), (1, 2)]).expect("valid edges");
    let set = ConstraintSet::from_constraints(vec![
        Constraint::new(0, 1),
        Constraint::new(0, 2),
        Constraint::new(1, 1),
        Constraint::new(1, 2),
        Constraint::new(2, 2),
    ]);
    assert_eq!(set.collision_count(&graph), 3);
    assert_eq!(set.forced_conflicts(&graph), 0);
    assert_eq!(set.constrained_vertices(), 3);
}

#[test]
fn forced_conflict_needs_two_singletons() {
    let graph = Graph::from_edges(3, [(0, 1), (1, 2)]).expect("valid edges");
    let set = ConstraintSet::from_constraints(vec![
        Constraint::new(0, 4),
        Constraint::new(1, 4),
        Constraint::new(2, 4),
        Constraint::new(2, 5),
    ]);
    assert_eq!(set.forced_conflicts(&graph), 1);
    assert_eq!(set.collision_count(&graph), 2);
}

#[rstest]
#[case::free(false, 0, ConstraintMode::Free)]
#[case::strict(true, 0, ConstraintMode::Strict)]
#[case::collision(true, 2, ConstraintMode::Collision { target: 2 })]
#[case::collision_without_strict(false, 2, ConstraintMode::Collision { target: 2 })]
fn mode_from_flags(#[case] strict: bool, #[case] target: usize, #[case] expected: ConstraintMode) {
    assert_eq!(ConstraintMode::from_flags(strict, target), expected);
}

fn connected_graph(node_count: usize, extra: usize, seed: u64) -> Graph {
    let bounds = EdgeBounds::for_nodes(node_count);
    let edges = (bounds.min_edges() + extra).min(bounds.max_edges());
    Graph::random(node_count, edges, &mut SmallRng::seed_from_u64(seed)).expect("edges fit")
}

proptest! {
    #![proptest_config(suite_proptest_config(48))]

    #[test]
    fn strict_sets_never_force_a_conflict(
        node_count in 3_usize..30,
        extra in 0_usize..40,
        fraction in 0_usize..=100,
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(node_count, extra, seed);
        // Up to one constraint per vertex can always be placed.
        let count = node_count * fraction / 100;
        let generated = ConstraintBuilder::new(count)
            .with_colors(ColorPolicy::DegreeDerivedMinimum { at_least: 1 })
            .with_mode(ConstraintMode::Strict)
            .generate(&graph, &mut SmallRng::seed_from_u64(seed ^ 0x5eed))
            .expect("strict placement below one per vertex succeeds");
        prop_assert_eq!(generated.constraints().len(), count);
        prop_assert_eq!(generated.report().forced_conflicts(), 0);
        prop_assert!(generated.report().color_count() > graph.max_degree());
    }

    #[test]
    fn injected_collisions_are_counted(
        node_count in 4_usize..30,
        extra in 0_usize..40,
        seed in any::<u64>(),
        target_fraction in 1_usize..=25,
    ) {
        let graph = connected_graph(node_count, extra, seed);
        let target = (node_count * target_fraction / 100).max(1);
        let generated = ConstraintBuilder::new(node_count)
            .with_mode(ConstraintMode::Collision { target })
            .generate(&graph, &mut SmallRng::seed_from_u64(seed.rotate_left(7)))
            .expect("collision base below one per vertex succeeds");
        let report = generated.report();
        let set = generated.constraints();
        prop_assert!(report.injected_collisions() <= target);
        prop_assert!(report.collision_count() >= report.injected_collisions());
        if report.injected_collisions() < target {
            // Injection may only stop short once no constrained vertex lacks
            // a color some neighbour holds.
            for vertex in 0..node_count {
                let own = set.colors_of(vertex);
                if own.is_empty() {
                    continue;
                }
                for &neighbour in graph.neighbours(vertex) {
                    prop_assert!(
                        set.colors_of(neighbour).iter().all(|color| own.contains(color)),
                        "vertex {} could still copy a color from {}",
                        vertex,
                        neighbour
                    );
                }
            }
        }
        prop_assert_eq!(
            generated.constraints().len(),
            node_count - target + report.injected_collisions()
        );
    }

    #[test]
    fn free_sets_hold_unique_pairs(
        node_count in 1_usize..20,
        colors in 1_usize..6,
        count in 0_usize..150,
        seed in any::<u64>(),
    ) {
        let graph = Graph::empty(node_count);
        let generated = ConstraintBuilder::new(count)
            .with_colors(ColorPolicy::FixedCount(colors))
            .generate(&graph, &mut SmallRng::seed_from_u64(seed))
            .expect("free mode never exhausts");
        let expected = count.min(node_count * colors);
        prop_assert_eq!(generated.constraints().len(), expected);
        let unique: HashSet<Constraint> = generated.constraints().iter().copied().collect();
        prop_assert_eq!(unique.len(), expected);
    }
}
