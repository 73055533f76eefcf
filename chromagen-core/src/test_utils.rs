//! Shared test utilities for `chromagen-core`.

use chromagen_test_support::property::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::Graph;

/// Builds a proptest configuration from the shared run profile.
///
/// Property suites read `CHROMAGEN_PROPTEST_CASES` and `CHROMAGEN_PBT_FORK`
/// through the profile so every suite scales the same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Cycle `0 -- 1 -- ... -- (node_count - 1) -- 0`.
///
/// # Panics
/// Panics when `node_count < 3`.
#[must_use]
pub(crate) fn cycle(node_count: usize) -> Graph {
    assert!(node_count >= 3, "a simple cycle needs three vertices");
    Graph::from_edges(
        node_count,
        (0..node_count).map(|vertex| (vertex, (vertex + 1) % node_count)),
    )
    .expect("cycle edges are valid")
}

/// Star with centre `0` and `leaves` outer vertices.
#[must_use]
pub(crate) fn star(leaves: usize) -> Graph {
    Graph::from_edges(leaves + 1, (1..=leaves).map(|leaf| (0, leaf))).expect("star edges are valid")
}
