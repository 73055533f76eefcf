//! Edge-count classification.
//!
//! Normalises a requested edge count into the range a simple graph on
//! `node_count` vertices can hold and, when a [`DensityMode`] is selected,
//! snaps it into the sparse or dense band between the spanning-tree minimum
//! and the complete-graph maximum.

use tracing::debug;

/// Selects the edge-density band a generated graph should fall into.
///
/// # Examples
/// ```
/// use chromagen_core::{DensityMode, classify};
///
/// assert_eq!(classify(10, -1, Some(DensityMode::Sparse)), 11);
/// assert_eq!(classify(10, -1, Some(DensityMode::Dense)), 36);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DensityMode {
    /// Edge counts in the lower quartile band, just above a spanning tree.
    Sparse,
    /// Edge counts in the upper quartile band, close to the complete graph.
    Dense,
}

impl DensityMode {
    /// Returns the lowercase label used in logs and file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sparse => "sparse",
            Self::Dense => "dense",
        }
    }
}

/// Boundaries used to classify edge counts for a given vertex count.
///
/// # Examples
/// ```
/// use chromagen_core::EdgeBounds;
///
/// let bounds = EdgeBounds::for_nodes(10);
/// assert_eq!(bounds.min_edges(), 9);
/// assert_eq!(bounds.max_edges(), 45);
/// assert_eq!(bounds.mean(), 27);
/// assert_eq!(bounds.q1(), 11);
/// assert_eq!(bounds.q3(), 36);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EdgeBounds {
    min_edges: usize,
    max_edges: usize,
    mean: usize,
    q1: usize,
    q3: usize,
}

impl EdgeBounds {
    /// Computes the bounds for a graph of `node_count` vertices.
    ///
    /// An empty vertex set yields all-zero bounds apart from `q1`, which is
    /// always at least one.
    #[must_use]
    pub fn for_nodes(node_count: usize) -> Self {
        let min_edges = node_count.saturating_sub(1);
        let max_edges = max_edges(node_count);
        let mean = (max_edges + min_edges) / 2;
        // floor(0.6 * x) computed exactly on integers.
        let lower_half = (min_edges + mean) / 2;
        let q1 = lower_half.saturating_mul(3) / 5 + 1;
        let q3 = (max_edges + mean) / 2;
        Self {
            min_edges,
            max_edges,
            mean,
            q1,
            q3,
        }
    }

    /// Edge count of a spanning tree.
    #[rustfmt::skip]
    #[must_use]
    pub const fn min_edges(&self) -> usize { self.min_edges }

    /// Edge count of the complete graph.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_edges(&self) -> usize { self.max_edges }

    /// Midpoint between the minimum and maximum edge counts.
    #[rustfmt::skip]
    #[must_use]
    pub const fn mean(&self) -> usize { self.mean }

    /// Upper limit of the sparse band.
    #[rustfmt::skip]
    #[must_use]
    pub const fn q1(&self) -> usize { self.q1 }

    /// Lower limit of the dense band.
    #[rustfmt::skip]
    #[must_use]
    pub const fn q3(&self) -> usize { self.q3 }

    /// Clamps a signed request into `[min_edges, max_edges]`.
    ///
    /// Negative requests mean "unset" and resolve to the spanning-tree
    /// minimum.
    #[must_use]
    pub fn clamp(&self, requested_edges: i64) -> usize {
        usize::try_from(requested_edges)
            .map_or(self.min_edges, |value| value.clamp(self.min_edges, self.max_edges))
    }
}

/// Number of edges in the complete graph on `node_count` vertices.
#[must_use]
pub fn max_edges(node_count: usize) -> usize {
    node_count.saturating_mul(node_count.saturating_sub(1)) / 2
}

/// Validates `requested_edges` for a graph of `node_count` vertices.
///
/// The request is clamped into the valid range first. Without a density mode
/// the clamped value is returned unchanged. In sparse mode it is kept only if
/// it lies strictly between the minimum and `q1`, otherwise it snaps to `q1`;
/// in dense mode it is kept only if it exceeds `q3`, otherwise it snaps to
/// `q3`. The snapped value is clamped into the valid range again, which only
/// matters for graphs of seven or fewer vertices.
///
/// # Examples
/// ```
/// use chromagen_core::{DensityMode, classify};
///
/// assert_eq!(classify(10, 20, None), 20);
/// assert_eq!(classify(10, 100, None), 45);
/// assert_eq!(classify(10, 10, Some(DensityMode::Sparse)), 10);
/// assert_eq!(classify(10, 40, Some(DensityMode::Dense)), 40);
/// ```
#[must_use]
pub fn classify(node_count: usize, requested_edges: i64, density: Option<DensityMode>) -> usize {
    let bounds = EdgeBounds::for_nodes(node_count);
    let clamped = bounds.clamp(requested_edges);
    let Some(mode) = density else {
        return clamped;
    };

    let banded = match mode {
        DensityMode::Sparse if clamped > bounds.min_edges && clamped < bounds.q1 => clamped,
        DensityMode::Sparse => bounds.q1,
        DensityMode::Dense if clamped > bounds.q3 => clamped,
        DensityMode::Dense => bounds.q3,
    };
    let validated = banded.clamp(bounds.min_edges, bounds.max_edges);
    debug!(
        node_count,
        requested_edges,
        density = mode.as_str(),
        q1 = bounds.q1,
        q3 = bounds.q3,
        validated,
        "classified edge count"
    );
    validated
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    use crate::test_utils::suite_proptest_config;

    #[rstest]
    #[case::unset_sparse(10, -1, Some(DensityMode::Sparse), 11)]
    #[case::unset_dense(10, -1, Some(DensityMode::Dense), 36)]
    #[case::unset_plain(10, -1, None, 9)]
    #[case::above_max(10, 1_000, None, 45)]
    #[case::inside_sparse_band(10, 10, Some(DensityMode::Sparse), 10)]
    #[case::at_q1_snaps(10, 11, Some(DensityMode::Sparse), 11)]
    #[case::dense_request_snaps(10, 20, Some(DensityMode::Sparse), 11)]
    #[case::at_q3_snaps(10, 36, Some(DensityMode::Dense), 36)]
    #[case::inside_dense_band(10, 37, Some(DensityMode::Dense), 37)]
    #[case::complete_dense(10, 45, Some(DensityMode::Dense), 45)]
    #[case::single_vertex(1, 5, Some(DensityMode::Sparse), 0)]
    #[case::four_vertices_sparse(4, -1, Some(DensityMode::Sparse), 3)]
    #[case::empty(0, 3, None, 0)]
    fn classify_matches_reference_values(
        #[case] node_count: usize,
        #[case] requested: i64,
        #[case] density: Option<DensityMode>,
        #[case] expected: usize,
    ) {
        assert_eq!(classify(node_count, requested, density), expected);
    }

    #[rstest]
    #[case(8, 7, 28, 17, 8, 22)]
    #[case(20, 19, 190, 104, 37, 147)]
    fn bounds_follow_quartile_formulas(
        #[case] node_count: usize,
        #[case] min_edges: usize,
        #[case] max_edges: usize,
        #[case] mean: usize,
        #[case] q1: usize,
        #[case] q3: usize,
    ) {
        let bounds = EdgeBounds::for_nodes(node_count);
        assert_eq!(bounds.min_edges(), min_edges);
        assert_eq!(bounds.max_edges(), max_edges);
        assert_eq!(bounds.mean(), mean);
        assert_eq!(bounds.q1(), q1);
        assert_eq!(bounds.q3(), q3);
    }

    fn density_strategy() -> impl Strategy<Value = Option<DensityMode>> {
        prop_oneof![
            Just(None),
            Just(Some(DensityMode::Sparse)),
            Just(Some(DensityMode::Dense)),
        ]
    }

    proptest! {
        #![proptest_config(suite_proptest_config(256))]

        #[test]
        fn classify_stays_in_valid_range(
            node_count in 1_usize..400,
            requested in -1_000_i64..200_000,
            density in density_strategy(),
        ) {
            let bounds = EdgeBounds::for_nodes(node_count);
            let edges = classify(node_count, requested, density);
            prop_assert!(edges >= bounds.min_edges());
            prop_assert!(edges <= bounds.max_edges());
        }

        #[test]
        fn sparse_results_stay_in_lower_band(
            node_count in 8_usize..400,
            requested in -1_000_i64..200_000,
        ) {
            let bounds = EdgeBounds::for_nodes(node_count);
            let edges = classify(node_count, requested, Some(DensityMode::Sparse));
            prop_assert!(edges > bounds.min_edges());
            prop_assert!(edges <= bounds.q1());
        }

        #[test]
        fn dense_results_stay_in_upper_band(
            node_count in 1_usize..400,
            requested in -1_000_i64..200_000,
        ) {
            let bounds = EdgeBounds::for_nodes(node_count);
            let edges = classify(node_count, requested, Some(DensityMode::Dense));
            prop_assert!(edges >= bounds.q3());
            prop_assert!(edges <= bounds.max_edges());
        }
    }
}
