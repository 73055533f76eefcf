//! Outcome of a generation call.

use super::ConstraintSet;

/// Records a request lowered to the number of distinct pairs available.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClampedRequest {
    /// Constraint count the caller asked for.
    pub requested: usize,
    /// Constraint count actually generated.
    pub granted: usize,
}

/// Counters describing a generated [`ConstraintSet`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintReport {
    pub(super) requested: usize,
    pub(super) generated: usize,
    pub(super) color_count: usize,
    pub(super) required_colors: usize,
    pub(super) collision_count: usize,
    pub(super) forced_conflicts: usize,
    pub(super) collision_target: usize,
    pub(super) injected_collisions: usize,
    pub(super) clamped: Option<ClampedRequest>,
}

impl ConstraintReport {
    /// Constraint count the caller asked for.
    #[rustfmt::skip]
    #[must_use]
    pub const fn requested(&self) -> usize { self.requested }

    /// Number of constraints in the set.
    #[rustfmt::skip]
    #[must_use]
    pub const fn generated(&self) -> usize { self.generated }

    /// Size of the resolved palette.
    #[rustfmt::skip]
    #[must_use]
    pub const fn color_count(&self) -> usize { self.color_count }

    /// `max_degree + 1` for the graph the set was generated on.
    #[rustfmt::skip]
    #[must_use]
    pub const fn required_colors(&self) -> usize { self.required_colors }

    /// Matching color pairs across edges, see [`ConstraintSet::collision_count`].
    #[rustfmt::skip]
    #[must_use]
    pub const fn collision_count(&self) -> usize { self.collision_count }

    /// Edges with both endpoints forced onto one shared color.
    #[rustfmt::skip]
    #[must_use]
    pub const fn forced_conflicts(&self) -> usize { self.forced_conflicts }

    /// Collisions the mode asked for.
    #[rustfmt::skip]
    #[must_use]
    pub const fn collision_target(&self) -> usize { self.collision_target }

    /// Collisions actually injected; below the target only when the graph
    /// ran out of injectable pairs.
    #[rustfmt::skip]
    #[must_use]
    pub const fn injected_collisions(&self) -> usize { self.injected_collisions }

    /// Present when the request was lowered.
    #[rustfmt::skip]
    #[must_use]
    pub const fn clamped(&self) -> Option<ClampedRequest> { self.clamped }
}

/// A [`ConstraintSet`] together with its [`ConstraintReport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedConstraints {
    pub(super) constraints: ConstraintSet,
    pub(super) report: ConstraintReport,
}

impl GeneratedConstraints {
    /// Generated constraints in output order.
    #[rustfmt::skip]
    #[must_use]
    pub const fn constraints(&self) -> &ConstraintSet { &self.constraints }

    /// Counters for the generated set.
    #[rustfmt::skip]
    #[must_use]
    pub const fn report(&self) -> &ConstraintReport { &self.report }

    /// Splits into the set and its report.
    #[must_use]
    pub fn into_parts(self) -> (ConstraintSet, ConstraintReport) {
        (self.constraints, self.report)
    }
}
