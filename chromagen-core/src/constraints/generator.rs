//! Builder that turns a graph into a [`ConstraintSet`].

use rand::Rng;
use tracing::{Span, field, info, instrument, warn};

use super::{
    Constraint, ConstraintSet,
    injection::inject,
    policy::{ColorPolicy, ConstraintMode, OverconstraintPolicy},
    report::{ClampedRequest, ConstraintReport, GeneratedConstraints},
    sampling::{BasePass, HeldColors},
};
use crate::{Result, error::ChromagenError, graph::Graph};

/// Configures constraint generation for a borrowed [`Graph`].
///
/// The builder holds no state between calls; each [`generate`] call works
/// on its own bookkeeping and the caller's random number generator.
///
/// [`generate`]: ConstraintBuilder::generate
///
/// # Examples
/// ```
/// use chromagen_core::{ColorPolicy, ConstraintBuilder, ConstraintMode, Graph};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let cycle = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])?;
/// let generated = ConstraintBuilder::new(6)
///     .with_colors(ColorPolicy::FixedCount(3))
///     .with_mode(ConstraintMode::Strict)
///     .generate(&cycle, &mut SmallRng::seed_from_u64(7))?;
/// assert_eq!(generated.constraints().len(), 6);
/// assert_eq!(generated.report().forced_conflicts(), 0);
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConstraintBuilder {
    count: usize,
    colors: ColorPolicy,
    mode: ConstraintMode,
    overconstraint: OverconstraintPolicy,
}

impl ConstraintBuilder {
    /// Creates a builder requesting `count` constraints in free mode with
    /// the default palette policy.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            colors: ColorPolicy::default(),
            mode: ConstraintMode::default(),
            overconstraint: OverconstraintPolicy::default(),
        }
    }

    /// Sets the palette policy.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorPolicy) -> Self {
        self.colors = colors;
        self
    }

    /// Sets the generation mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ConstraintMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets what happens when `count` exceeds the available pairs.
    #[must_use]
    pub const fn with_overconstraint_policy(mut self, policy: OverconstraintPolicy) -> Self {
        self.overconstraint = policy;
        self
    }

    /// Requested constraint count.
    #[rustfmt::skip]
    #[must_use]
    pub const fn count(&self) -> usize { self.count }

    /// Configured palette policy.
    #[rustfmt::skip]
    #[must_use]
    pub const fn colors(&self) -> &ColorPolicy { &self.colors }

    /// Configured generation mode.
    #[rustfmt::skip]
    #[must_use]
    pub const fn mode(&self) -> ConstraintMode { self.mode }

    /// Configured overconstraint policy.
    #[rustfmt::skip]
    #[must_use]
    pub const fn overconstraint_policy(&self) -> OverconstraintPolicy { self.overconstraint }

    /// Generates constraints for `graph`.
    ///
    /// Injected collision pairs precede the base pairs in the returned set,
    /// the most recently injected first.
    ///
    /// # Errors
    /// - [`ChromagenError::InvalidVertexCount`] when `graph` has no vertices.
    /// - [`ChromagenError::InsufficientColorBudget`] when the palette is empty
    ///   or, in strict and collision modes, smaller than `max_degree + 1`.
    /// - [`ChromagenError::OverconstrainedRequest`] when the request exceeds
    ///   `node_count * colors` under [`OverconstraintPolicy::Reject`].
    /// - [`ChromagenError::CollisionTargetExceedsConstraints`] when the
    ///   collision target exceeds the granted constraint count.
    /// - [`ChromagenError::ConstraintSpaceExhausted`] when no further strict
    ///   pair can be placed.
    #[instrument(
        name = "constraints.generate",
        err,
        skip(self, graph, rng),
        fields(
            mode = self.mode.as_str(),
            requested = self.count,
            node_count = graph.node_count(),
            colors = field::Empty,
            granted = field::Empty,
        ),
    )]
    pub fn generate<R: Rng>(&self, graph: &Graph, rng: &mut R) -> Result<GeneratedConstraints> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Err(ChromagenError::InvalidVertexCount { got: 0 });
        }

        let span = Span::current();
        let required_colors = graph.max_degree() + 1;
        let graph_aware = self.mode.is_graph_aware();
        let palette = self.colors.resolve(required_colors, graph_aware)?;
        span.record("colors", palette.len());

        let (granted, clamped) = self.grant(node_count.saturating_mul(palette.len()))?;
        span.record("granted", granted);

        let target = self.mode.collision_target();
        if target > granted {
            return Err(ChromagenError::CollisionTargetExceedsConstraints {
                target,
                constraints: granted,
            });
        }

        let mut held = HeldColors::new(node_count);
        let base = BasePass {
            palette_len: palette.len(),
            count: granted - target,
            graph_aware,
        }
        .run(graph, &mut held, rng)?;
        let injected = inject(graph, &mut held, target, rng);

        let constraints = ConstraintSet::from_constraints(
            injected
                .iter()
                .rev()
                .chain(base.iter())
                .filter_map(|&(vertex, index)| {
                    palette.get(index).map(|&color| Constraint::new(vertex, color))
                })
                .collect(),
        );

        let report = ConstraintReport {
            requested: self.count,
            generated: constraints.len(),
            color_count: palette.len(),
            required_colors,
            collision_count: constraints.collision_count(graph),
            forced_conflicts: constraints.forced_conflicts(graph),
            collision_target: target,
            injected_collisions: injected.len(),
            clamped,
        };
        info!(
            generated = report.generated,
            collisions = report.collision_count,
            forced_conflicts = report.forced_conflicts,
            "constraints generated"
        );
        Ok(GeneratedConstraints {
            constraints,
            report,
        })
    }

    fn grant(&self, capacity: usize) -> Result<(usize, Option<ClampedRequest>)> {
        if self.count <= capacity {
            return Ok((self.count, None));
        }
        match self.overconstraint {
            OverconstraintPolicy::Reject => Err(ChromagenError::OverconstrainedRequest {
                requested: self.count,
                maximum: capacity,
            }),
            OverconstraintPolicy::Clamp => {
                warn!(
                    requested = self.count,
                    granted = capacity,
                    "constraint request clamped to available pairs"
                );
                Ok((
                    capacity,
                    Some(ClampedRequest {
                        requested: self.count,
                        granted: capacity,
                    }),
                ))
            }
        }
    }
}
