//! Generation modes and color palette policies.

use std::collections::HashSet;

use crate::{Result, error::ChromagenError};

/// How the color palette for a generation call is chosen.
///
/// # Examples
/// ```
/// use chromagen_core::ColorPolicy;
///
/// let policy = ColorPolicy::DegreeDerivedMinimum { at_least: 4 };
/// assert!(matches!(policy, ColorPolicy::DegreeDerivedMinimum { at_least: 4 }));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColorPolicy {
    /// Use exactly these color values. Repeated values are dropped.
    FixedList(Vec<usize>),
    /// Use the colors `0..count`.
    FixedCount(usize),
    /// Use `0..at_least`. Strict and collision modes raise a short budget to
    /// `max_degree + 1`, the number of colors a proper coloring may need.
    DegreeDerivedMinimum {
        /// Budget requested by the caller before raising.
        at_least: usize,
    },
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::DegreeDerivedMinimum { at_least: 4 }
    }
}

impl ColorPolicy {
    /// Resolves the palette for a graph whose degree bound requires
    /// `required` colors.
    ///
    /// `graph_aware` modes raise a degree-derived palette to `required` and
    /// reject fixed palettes below it. Free mode uses every policy as given.
    /// Every mode rejects an empty palette.
    pub(super) fn resolve(&self, required: usize, graph_aware: bool) -> Result<Vec<usize>> {
        let palette: Vec<usize> = match self {
            Self::FixedList(colors) => {
                let mut seen = HashSet::with_capacity(colors.len());
                colors
                    .iter()
                    .copied()
                    .filter(|color| seen.insert(*color))
                    .collect()
            }
            Self::FixedCount(count) => (0..*count).collect(),
            Self::DegreeDerivedMinimum { at_least } if graph_aware => {
                (0..(*at_least).max(required)).collect()
            }
            Self::DegreeDerivedMinimum { at_least } => (0..*at_least).collect(),
        };

        let minimum = if graph_aware { required } else { 1 };
        if palette.len() < minimum {
            return Err(ChromagenError::InsufficientColorBudget {
                supplied: palette.len(),
                required: minimum,
            });
        }
        Ok(palette)
    }
}

/// Selects how constraints relate to the graph's adjacency.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ConstraintMode {
    /// Uniform pairs with no adjacency checks.
    #[default]
    Free,
    /// Never box a neighbour in on its only recorded color.
    Strict,
    /// A strict base followed by `target` injected neighbour-color copies.
    Collision {
        /// Number of collisions to inject.
        target: usize,
    },
}

impl ConstraintMode {
    /// Returns the label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Strict => "strict",
            Self::Collision { .. } => "collision",
        }
    }

    /// Number of collisions the mode injects.
    #[must_use]
    pub const fn collision_target(self) -> usize {
        match self {
            Self::Collision { target } => target,
            Self::Free | Self::Strict => 0,
        }
    }

    /// Returns `true` when the base pass checks adjacency.
    #[must_use]
    pub const fn is_graph_aware(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Builds the mode from the legacy `strict` flag and collision target.
    ///
    /// A positive target always selects collision injection on a strict base.
    ///
    /// # Examples
    /// ```
    /// use chromagen_core::ConstraintMode;
    ///
    /// assert_eq!(ConstraintMode::from_flags(false, 0), ConstraintMode::Free);
    /// assert_eq!(ConstraintMode::from_flags(true, 0), ConstraintMode::Strict);
    /// assert_eq!(
    ///     ConstraintMode::from_flags(false, 3),
    ///     ConstraintMode::Collision { target: 3 },
    /// );
    /// ```
    #[must_use]
    pub const fn from_flags(strict: bool, collision_target: usize) -> Self {
        match (strict, collision_target) {
            (_, target @ 1..) => Self::Collision { target },
            (true, 0) => Self::Strict,
            (false, 0) => Self::Free,
        }
    }
}

/// What to do when more constraints are requested than distinct pairs exist.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OverconstraintPolicy {
    /// Lower the request to `node_count * color_count` and report the clamp.
    #[default]
    Clamp,
    /// Fail with [`ChromagenError::OverconstrainedRequest`].
    Reject,
}
