//! Error types for the chromagen core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A structural problem with an explicit edge list.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge joined a vertex to itself.
    #[error("edge ({vertex}, {vertex}) is a self-loop")]
    SelfLoop {
        /// The vertex on both ends of the edge.
        vertex: usize,
    },
    /// An edge appeared twice, possibly in reverse orientation.
    #[error("edge ({first}, {second}) is listed more than once")]
    DuplicateEdge {
        /// First endpoint as written.
        first: usize,
        /// Second endpoint as written.
        second: usize,
    },
    /// An edge referenced a vertex outside `0..node_count`.
    #[error("vertex {vertex} is out of range for {node_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge appeared twice.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
        /// An edge referenced a vertex outside the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
    }
}

/// Error type produced while generating graphs or constraint sets.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ChromagenError {
    /// Constraint generation needs at least one vertex.
    #[error("constraint generation requires at least one vertex (got {got})")]
    InvalidVertexCount {
        /// The vertex count of the supplied graph.
        got: usize,
    },
    /// The requested edge count cannot fit in a simple graph.
    #[error("{requested} edges requested but a graph of {node_count} vertices holds at most {maximum}")]
    EdgeCountExceedsMaximum {
        /// Number of edges the caller asked for.
        requested: usize,
        /// Number of vertices in the graph.
        node_count: usize,
        /// Edge count of the complete graph on `node_count` vertices.
        maximum: usize,
    },
    /// Fewer distinct colors than the generation mode needs.
    #[error("{supplied} colors supplied but at least {required} are required")]
    InsufficientColorBudget {
        /// Distinct colors available in the palette.
        supplied: usize,
        /// Minimum number of colors for the selected mode.
        required: usize,
    },
    /// More constraints were requested than distinct `(vertex, color)` pairs exist.
    #[error("{requested} constraints requested but only {maximum} distinct pairs exist")]
    OverconstrainedRequest {
        /// Number of constraints the caller asked for.
        requested: usize,
        /// `node_count * color_count`.
        maximum: usize,
    },
    /// More collisions were requested than constraints in total.
    #[error("collision target {target} exceeds the constraint count {constraints}")]
    CollisionTargetExceedsConstraints {
        /// Requested number of injected collisions.
        target: usize,
        /// Total number of constraints to generate.
        constraints: usize,
    },
    /// Every remaining pair would box in a neighbour.
    #[error("no acceptable constraint remains after {generated} of {requested}")]
    ConstraintSpaceExhausted {
        /// Number of base constraints the pass had to produce.
        requested: usize,
        /// Number produced before the space ran out.
        generated: usize,
    },
    /// An explicit edge list was structurally invalid.
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`ChromagenError`] variants.
    enum ChromagenErrorCode for ChromagenError {
        /// Constraint generation needs at least one vertex.
        InvalidVertexCount => InvalidVertexCount { .. } => "CHROMAGEN_INVALID_VERTEX_COUNT",
        /// The requested edge count cannot fit in a simple graph.
        EdgeCountExceedsMaximum => EdgeCountExceedsMaximum { .. } => "CHROMAGEN_EDGE_COUNT_EXCEEDS_MAXIMUM",
        /// Fewer distinct colors than the generation mode needs.
        InsufficientColorBudget => InsufficientColorBudget { .. } => "CHROMAGEN_INSUFFICIENT_COLOR_BUDGET",
        /// More constraints were requested than distinct pairs exist.
        OverconstrainedRequest => OverconstrainedRequest { .. } => "CHROMAGEN_OVERCONSTRAINED_REQUEST",
        /// More collisions were requested than constraints in total.
        CollisionTargetExceedsConstraints => CollisionTargetExceedsConstraints { .. } => "CHROMAGEN_COLLISION_TARGET_EXCEEDS_CONSTRAINTS",
        /// Every remaining pair would box in a neighbour.
        ConstraintSpaceExhausted => ConstraintSpaceExhausted { .. } => "CHROMAGEN_CONSTRAINT_SPACE_EXHAUSTED",
        /// An explicit edge list was structurally invalid.
        InvalidGraph => Graph(..) => "CHROMAGEN_INVALID_GRAPH",
    }
}

impl ChromagenError {
    /// Retrieve the inner [`GraphErrorCode`] when the error wraps a [`GraphError`].
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ChromagenError>;
