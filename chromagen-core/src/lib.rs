//! Chromagen core library.
//!
//! Generates random simple graphs in a chosen density band, per-vertex
//! color constraints that either keep a proper coloring reachable or inject
//! a known number of neighbour collisions, and the text encoding shared by
//! both.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod constraints;
mod density;
mod dot;
mod error;
mod graph;
mod summary;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    constraints::{
        ClampedRequest, ColorPolicy, Constraint, ConstraintBuilder, ConstraintMode,
        ConstraintReport, ConstraintSet, GeneratedConstraints, OverconstraintPolicy,
    },
    density::{DensityMode, EdgeBounds, classify, max_edges},
    dot::{
        ParseError, WriteError, encode_constraints, encode_graph, parse_constraints, parse_graph,
        write_text,
    },
    error::{ChromagenError, ChromagenErrorCode, GraphError, GraphErrorCode, Result},
    graph::{Edge, Graph, GraphBuilder},
    summary::GenerationSummary,
};
