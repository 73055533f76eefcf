//! Parsers for the graph and constraint text formats.

use thiserror::Error;

use super::{CONSTRAINTS_HEADER, FOOTER, GRAPH_HEADER};
use crate::{
    constraints::{Constraint, ConstraintSet},
    error::{ChromagenError, GraphError},
    graph::Graph,
};

/// Failure to parse an encoded graph or constraint set.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    /// The first non-blank line was not the expected header.
    #[error("missing header `{expected}`")]
    MissingHeader {
        /// Header the format requires.
        expected: &'static str,
    },
    /// The text ended before the closing brace.
    #[error("missing closing `}}`")]
    MissingFooter,
    /// A body line did not match the entry syntax.
    #[error("line {line}: malformed entry `{content}`")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// The offending line without surrounding whitespace.
        content: String,
    },
    /// The edge list did not describe a simple graph.
    #[error(transparent)]
    Graph(#[from] ChromagenError),
}

/// Parses text produced by [`encode_graph`](super::encode_graph).
///
/// The vertex count is one more than the largest id mentioned; an edgeless
/// graph has no vertices. Since every vertex must be an edge endpoint, ids
/// of twice the edge count or more are rejected.
///
/// # Errors
/// Returns [`ParseError`] when the header, footer or an edge line is
/// malformed, when an id is at least twice the edge count, or when the edges
/// contain a self-loop or duplicate.
///
/// # Examples
/// ```
/// use chromagen_core::parse_graph;
///
/// let graph = parse_graph("graph g {\n\t0 -- 2\n\t2 -- 1\n}\n")?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// # Ok::<(), chromagen_core::ParseError>(())
/// ```
pub fn parse_graph(text: &str) -> Result<Graph, ParseError> {
    let edges = parse_body(text, GRAPH_HEADER, |entry| {
        let (left, right) = entry.split_once("--")?;
        Some((parse_id(left)?, parse_id(right)?))
    })?;
    // Every vertex is an edge endpoint, so ids must stay below twice the
    // edge count. Checked before the adjacency lists are allocated.
    let limit = edges.len().saturating_mul(2);
    if let Some(vertex) = edges
        .iter()
        .flat_map(|&(source, target)| [source, target])
        .find(|&vertex| vertex >= limit)
    {
        return Err(ChromagenError::from(GraphError::VertexOutOfRange {
            vertex,
            node_count: limit,
        })
        .into());
    }
    let node_count = edges
        .iter()
        .map(|&(source, target)| source.max(target).saturating_add(1))
        .max()
        .unwrap_or(0);
    Ok(Graph::from_edges(node_count, edges)?)
}

/// Parses text produced by [`encode_constraints`](super::encode_constraints),
/// keeping the pair order.
///
/// # Errors
/// Returns [`ParseError`] when the header, footer or a pair line is
/// malformed.
pub fn parse_constraints(text: &str) -> Result<ConstraintSet, ParseError> {
    let pairs = parse_body(text, CONSTRAINTS_HEADER, |entry| {
        let (vertex, color) = entry.split_once(':')?;
        Some(Constraint::new(parse_id(vertex)?, parse_id(color)?))
    })?;
    Ok(ConstraintSet::from_constraints(pairs))
}

fn parse_id(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

fn parse_body<T>(
    text: &str,
    header: &'static str,
    entry: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    match lines.next() {
        Some((_, line)) if line == header => {}
        _ => return Err(ParseError::MissingHeader { expected: header }),
    }

    let mut items = Vec::new();
    while let Some((number, line)) = lines.next() {
        if line == FOOTER {
            return match lines.next() {
                None => Ok(items),
                Some((number, line)) => Err(ParseError::MalformedLine {
                    line: number,
                    content: line.to_owned(),
                }),
            };
        }
        let item = entry(line).ok_or_else(|| ParseError::MalformedLine {
            line: number,
            content: line.to_owned(),
        })?;
        items.push(item);
    }
    Err(ParseError::MissingFooter)
}
