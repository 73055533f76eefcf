//! Text encoding of graphs and constraint sets.
//!
//! Both formats are a small subset of DOT. A graph lists one `u -- v` edge
//! per line in generation order:
//!
//! ```text
//! graph g {
//! 	0 -- 1
//! }
//! ```
//!
//! A constraint set lists one `vertex: color` pair per line in sequence
//! order, so injected collision pairs come first:
//!
//! ```text
//! constraints g {
//! 	0: 2
//! }
//! ```

mod parse;

use std::{
    fs::File,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::{constraints::ConstraintSet, graph::Graph};

pub use parse::{ParseError, parse_constraints, parse_graph};

pub(crate) const GRAPH_HEADER: &str = "graph g {";
pub(crate) const CONSTRAINTS_HEADER: &str = "constraints g {";
pub(crate) const FOOTER: &str = "}";

/// Failure to persist encoded text.
#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct WriteError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl WriteError {
    /// Path that could not be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Encodes `graph` with one tab-indented edge line per edge.
///
/// # Examples
/// ```
/// use chromagen_core::{Graph, encode_graph};
///
/// let graph = Graph::from_edges(3, [(2, 0), (0, 1)])?;
/// assert_eq!(encode_graph(&graph), "graph g {\n\t2 -- 0\n\t0 -- 1\n}\n");
/// # Ok::<(), chromagen_core::ChromagenError>(())
/// ```
#[must_use]
pub fn encode_graph(graph: &Graph) -> String {
    let mut text = String::with_capacity(16 + graph.edge_count() * 12);
    text.push_str(GRAPH_HEADER);
    text.push('\n');
    for edge in graph.edges() {
        text.push_str(&format!("\t{} -- {}\n", edge.source(), edge.target()));
    }
    text.push_str(FOOTER);
    text.push('\n');
    text
}

/// Encodes `constraints` with one tab-indented pair per line, in order.
///
/// # Examples
/// ```
/// use chromagen_core::{Constraint, ConstraintSet, encode_constraints};
///
/// let set = ConstraintSet::from_constraints(vec![Constraint::new(1, 0), Constraint::new(0, 3)]);
/// assert_eq!(encode_constraints(&set), "constraints g {\n\t1: 0\n\t0: 3\n}\n");
/// ```
#[must_use]
pub fn encode_constraints(constraints: &ConstraintSet) -> String {
    let mut text = String::with_capacity(24 + constraints.len() * 8);
    text.push_str(CONSTRAINTS_HEADER);
    text.push('\n');
    for constraint in constraints {
        text.push_str(&format!("\t{}: {}\n", constraint.vertex(), constraint.color()));
    }
    text.push_str(FOOTER);
    text.push('\n');
    text
}

/// Creates or truncates `path` and writes `text` to it.
///
/// # Errors
/// Returns [`WriteError`] when the file cannot be created or written.
pub fn write_text(text: &str, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let wrap = |source: io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(text.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    debug!(path = %path.display(), bytes = text.len(), "text written");
    Ok(())
}
