//! Benchmark-matrix driver.
//!
//! Generates the graph and constraint files of every sweep and appends one
//! CSV row per solver to the benchmark input file:
//!
//! ```text
//! id,algorithm,graph_file,constraints_file_or_x,colors,population,repetitions
//! ```
//!
//! The CSV is opened in append mode and never gets a header, so an
//! interrupted run can be resumed with a later `--start-id`.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use chromagen_core::{
    ColorPolicy, ConstraintBuilder, ConstraintMode, ConstraintSet, DensityMode, EdgeBounds, Graph,
    GraphBuilder, OverconstraintPolicy, encode_constraints, encode_graph, write_text,
};
use rand::Rng;
use tracing::{debug, info, instrument};

use super::commands::{CliError, MatrixCommand};

/// Placeholder written instead of a constraint file path.
pub const NO_CONSTRAINTS: &str = "x";

/// Solver a benchmark row targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Algorithm {
    /// Greedy coloring; runs without a population.
    Greedy,
    /// Evolutionary search.
    Evolution,
    /// Heuristic search.
    Heuristic,
}

impl Algorithm {
    /// Every solver, in row order.
    pub const ALL: [Self; 3] = [Self::Greedy, Self::Evolution, Self::Heuristic];

    /// One-letter tag understood by the benchmark harness.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Greedy => "g",
            Self::Evolution => "e",
            Self::Heuristic => "h",
        }
    }

    const fn population(self, configured: usize) -> usize {
        match self {
            Self::Greedy => 0,
            Self::Evolution | Self::Heuristic => configured,
        }
    }
}

/// One row of the benchmark input CSV.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BenchmarkCase {
    /// Row identifier, unique across the file.
    pub id: usize,
    /// Solver to run.
    pub algorithm: Algorithm,
    /// Graph file.
    pub graph_file: PathBuf,
    /// Constraint file, if the case has one.
    pub constraints_file: Option<PathBuf>,
    /// Color budget handed to the solver.
    pub colors: usize,
    /// Population size for population-based solvers.
    pub population: usize,
    /// Number of repetitions.
    pub repetitions: usize,
}

impl BenchmarkCase {
    /// Formats the case as a CSV row without a trailing newline.
    ///
    /// # Examples
    /// ```
    /// use chromagen_cli::cli::{Algorithm, BenchmarkCase};
    ///
    /// let case = BenchmarkCase {
    ///     id: 3,
    ///     algorithm: Algorithm::Evolution,
    ///     graph_file: "bench_graphs/sparse_20.dot".into(),
    ///     constraints_file: None,
    ///     colors: 4,
    ///     population: 20,
    ///     repetitions: 5,
    /// };
    /// assert_eq!(case.to_csv_row(), "3,e,bench_graphs/sparse_20.dot,x,4,20,5");
    /// ```
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        let constraints = self
            .constraints_file
            .as_deref()
            .map_or_else(|| NO_CONSTRAINTS.to_owned(), |path| path.display().to_string());
        format!(
            "{},{},{},{},{},{},{}",
            self.id,
            self.algorithm.tag(),
            self.graph_file.display(),
            constraints,
            self.colors,
            self.population,
            self.repetitions,
        )
    }
}

/// Totals written by one matrix run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MatrixReport {
    /// CSV rows appended.
    pub rows: usize,
    /// Graph and constraint files written.
    pub files: usize,
    /// Identifier the next run should start from.
    pub next_id: usize,
}

impl fmt::Display for MatrixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.rows)?;
        writeln!(f, "files: {}", self.files)?;
        write!(f, "next id: {}", self.next_id)
    }
}

/// Sweep sizes and output locations for a matrix run.
#[derive(Clone, Debug)]
pub struct MatrixPlan {
    directory: PathBuf,
    csv: PathBuf,
    start_id: usize,
    node_step: NonZeroUsize,
    max_nodes: usize,
    edge_test_nodes: usize,
    edge_step: NonZeroUsize,
    color_step: NonZeroUsize,
    population: usize,
    repetitions: usize,
}

impl From<MatrixCommand> for MatrixPlan {
    fn from(command: MatrixCommand) -> Self {
        Self {
            directory: command.directory,
            csv: command.csv,
            start_id: command.start_id,
            node_step: command.node_step,
            max_nodes: command.max_nodes,
            edge_test_nodes: command.edge_test_nodes,
            edge_step: command.edge_step,
            color_step: command.color_step,
            population: command.population,
            repetitions: command.repetitions,
        }
    }
}

impl MatrixPlan {
    /// Runs every sweep in order: sparse, dense, constraints, edges, sparse
    /// colors, dense colors and forced collisions.
    ///
    /// # Errors
    /// Returns [`CliError`] when a file cannot be written or generation fails.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<MatrixReport, CliError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv)
            .map_err(|source| self.csv_error(source))?;
        let mut run = MatrixRun {
            plan: self,
            csv: BufWriter::new(file),
            report: MatrixReport {
                next_id: self.start_id,
                ..MatrixReport::default()
            },
        };

        run.density_sweep(DensityMode::Sparse, rng)?;
        run.density_sweep(DensityMode::Dense, rng)?;
        run.constraint_sweep(None, rng)?;
        run.edge_sweep(rng)?;
        run.color_sweep(DensityMode::Sparse, rng)?;
        run.color_sweep(DensityMode::Dense, rng)?;
        run.constraint_sweep(Some(8), rng)?;

        run.csv.flush().map_err(|source| self.csv_error(source))?;
        Ok(run.report)
    }

    fn node_counts(&self) -> impl Iterator<Item = usize> + use<> {
        let step = self.node_step.get();
        (step..self.max_nodes).step_by(step)
    }

    fn csv_error(&self, source: std::io::Error) -> CliError {
        CliError::Io {
            path: self.csv.clone(),
            source,
        }
    }
}

struct MatrixRun<'a> {
    plan: &'a MatrixPlan,
    csv: BufWriter<File>,
    report: MatrixReport,
}

impl MatrixRun<'_> {
    #[instrument(name = "matrix.density", err, skip_all, fields(density = density.as_str()))]
    fn density_sweep<R: Rng>(&mut self, density: DensityMode, rng: &mut R) -> Result<(), CliError> {
        let first = self.report.next_id;
        for node_count in self.plan.node_counts() {
            let graph = GraphBuilder::new(node_count).with_density(density).build(rng)?;
            let path = self.write_graph(&format!("{}_{node_count}.dot", density.as_str()), &graph)?;
            self.push_cases(&path, None, graph.max_degree() + 1)?;
        }
        self.log_range(density.as_str(), first);
        Ok(())
    }

    /// Strict constraints on sparse graphs, optionally with `request / divisor`
    /// injected collisions.
    #[instrument(name = "matrix.constraints", err, skip(self, rng))]
    fn constraint_sweep<R: Rng>(
        &mut self,
        collision_divisor: Option<usize>,
        rng: &mut R,
    ) -> Result<(), CliError> {
        let first = self.report.next_id;
        let prefix = if collision_divisor.is_some() {
            "forced_collisions"
        } else {
            "constraints"
        };
        for node_count in self.plan.node_counts() {
            let graph = GraphBuilder::new(node_count)
                .with_density(DensityMode::Sparse)
                .build(rng)?;
            let colors = graph.max_degree() + 1;
            let request = strict_request(&graph, colors);
            let mode = match collision_divisor {
                Some(divisor) => ConstraintMode::Collision {
                    target: request / divisor,
                },
                None => ConstraintMode::Strict,
            };
            let generated = ConstraintBuilder::new(request)
                .with_colors(ColorPolicy::FixedCount(colors))
                .with_mode(mode)
                .with_overconstraint_policy(OverconstraintPolicy::Reject)
                .generate(&graph, rng)?;
            debug!(
                node_count,
                request,
                collisions = generated.report().collision_count(),
                "constraint case generated"
            );

            let graph_path = self.write_graph(&format!("{prefix}_graph_{node_count}.dot"), &graph)?;
            let constraints_path =
                self.write_constraints(&format!("{prefix}_{node_count}.dot"), generated.constraints())?;
            self.push_cases(&graph_path, Some(&constraints_path), colors)?;
        }
        self.log_range(prefix, first);
        Ok(())
    }

    #[instrument(name = "matrix.edges", err, skip(self, rng))]
    fn edge_sweep<R: Rng>(&mut self, rng: &mut R) -> Result<(), CliError> {
        let first = self.report.next_id;
        let node_count = self.plan.edge_test_nodes;
        let bounds = EdgeBounds::for_nodes(node_count);
        for edges in (bounds.min_edges()..bounds.max_edges()).step_by(self.plan.edge_step.get()) {
            let graph = Graph::random(node_count, edges, rng)?;
            let path = self.write_graph(&format!("edges_{edges}.dot"), &graph)?;
            self.push_cases(&path, None, graph.max_degree() + 1)?;
        }
        self.log_range("edges", first);
        Ok(())
    }

    #[instrument(name = "matrix.colors", err, skip_all, fields(density = density.as_str()))]
    fn color_sweep<R: Rng>(&mut self, density: DensityMode, rng: &mut R) -> Result<(), CliError> {
        let first = self.report.next_id;
        let node_count = self.plan.max_nodes;
        let graph = GraphBuilder::new(node_count).with_density(density).build(rng)?;
        let path = self.write_graph(&format!("{}_colors.dot", density.as_str()), &graph)?;
        let step = self.plan.color_step.get();
        for colors in (graph.max_degree() + 1..node_count).step_by(step) {
            self.push_cases(&path, None, colors)?;
        }
        self.log_range("colors", first);
        Ok(())
    }

    fn write_graph(&mut self, name: &str, graph: &Graph) -> Result<PathBuf, CliError> {
        let path = self.plan.directory.join(name);
        write_text(&encode_graph(graph), &path)?;
        self.report.files += 1;
        Ok(path)
    }

    fn write_constraints(&mut self, name: &str, set: &ConstraintSet) -> Result<PathBuf, CliError> {
        let path = self.plan.directory.join(name);
        write_text(&encode_constraints(set), &path)?;
        self.report.files += 1;
        Ok(path)
    }

    fn push_cases(
        &mut self,
        graph_file: &Path,
        constraints_file: Option<&Path>,
        colors: usize,
    ) -> Result<(), CliError> {
        for algorithm in Algorithm::ALL {
            let case = BenchmarkCase {
                id: self.report.next_id,
                algorithm,
                graph_file: graph_file.to_path_buf(),
                constraints_file: constraints_file.map(Path::to_path_buf),
                colors,
                population: algorithm.population(self.plan.population),
                repetitions: self.plan.repetitions,
            };
            writeln!(self.csv, "{}", case.to_csv_row())
                .map_err(|source| self.plan.csv_error(source))?;
            self.report.next_id += 1;
            self.report.rows += 1;
        }
        Ok(())
    }

    fn log_range(&self, sweep: &str, first: usize) {
        if self.report.next_id == first {
            info!(sweep, "sweep produced no cases");
        } else {
            info!(sweep, first_id = first, last_id = self.report.next_id - 1, "sweep finished");
        }
    }
}

/// Largest strict request that cannot dead-end, capped at `n * (n - 1)`.
///
/// A vertex holding `k` colors is blocked on the rest only when its degree
/// is at least `colors - k`, so the base pass always finds a free pair while
/// fewer than `n * colors - 2 * edges` pairs are placed.
fn strict_request(graph: &Graph, colors: usize) -> usize {
    let node_count = graph.node_count();
    let safe = node_count
        .saturating_mul(colors)
        .saturating_sub(2 * graph.edge_count());
    safe.min(node_count.saturating_mul(node_count.saturating_sub(1)))
}
