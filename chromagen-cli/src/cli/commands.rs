//! Command implementations and argument parsing for the chromagen CLI.

use std::{
    fs,
    io::{self, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use chromagen_core::{
    ChromagenError, ColorPolicy, ConstraintBuilder, ConstraintMode, ConstraintReport,
    ConstraintSet, DensityMode, GenerationSummary, Graph, GraphBuilder, OverconstraintPolicy,
    ParseError, WriteError, encode_constraints, encode_graph, parse_constraints, parse_graph,
    write_text,
};
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::matrix::{MatrixPlan, MatrixReport};

const DEFAULT_COLORS: usize = 4;
const DEFAULT_DIRECTORY: &str = "bench_graphs";
const DEFAULT_CSV: &str = "in.csv";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "chromagen",
    about = "Generate graphs and color constraints for coloring benchmarks."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate one graph and, optionally, a constraint set for it.
    Generate(GenerateCommand),
    /// Report statistics for existing graph and constraint files.
    Inspect(InspectCommand),
    /// Write the benchmark matrix: graph files, constraint files and CSV rows.
    Matrix(MatrixCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of vertices.
    #[arg(short = 'n', long)]
    pub nodes: usize,

    /// Requested edge count; negative means the spanning-tree minimum.
    #[arg(short = 'e', long, default_value_t = -1, allow_negative_numbers = true)]
    pub edges: i64,

    /// Snap the edge count into the sparse band.
    #[arg(short = 's', long, conflicts_with = "dense")]
    pub sparse: bool,

    /// Snap the edge count into the dense band.
    #[arg(short = 'd', long)]
    pub dense: bool,

    /// Number of constraints to generate; zero skips constraint generation.
    #[arg(short = 'c', long, default_value_t = 0)]
    pub constraints: usize,

    /// Color budget; strict and collision modes raise it to `max_degree + 1`
    /// unless `--fixed-colors` is set.
    #[arg(short = 'k', long, default_value_t = DEFAULT_COLORS)]
    pub colors: usize,

    /// Explicit comma-separated color values, overriding `--colors`.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub palette: Option<Vec<usize>>,

    /// Use exactly `--colors` colors instead of raising the budget.
    #[arg(long)]
    pub fixed_colors: bool,

    /// Never box a neighbour in on its only recorded color.
    #[arg(long)]
    pub strict: bool,

    /// Number of neighbour collisions to inject on top of a strict base.
    #[arg(long, default_value_t = 0)]
    pub collisions: usize,

    /// Write the graph to this path instead of stdout.
    #[arg(long)]
    pub graph_out: Option<PathBuf>,

    /// Write the constraints to this path instead of stdout.
    #[arg(long)]
    pub constraints_out: Option<PathBuf>,

    /// Print the graph and constraints even when writing files.
    #[arg(long)]
    pub print: bool,

    /// Print vertex, edge, constraint, color and collision counts plus density.
    #[arg(long)]
    pub stats: bool,

    /// Seed for the random generator; drawn at random and logged when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fail instead of clamping when more constraints are requested than fit.
    #[arg(long)]
    pub reject_overconstrained: bool,
}

impl GenerateCommand {
    fn density(&self) -> Option<DensityMode> {
        match (self.sparse, self.dense) {
            (true, _) => Some(DensityMode::Sparse),
            (false, true) => Some(DensityMode::Dense),
            (false, false) => None,
        }
    }

    fn color_policy(&self) -> ColorPolicy {
        match (&self.palette, self.fixed_colors) {
            (Some(palette), _) => ColorPolicy::FixedList(palette.clone()),
            (None, true) => ColorPolicy::FixedCount(self.colors),
            (None, false) => ColorPolicy::DegreeDerivedMinimum {
                at_least: self.colors,
            },
        }
    }

    fn overconstraint_policy(&self) -> OverconstraintPolicy {
        if self.reject_overconstrained {
            OverconstraintPolicy::Reject
        } else {
            OverconstraintPolicy::Clamp
        }
    }

    fn wants_constraints(&self) -> bool {
        self.constraints > 0 || self.collisions > 0
    }
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Graph file to read.
    #[arg(long)]
    pub graph: PathBuf,

    /// Constraint file to read alongside the graph.
    #[arg(long)]
    pub constraints: Option<PathBuf>,
}

/// Options accepted by the `matrix` command.
#[derive(Debug, Args, Clone)]
pub struct MatrixCommand {
    /// Directory receiving graph and constraint files.
    #[arg(long, default_value = DEFAULT_DIRECTORY)]
    pub directory: PathBuf,

    /// CSV file the benchmark rows are appended to.
    #[arg(long, default_value = DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Identifier of the first row written.
    #[arg(long, default_value_t = 0)]
    pub start_id: usize,

    /// Vertex-count step of the sparse, dense, constraint and collision sweeps.
    #[arg(long, default_value = "20")]
    pub node_step: NonZeroUsize,

    /// Exclusive upper bound of those sweeps, and the size of the color-sweep graphs.
    #[arg(long, default_value_t = 500)]
    pub max_nodes: usize,

    /// Vertex count of the edge sweep graph.
    #[arg(long, default_value_t = 100)]
    pub edge_test_nodes: usize,

    /// Edge-count step of the edge sweep.
    #[arg(long, default_value = "50")]
    pub edge_step: NonZeroUsize,

    /// Color step of the color sweeps.
    #[arg(long, default_value = "20")]
    pub color_step: NonZeroUsize,

    /// Population size recorded for the evolutionary and heuristic solvers.
    #[arg(long, default_value_t = 20)]
    pub population: usize,

    /// Number of solver repetitions recorded per row.
    #[arg(long, default_value_t = 5)]
    pub repetitions: usize,

    /// Seed for the random generator; drawn at random and logged when absent.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed outside the core writers.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input file did not parse.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: ParseError,
    },
    /// Writing an encoded graph or constraint set failed.
    #[error(transparent)]
    Write(#[from] WriteError),
    /// Graph or constraint generation failed.
    #[error(transparent)]
    Core(#[from] ChromagenError),
}

/// Outcome of the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Seed the random generator was initialised with.
    pub seed: u64,
    /// Graph text to print, when requested.
    pub graph_text: Option<String>,
    /// Constraint text to print, when requested.
    pub constraints_text: Option<String>,
    /// Statistics to print, when requested.
    pub stats: Option<GenerationSummary>,
    /// Generation report when constraints were produced.
    pub report: Option<ConstraintReport>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A graph and possibly constraints were generated.
    Generated(GenerateOutcome),
    /// Existing files were inspected.
    Inspected(GenerationSummary),
    /// The benchmark matrix was written.
    Matrix(MatrixReport),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation, parsing or file access fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use chromagen_cli::cli::{Cli, ExecutionSummary, run_cli};
/// # use clap::Parser;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from(["chromagen", "generate", "-n", "10", "--sparse", "--seed", "1"])?;
/// let ExecutionSummary::Generated(outcome) = run_cli(cli)? else {
///     unreachable!("generate yields a generation outcome");
/// };
/// assert_eq!(outcome.seed, 1);
/// assert!(outcome.graph_text.is_some_and(|text| text.lines().count() == 13));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(&command).map(ExecutionSummary::Generated)
        }
        Command::Inspect(command) => {
            span.record("command", field::display("inspect"));
            run_inspect(&command).map(ExecutionSummary::Inspected)
        }
        Command::Matrix(command) => {
            span.record("command", field::display("matrix"));
            run_matrix(command).map(ExecutionSummary::Matrix)
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> (u64, SmallRng) {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "random generator seeded");
    (seed, SmallRng::seed_from_u64(seed))
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.nodes, mode = field::Empty, seed = field::Empty),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<GenerateOutcome, CliError> {
    let span = Span::current();
    let (seed, mut rng) = seeded_rng(command.seed);
    span.record("seed", seed);

    let graph = GraphBuilder::new(command.nodes)
        .with_requested_edges(command.edges)
        .with_density_mode(command.density())
        .build(&mut rng)?;

    let generated = if command.wants_constraints() {
        let mode = ConstraintMode::from_flags(command.strict, command.collisions);
        span.record("mode", field::display(mode.as_str()));
        let generated = ConstraintBuilder::new(command.constraints)
            .with_colors(command.color_policy())
            .with_mode(mode)
            .with_overconstraint_policy(command.overconstraint_policy())
            .generate(&graph, &mut rng)?;
        Some(generated.into_parts())
    } else {
        None
    };

    if let Some(path) = &command.graph_out {
        write_text(&encode_graph(&graph), path)?;
    }
    if let (Some(path), Some((set, _))) = (&command.constraints_out, &generated) {
        write_text(&encode_constraints(set), path)?;
    }

    let print_graph = command.print || command.graph_out.is_none();
    let print_constraints = command.print || command.constraints_out.is_none();
    let color_count = generated
        .as_ref()
        .map_or_else(|| command.colors, |(_, report)| report.color_count());
    let stats = command
        .stats
        .then(|| stats_for(&graph, generated.as_ref().map(|(set, _)| set), color_count));

    info!(
        edges = graph.edge_count(),
        constraints = generated.as_ref().map_or(0, |(set, _)| set.len()),
        "generation completed"
    );
    Ok(GenerateOutcome {
        seed,
        graph_text: print_graph.then(|| encode_graph(&graph)),
        constraints_text: generated
            .as_ref()
            .filter(|_| print_constraints)
            .map(|(set, _)| encode_constraints(set)),
        stats,
        report: generated.map(|(_, report)| report),
    })
}

fn stats_for(
    graph: &Graph,
    constraints: Option<&ConstraintSet>,
    color_count: usize,
) -> GenerationSummary {
    let summary = GenerationSummary::for_graph(graph, color_count);
    match constraints {
        Some(set) => summary.with_constraints(graph, set),
        None => summary,
    }
}

#[instrument(name = "cli.inspect", err, skip(command), fields(graph = %command.graph.display()))]
pub(super) fn run_inspect(command: &InspectCommand) -> Result<GenerationSummary, CliError> {
    let graph = read_parsed(&command.graph, parse_graph)?;
    let constraints = command
        .constraints
        .as_deref()
        .map(|path| read_parsed(path, parse_constraints))
        .transpose()?;
    let summary = stats_for(&graph, constraints.as_ref(), graph.max_degree() + 1);
    info!(
        vertices = summary.node_count(),
        edges = summary.edge_count(),
        constraints = summary.constraint_count(),
        "inspection completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.read", err, skip_all, fields(path = %path.display()))]
pub(super) fn read_parsed<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[instrument(
    name = "cli.matrix",
    err,
    skip(command),
    fields(directory = %command.directory.display()),
)]
pub(super) fn run_matrix(command: MatrixCommand) -> Result<MatrixReport, CliError> {
    let (_, mut rng) = seeded_rng(command.seed);
    fs::create_dir_all(&command.directory).map_err(|source| CliError::Io {
        path: command.directory.clone(),
        source,
    })?;
    MatrixPlan::from(command).run(&mut rng)
}

/// Renders `summary` to `writer`.
///
/// Generated payloads are written verbatim so stdout can be redirected into
/// a file; statistics follow them.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use chromagen_cli::cli::{ExecutionSummary, render_summary};
/// # use chromagen_core::{GenerationSummary, Graph};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let graph = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// let summary = ExecutionSummary::Inspected(GenerationSummary::for_graph(&graph, 3));
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("density: 66.67%"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generated(outcome) => {
            if let Some(text) = &outcome.graph_text {
                writer.write_all(text.as_bytes())?;
            }
            if let Some(text) = &outcome.constraints_text {
                writer.write_all(text.as_bytes())?;
            }
            if let Some(stats) = &outcome.stats {
                writeln!(writer, "{stats}")?;
            }
        }
        ExecutionSummary::Inspected(stats) => writeln!(writer, "{stats}")?,
        ExecutionSummary::Matrix(report) => writeln!(writer, "{report}")?,
    }
    Ok(())
}
