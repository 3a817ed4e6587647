use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use graphwalk::prelude::*;
use itertools::Itertools;
use tracing::{debug, info, Level};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "graphwalk",
    about = "Eulerian trails and nearest-neighbour Hamiltonian cycles for graphs stored as DOT or edge lists."
)]
struct Cli {
    /// Log more (-v for debug output, -vv for every traversal step).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Input {
    /// Graph file. `.dot` and `.gv` files are read as DOT, anything else as an edge list.
    file: PathBuf,
    /// Input format (`dot` or `edges`), overriding the file extension.
    #[arg(long, value_name = "FORMAT")]
    format: Option<GraphFormat>,
    /// Read edge lists as directed graphs. DOT files declare this themselves.
    #[arg(long, default_value_t = false)]
    directed: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether the graph has an Eulerian circuit, an Eulerian path or neither.
    Classify {
        #[command(flatten)]
        input: Input,
    },
    /// Print an Eulerian trail found with Fleury's algorithm.
    Euler {
        #[command(flatten)]
        input: Input,
        /// Vertex to start from (defaults to an odd vertex, or the first vertex).
        #[arg(long, value_name = "LABEL")]
        start: Option<String>,
    },
    /// Print a Hamiltonian cycle found with the nearest-neighbour heuristic.
    Hamilton {
        #[command(flatten)]
        input: Input,
        /// Vertex to start from (defaults to the first vertex).
        #[arg(long, value_name = "LABEL", conflicts_with = "every_start")]
        start: Option<String>,
        /// Try every start vertex and keep the cheapest cycle.
        #[arg(long, default_value_t = false)]
        every_start: bool,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Classify { input } => {
            let graph = load_graph(&input)?;
            let class = classify_eulerian(&graph)
                .with_context(|| format!("cannot classify {}", input.file.display()))?;
            println!("{}", class.kind);
            println!("connected: {}", class.connected);
            println!("odd vertices: [{}]", class.odd_vertices.iter().join(", "));
        }
        Commands::Euler { input, start } => {
            let graph = load_graph(&input)?;
            let start = start.as_deref().map(Label::parse).transpose()?;
            let trail = fleury(&graph, start.as_ref())
                .with_context(|| format!("no Eulerian trail in {}", input.file.display()))?;
            println!("{trail}");
        }
        Commands::Hamilton {
            input,
            start,
            every_start,
        } => {
            let graph = load_graph(&input)?;
            let mut heuristic = NearestNeighbor::new(&graph);
            if let Some(start) = start.as_deref() {
                heuristic = heuristic.with_start(Label::parse(start)?);
            }
            if every_start {
                heuristic = heuristic.from_every_vertex();
            }
            let cycle = heuristic
                .run()
                .with_context(|| format!("no Hamiltonian cycle in {}", input.file.display()))?;
            println!("{cycle}");
            println!("cost: {}", cycle.cost());
        }
    }

    Ok(())
}

fn load_graph(input: &Input) -> Result<Graph> {
    let text = fs::read_to_string(&input.file)
        .with_context(|| format!("failed to read {}", input.file.display()))?;
    let format = input
        .format
        .unwrap_or_else(|| GraphFormat::from_path(&input.file));
    debug!(path = %input.file.display(), %format, "loading graph");

    let graph = format
        .parse(&text, input.directed)
        .with_context(|| format!("failed to parse {} as {format}", input.file.display()))?;
    info!(
        vertices = graph.order(),
        edges = graph.number_of_edges(),
        directed = graph.is_directed(),
        weighted = graph.is_weighted(),
        "graph loaded"
    );
    Ok(graph)
}
