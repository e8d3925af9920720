//! CLI entry point for the `gtrace` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use graph_trace::cli::{commands, OutputOptions};
use graph_trace::{EngineConfig, GraphError};

#[derive(Parser)]
#[command(
    name = "gtrace",
    about = "graph-trace CLI: graph algorithms with replayable step traces"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Do not record algorithm steps
    #[arg(long)]
    no_steps: bool,

    /// Stop recording after this many steps
    #[arg(long)]
    max_steps: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a graph file
    Info {
        /// Path to the graph JSON file
        file: PathBuf,
    },
    /// Breadth-first traversal from a start vertex
    Bfs {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Start vertex
        start: String,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Fewest-edges path between two vertices
    Path {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Start vertex
        start: String,
        /// Target vertex
        target: String,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Connected components by repeated BFS
    Components {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Depth-first forest with timestamps and edge classes
    Dfs {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Vertex to start the first tree from
        #[arg(long)]
        start: Option<String>,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Topological order of a directed acyclic graph
    Topo {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Single-source shortest paths
    Dijkstra {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Source vertex
        source: String,
        /// Also print the path to this vertex
        #[arg(long)]
        target: Option<String>,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Minimum spanning forest by Kruskal's algorithm
    Kruskal {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Minimum spanning tree by Prim's algorithm
    Prim {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Start vertex (defaults to the smallest)
        #[arg(long)]
        start: Option<String>,
        /// Write the step trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Run Kruskal and Prim and compare the totals
    Compare {
        /// Path to the graph JSON file
        file: PathBuf,
        /// Prim start vertex (defaults to the smallest)
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let mut opts = OutputOptions {
        json: cli.format == "json",
        engine: EngineConfig {
            record_steps: !cli.no_steps,
            max_steps: cli.max_steps,
        },
        trace: None,
    };

    let result = match cli.command {
        Commands::Info { file } => commands::cmd_info(&file, &opts),
        Commands::Bfs { file, start, trace } => {
            opts.trace = trace;
            commands::cmd_bfs(&file, &start, &opts)
        }
        Commands::Path {
            file,
            start,
            target,
            trace,
        } => {
            opts.trace = trace;
            commands::cmd_path(&file, &start, &target, &opts)
        }
        Commands::Components { file, trace } => {
            opts.trace = trace;
            commands::cmd_components(&file, &opts)
        }
        Commands::Dfs { file, start, trace } => {
            opts.trace = trace;
            commands::cmd_dfs(&file, start.as_deref(), &opts)
        }
        Commands::Topo { file, trace } => {
            opts.trace = trace;
            commands::cmd_topo(&file, &opts)
        }
        Commands::Dijkstra {
            file,
            source,
            target,
            trace,
        } => {
            opts.trace = trace;
            commands::cmd_dijkstra(&file, &source, target.as_deref(), &opts)
        }
        Commands::Kruskal { file, trace } => {
            opts.trace = trace;
            commands::cmd_kruskal(&file, &opts)
        }
        Commands::Prim { file, start, trace } => {
            opts.trace = trace;
            commands::cmd_prim(&file, start.as_deref(), &opts)
        }
        Commands::Compare { file, start } => commands::cmd_compare(&file, start.as_deref(), &opts),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::Json(_) | GraphError::InvalidGraphFile(_) => 2,
            GraphError::NegativeWeight { .. } | GraphError::InvalidWeight { .. } => 3,
            GraphError::VertexNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
