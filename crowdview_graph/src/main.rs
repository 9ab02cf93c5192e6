//! CrowdView graph builder CLI
//!
//! Build ego or sample agent graphs from the command line and export them
//! as JSON for the workbench renderer.

use clap::Parser;
use crowdview_env::SeededDirectory;
use crowdview_graph::{
    build_ego_agent_graph, build_sample_agent_graph, EgoGraphConfig, GraphError, GraphExport,
    RelationEdgeInput, SampleGraphConfig,
};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Graph construction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphMode {
    Ego,
    Sample,
}

impl GraphMode {
    fn name(&self) -> &'static str {
        match self {
            GraphMode::Ego => "ego",
            GraphMode::Sample => "sample",
        }
    }
}

impl FromStr for GraphMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ego" => Ok(GraphMode::Ego),
            "sample" => Ok(GraphMode::Sample),
            other => Err(GraphError::UnknownMode(other.to_string())),
        }
    }
}

/// CrowdView agent relationship graph CLI
#[derive(Parser, Debug)]
#[command(name = "crowdview-graph")]
#[command(about = "Build agent relationship graphs for the CrowdView workbench", long_about = None)]
struct Args {
    /// Seed for deterministic selection
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Graph mode (ego, sample)
    #[arg(short, long, default_value = "ego")]
    mode: String,

    /// Focus agent (ego mode) or ensured agent (sample mode)
    #[arg(short, long)]
    focus: Option<u64>,

    /// Population size
    #[arg(short, long, default_value = "200")]
    agents: u64,

    /// Maximum nodes in the built graph
    #[arg(short = 'n', long, default_value = "40")]
    max_nodes: usize,

    /// JSON file with raw relationship edges
    #[arg(short, long)]
    edges: Option<String>,

    /// Drop relationship edges that reference agents outside the population
    #[arg(long)]
    restrict: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    out: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_relation_edges(path: &str) -> Result<Vec<RelationEdgeInput>, GraphError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn run(args: Args) -> Result<(), GraphError> {
    let mode: GraphMode = args.mode.parse()?;

    let relation_edges = match &args.edges {
        Some(path) => {
            let edges = load_relation_edges(path)?;
            info!("Loaded {} raw relationship edges from {}", edges.len(), path);
            edges
        }
        None => Vec::new(),
    };

    let valid_agent_ids: Option<HashSet<u64>> =
        args.restrict.then(|| (0..args.agents).collect());

    let dir = SeededDirectory::new();
    let (graph, anchor) = match mode {
        GraphMode::Ego => {
            let focus_id = args.focus.unwrap_or(0);
            let graph = build_ego_agent_graph(
                &dir,
                EgoGraphConfig {
                    seed: args.seed,
                    focus_id,
                    sample_agents: args.agents,
                    max_nodes: args.max_nodes,
                    relation_edges,
                    valid_agent_ids,
                },
            );
            (graph, Some(focus_id))
        }
        GraphMode::Sample => {
            let graph = build_sample_agent_graph(
                &dir,
                SampleGraphConfig {
                    seed: args.seed,
                    ensure_id: args.focus,
                    sample_agents: args.agents,
                    max_nodes: args.max_nodes,
                    relation_edges,
                    valid_agent_ids,
                },
            );
            (graph, args.focus)
        }
    };

    info!(
        "Built {} graph (seed={}): {} nodes, {} edges",
        mode.name(),
        args.seed,
        graph.nodes.len(),
        graph.edges.len()
    );

    let export = GraphExport::new(mode.name(), args.seed, args.agents, anchor, graph);
    match &args.out {
        Some(path) => {
            export.write_to_file(path)?;
            info!("Exported graph to {}", path);
        }
        None => println!("{}", export.to_json_pretty()?),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
