//! TypeGraph CLI - Command line interface for type-relationship graphs

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{analyze, completions, edge, io, node, path, query};
use config::Config;
use output::OutputFormat;
use typegraph_core::GraphStore;
use typegraph_export::{ExportFormat, GraphIo};

#[derive(Parser)]
#[command(name = "typegraph")]
#[command(author, version, about = "Explore and analyze type-relationship graphs")]
pub struct Cli {
    /// Graph file (JSON export); the built-in catalogue is used when it does not exist
    #[arg(short, long, env = "TYPEGRAPH_GRAPH", global = true)]
    pub graph: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage type nodes
    Node(node::NodeArgs),
    /// Manage relationship edges
    Edge(edge::EdgeArgs),
    /// Filter and search nodes
    Query(query::QueryArgs),
    /// Find the strongest path between two nodes
    Path(path::PathArgs),
    /// Structural analysis of the whole graph
    Analyze(analyze::AnalyzeArgs),
    /// Export the graph
    Export(io::ExportArgs),
    /// Import a JSON export
    Import(io::ImportArgs),
    /// Manage CLI configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context holding the loaded graph
pub struct AppContext {
    pub config: Config,
    pub graph_path: Option<PathBuf>,
    pub store: GraphStore,
}

impl AppContext {
    pub fn load(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let graph_path = cli.graph.clone().or_else(|| config.graph_file.clone());

        let store = match &graph_path {
            Some(path) if path.exists() => {
                tracing::debug!("Loading graph from {}", path.display());
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GraphStore::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            _ if config.seed_catalogue => GraphStore::with_builtin_catalogue(),
            _ => GraphStore::default(),
        };

        Ok(Self {
            config,
            graph_path,
            store,
        })
    }

    /// Write the graph back to its file
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.graph_path else {
            anyhow::bail!("No graph file to save to; pass --graph or set graph_file in the config");
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = self.store.export_graph(ExportFormat::Json)?;
        io::write_private(path, &json)?;
        tracing::debug!(
            "Saved {} nodes and {} edges to {}",
            self.store.node_count(),
            self.store.edge_count(),
            path.display()
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting typegraph CLI");

    // Commands that do not need a graph
    match &cli.command {
        Commands::Config(args) => return commands::config::run(args, &cli),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let mut ctx = AppContext::load(&cli, Config::load())?;

    match &cli.command {
        Commands::Node(args) => node::run(args, &cli, &mut ctx)?,
        Commands::Edge(args) => edge::run(args, &cli, &mut ctx)?,
        Commands::Query(args) => query::run(args, &cli, &ctx)?,
        Commands::Path(args) => path::run(args, &cli, &ctx)?,
        Commands::Analyze(args) => analyze::run(args, &cli, &ctx)?,
        Commands::Export(args) => io::run_export(args, &cli, &ctx)?,
        Commands::Import(args) => io::run_import(args, &cli, &mut ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
