//! Import/Export commands

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use typegraph_core::NodeId;
use typegraph_export::{merge_into, ExportFormat, GraphExport, GraphIo};

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format: json, dot, cytoscape (defaults to config)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Input file (JSON export)
    pub file: PathBuf,

    /// Merge into the current graph and save it
    #[arg(long)]
    pub merge: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportSummary {
    name: String,
    nodes: usize,
    edges: usize,
    /// Edges whose source or target is not among the imported nodes
    dangling_edges: usize,
    merged: bool,
}

/// Write a file readable only by its owner
pub fn write_private(path: &Path, content: &str) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        file.write_all(content.as_bytes())?;
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

pub fn run_export(args: &ExportArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let format = args.format.unwrap_or(ctx.config.export_format);
    tracing::info!("Exporting graph as {}", format);

    let content = ctx.store.export_graph(format)?;

    if let Some(ref path) = args.output {
        write_private(path, &content)?;
        if !cli.quiet {
            eprintln!(
                "Exported {} nodes and {} edges to {}",
                ctx.store.node_count(),
                ctx.store.edge_count(),
                path.display()
            );
        }
    } else {
        println!("{}", content);
    }

    Ok(())
}

pub fn run_import(args: &ImportArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    tracing::info!("Importing from {}", args.file.display());

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let export: GraphExport = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a graph export", args.file.display()))?;

    let ids: BTreeSet<&NodeId> = export.nodes.iter().map(|n| &n.id).collect();
    let dangling_edges = export
        .edges
        .iter()
        .filter(|e| !ids.contains(&e.source) || !ids.contains(&e.target))
        .count();

    let mut summary = ImportSummary {
        name: export.metadata.name.clone(),
        nodes: export.nodes.len(),
        edges: export.edges.len(),
        dangling_edges,
        merged: false,
    };

    if args.merge {
        let merged = merge_into(&mut ctx.store, export)?;
        ctx.save()?;
        tracing::info!("Merged {} nodes and {} edges", merged.nodes, merged.edges);
        summary.merged = true;
    }

    match cli.output_format() {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            println!("Graph: {}", summary.name);
            println!("  nodes: {}", summary.nodes);
            println!("  edges: {}", summary.edges);
            if summary.dangling_edges > 0 {
                println!("  dangling edges: {}", summary.dangling_edges);
            }
            if summary.merged {
                println!("Merged into the current graph");
            }
        }
    }

    Ok(())
}
