//! Analyze command

use clap::Args;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};
use crate::{AppContext, Cli};
use typegraph_core::{AnalysisOptions, GraphAnalysis, GraphStats, NodeId, StructuralAnalyzer};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Include summary statistics
    #[arg(long)]
    pub stats: bool,

    /// Largest cyclic graph for the exhaustive critical-path search (defaults to config)
    #[arg(long)]
    pub critical_path_limit: Option<usize>,

    /// Number of most central nodes to print
    #[arg(long, default_value = "10")]
    pub top: usize,
}

#[derive(Serialize)]
struct AnalyzeOutput {
    analysis: GraphAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<GraphStats>,
}

pub fn run(args: &AnalyzeArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let options = AnalysisOptions::default().with_critical_path_node_limit(
        args.critical_path_limit
            .unwrap_or(ctx.config.critical_path_limit),
    );
    let output = AnalyzeOutput {
        analysis: StructuralAnalyzer::analyze(&ctx.store, &options),
        stats: args.stats.then(|| ctx.store.stats()),
    };

    match cli.output_format() {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => print_text(&output, args.top),
    }

    Ok(())
}

fn join(ids: &[NodeId], sep: &str) -> String {
    ids.iter().map(NodeId::as_str).collect::<Vec<_>>().join(sep)
}

fn print_text(output: &AnalyzeOutput, top: usize) {
    let analysis = &output.analysis;

    if let Some(stats) = &output.stats {
        println!("Statistics:");
        println!("  nodes: {}", stats.node_count);
        println!("  edges: {}", stats.edge_count);
        println!("  average complexity: {:.2}", stats.average_complexity);
        println!("  average strength: {:.2}", stats.average_strength);
        println!("  density: {:.4}", stats.density);
        for (kind, count) in &stats.nodes_by_kind {
            println!("  kind {}: {}", kind, count);
        }
        for (category, count) in &stats.nodes_by_category {
            println!("  category {}: {}", category, count);
        }
        for (relationship, count) in &stats.edges_by_relationship {
            println!("  relationship {}: {}", relationship, count);
        }
        println!();
    }

    let mut ranked: Vec<(&NodeId, f64)> = analysis.centrality.iter().map(|(id, c)| (id, *c)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!("Most central nodes:");
    for (id, centrality) in ranked.into_iter().take(top) {
        println!("  {:<20} {:.3}", id.as_str(), centrality);
    }

    println!("\nClusters: {}", analysis.clusters.len());
    for (i, cluster) in analysis.clusters.iter().enumerate() {
        println!("  {}: {}", i + 1, join(cluster, ", "));
    }

    if analysis.critical_path_skipped {
        println!("\nCritical path: skipped (graph is cyclic and too large)");
    } else {
        println!("\nCritical path ({} nodes): {}", analysis.critical_path.len(), join(&analysis.critical_path, " → "));
    }

    println!("\nIsolated nodes: {}", analysis.isolated_nodes.len());
    if !analysis.isolated_nodes.is_empty() {
        println!("  {}", join(&analysis.isolated_nodes, ", "));
    }

    println!("\nCircular dependencies: {}", analysis.circular_dependencies.len());
    for cycle in &analysis.circular_dependencies {
        println!("  {}", join(cycle, " → "));
    }
}
