//! Edge commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{edge_line, node_line, print_json, OutputFormat};
use crate::{AppContext, Cli};
use typegraph_core::{Direction, Error, NewTypeEdge, PathFinder, Relationship, TraversalQuery, TypeNode};

#[derive(Args)]
pub struct EdgeArgs {
    #[command(subcommand)]
    pub command: EdgeCommands,
}

#[derive(Subcommand)]
pub enum EdgeCommands {
    /// Add a directed edge between two existing nodes
    Add {
        /// Source node id
        source: String,
        /// Target node id
        target: String,
        /// Relationship type
        #[arg(short, long, default_value = "uses")]
        relationship: Relationship,
        /// Strength, clamped into 1..=10
        #[arg(short, long, default_value = "5", allow_negative_numbers = true)]
        strength: i64,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Remove an edge by id
    Remove {
        /// Edge id
        id: String,
    },
    /// List edges from one node to another
    Between {
        /// Source node id
        source: String,
        /// Target node id
        target: String,
    },
    /// Show nodes reachable from a node
    Neighbors {
        /// Starting node id
        id: String,
        /// Traversal depth
        #[arg(long, default_value = "1")]
        depth: u32,
        /// Direction: in, out, both
        #[arg(long, default_value = "both")]
        direction: Direction,
        /// Only follow these relationships
        #[arg(short, long)]
        relationship: Vec<Relationship>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NeighborsOutput<'a> {
    start: &'a str,
    depth: u32,
    direction: Direction,
    nodes: Vec<&'a TypeNode>,
    edges_traversed: usize,
}

pub fn run(args: &EdgeArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    let format = cli.output_format();

    match &args.command {
        EdgeCommands::Add {
            source,
            target,
            relationship,
            strength,
            id,
            description,
        } => {
            let mut data = NewTypeEdge::new(source.as_str(), target.as_str(), *relationship)
                .with_strength(*strength)
                .with_description(description);
            if let Some(id) = id {
                data = data.with_id(id.as_str());
            }

            let edge = ctx.store.add_edge(data)?;
            ctx.save()?;
            tracing::info!("Created edge: {}", edge_line(&edge));

            match format {
                OutputFormat::Json => print_json(&edge)?,
                OutputFormat::Text if !cli.quiet => println!("Created edge {}", edge_line(&edge)),
                OutputFormat::Text => {}
            }
        }
        EdgeCommands::Remove { id } => {
            if !ctx.store.remove_edge(id) {
                return Err(Error::EdgeNotFound(id.clone()).into());
            }
            ctx.save()?;
            tracing::info!("Removed edge: {}", id);

            if !cli.quiet {
                println!("Removed edge {}", id);
            }
        }
        EdgeCommands::Between { source, target } => {
            let edges = ctx.store.edges_between(source, target);

            match format {
                OutputFormat::Json => print_json(&edges)?,
                OutputFormat::Text if edges.is_empty() => {
                    println!("No edges from {} to {}", source, target);
                }
                OutputFormat::Text => {
                    for edge in &edges {
                        println!("{}", edge_line(edge));
                    }
                }
            }
        }
        EdgeCommands::Neighbors {
            id,
            depth,
            direction,
            relationship,
        } => {
            let mut query = TraversalQuery::new(id.as_str())
                .with_depth(*depth)
                .with_direction(*direction);
            for rel in relationship {
                query = query.with_relationship(*rel);
            }

            let result = PathFinder::neighborhood(&ctx.store, &query)?;
            let nodes: Vec<&TypeNode> = result
                .visited
                .iter()
                .skip(1)
                .filter_map(|n| ctx.store.get_node(n.as_str()))
                .collect();

            match format {
                OutputFormat::Json => print_json(&NeighborsOutput {
                    start: id,
                    depth: *depth,
                    direction: *direction,
                    nodes,
                    edges_traversed: result.stats.edges_traversed,
                })?,
                OutputFormat::Text => {
                    println!("Neighbors of {} (depth {}, {}):", id, depth, direction);
                    for node in &nodes {
                        println!("  {}", node_line(node));
                    }
                    println!("\n{} nodes via {} edges", nodes.len(), result.stats.edges_traversed);
                }
            }
        }
    }

    Ok(())
}
