//! Node commands

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{edge_line, node_line, print_json, OutputFormat};
use crate::{AppContext, Cli};
use typegraph_core::{
    Direction, Error, NewTypeNode, NodeFilter, NodeUpdate, TypeCategory, TypeEdge, TypeKind, TypeNode,
};

#[derive(Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommands,
}

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Add a new node
    Add {
        /// Display name
        name: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Type kind
        #[arg(short, long, default_value = "object")]
        kind: TypeKind,
        /// Category
        #[arg(short, long, default_value = "custom")]
        category: TypeCategory,
        /// Complexity, clamped into 1..=5
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        complexity: i64,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Example snippets
        #[arg(short, long)]
        example: Vec<String>,
        /// Documentation text
        #[arg(long)]
        documentation: Option<String>,
    },
    /// Show a node and its edges
    Get {
        /// Node id
        id: String,
    },
    /// Update fields of an existing node
    Update {
        /// Node id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        kind: Option<TypeKind>,
        #[arg(short, long)]
        category: Option<TypeCategory>,
        #[arg(long, allow_negative_numbers = true)]
        complexity: Option<i64>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        documentation: Option<String>,
    },
    /// Remove a node and every edge touching it
    Remove {
        /// Node id
        id: String,
    },
    /// List nodes
    List {
        /// Filter by kind
        #[arg(short, long)]
        kind: Vec<TypeKind>,
        /// Filter by category
        #[arg(short, long)]
        category: Vec<TypeCategory>,
        /// Limit results
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Serialize)]
struct NodeDetails<'a> {
    node: &'a TypeNode,
    outgoing: Vec<&'a TypeEdge>,
    incoming: Vec<&'a TypeEdge>,
}

pub fn run(args: &NodeArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    let format = cli.output_format();

    match &args.command {
        NodeCommands::Add {
            name,
            id,
            kind,
            category,
            complexity,
            description,
            example,
            documentation,
        } => {
            let mut data = NewTypeNode::new(name, *kind, *category)
                .with_complexity(*complexity)
                .with_description(description);
            if let Some(id) = id {
                data = data.with_id(id.as_str());
            }
            for e in example {
                data = data.with_example(e);
            }
            if let Some(doc) = documentation {
                data = data.with_documentation(doc);
            }

            let node = ctx.store.add_node(data);
            ctx.save()?;
            tracing::info!("Created node: {} ({})", node.id, node.name);

            match format {
                OutputFormat::Json => print_json(&node)?,
                OutputFormat::Text if !cli.quiet => println!("Created node: {}", node_line(&node)),
                OutputFormat::Text => {}
            }
        }
        NodeCommands::Get { id } => {
            let node = ctx
                .store
                .get_node(id)
                .ok_or_else(|| Error::NodeNotFound(id.clone()))?;
            let details = NodeDetails {
                node,
                outgoing: ctx.store.edges_of(id, Direction::Out),
                incoming: ctx.store.edges_of(id, Direction::In),
            };

            match format {
                OutputFormat::Json => print_json(&details)?,
                OutputFormat::Text => print_node_details(&details),
            }
        }
        NodeCommands::Update {
            id,
            name,
            kind,
            category,
            complexity,
            description,
            documentation,
        } => {
            let mut update = NodeUpdate::new();
            if let Some(name) = name {
                update = update.name(name);
            }
            if let Some(kind) = kind {
                update = update.kind(*kind);
            }
            if let Some(category) = category {
                update = update.category(*category);
            }
            if let Some(complexity) = complexity {
                update = update.complexity(*complexity);
            }
            if let Some(description) = description {
                update = update.description(description);
            }
            if let Some(documentation) = documentation {
                update = update.documentation(documentation);
            }

            let node = ctx
                .store
                .update_node(id, update)
                .ok_or_else(|| Error::NodeNotFound(id.clone()))?;
            ctx.save()?;
            tracing::info!("Updated node: {}", id);

            match format {
                OutputFormat::Json => print_json(&node)?,
                OutputFormat::Text if !cli.quiet => println!("Updated node: {}", node_line(&node)),
                OutputFormat::Text => {}
            }
        }
        NodeCommands::Remove { id } => {
            let edges = ctx.store.edges_of(id, Direction::Both).len();
            if !ctx.store.remove_node(id) {
                return Err(Error::NodeNotFound(id.clone()).into());
            }
            ctx.save()?;
            tracing::info!("Removed node: {}", id);

            if !cli.quiet {
                println!("Removed node {} and {} edges", id, edges);
            }
        }
        NodeCommands::List {
            kind,
            category,
            limit,
        } => {
            let filter = NodeFilter {
                kinds: kind.clone(),
                categories: category.clone(),
                limit: *limit,
                ..NodeFilter::default()
            };
            let nodes = ctx.store.query_nodes(&filter);

            match format {
                OutputFormat::Json => print_json(&nodes)?,
                OutputFormat::Text => {
                    for node in &nodes {
                        println!("{}", node_line(node));
                    }
                    println!("\n{} of {} nodes", nodes.len(), ctx.store.node_count());
                }
            }
        }
    }

    Ok(())
}

fn print_node_details(details: &NodeDetails<'_>) {
    let node = details.node;
    println!("{} ({})", node.name, node.id);
    println!("  kind: {}", node.kind);
    println!("  category: {}", node.category);
    println!("  complexity: {}", node.complexity);
    if !node.description.is_empty() {
        println!("  description: {}", node.description);
    }
    if let Some(doc) = &node.documentation {
        println!("  documentation: {}", doc);
    }
    if !node.examples.is_empty() {
        println!("  examples:");
        for example in &node.examples {
            println!("    {}", example);
        }
    }
    if !node.metadata.is_empty() {
        println!("  metadata:");
        for (key, value) in &node.metadata {
            println!("    {} = {}", key, value);
        }
    }
    if !details.outgoing.is_empty() {
        println!("  outgoing:");
        for edge in &details.outgoing {
            println!("    {}", edge_line(edge));
        }
    }
    if !details.incoming.is_empty() {
        println!("  incoming:");
        for edge in &details.incoming {
            println!("    {}", edge_line(edge));
        }
    }
}
