//! Path command

use clap::Args;

use crate::output::{edge_line, print_json, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct PathArgs {
    /// Source node id
    pub from: String,
    /// Target node id
    pub to: String,
}

pub fn run(args: &PathArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.store.find_shortest_path(&args.from, &args.to);

    match (cli.output_format(), path) {
        (OutputFormat::Json, path) => print_json(&path)?,
        (OutputFormat::Text, None) => println!("No path from {} to {}", args.from, args.to),
        (OutputFormat::Text, Some(path)) => {
            if path.edges.is_empty() {
                println!("{} (same node, distance 0)", args.from);
            } else {
                println!("{}", path.description);
                println!("distance: {}", path.distance);
                for edge in &path.edges {
                    println!("  {}", edge_line(edge));
                }
            }
        }
    }

    Ok(())
}
