//! Query command

use clap::Args;

use crate::output::{node_line, print_json, OutputFormat};
use crate::{AppContext, Cli};
use typegraph_core::limits::{validate_complexity_range, MAX_COMPLEXITY, MIN_COMPLEXITY};
use typegraph_core::{NodeFilter, TypeCategory, TypeKind};

#[derive(Args)]
pub struct QueryArgs {
    /// Case-insensitive text matched against name, description, documentation and examples
    pub term: Option<String>,

    /// Allowed kinds (repeatable)
    #[arg(short, long)]
    pub kind: Vec<TypeKind>,

    /// Allowed categories (repeatable)
    #[arg(short, long)]
    pub category: Vec<TypeCategory>,

    /// Minimum complexity (inclusive)
    #[arg(long)]
    pub min: Option<u8>,

    /// Maximum complexity (inclusive)
    #[arg(long)]
    pub max: Option<u8>,

    /// Limit results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl QueryArgs {
    fn to_filter(&self) -> anyhow::Result<NodeFilter> {
        let complexity_range = match (self.min, self.max) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(MIN_COMPLEXITY as u8);
                let max = max.unwrap_or(MAX_COMPLEXITY as u8);
                validate_complexity_range(min, max)?;
                Some((min, max))
            }
        };

        Ok(NodeFilter {
            kinds: self.kind.clone(),
            categories: self.category.clone(),
            complexity_range,
            search_term: self.term.clone(),
            limit: self.limit,
        })
    }
}

pub fn run(args: &QueryArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let filter = args.to_filter()?;
    tracing::debug!("Running query: {:?}", filter);

    let nodes = ctx.store.query_nodes(&filter);

    match cli.output_format() {
        OutputFormat::Json => print_json(&nodes)?,
        OutputFormat::Text => {
            if nodes.is_empty() {
                println!("No matching nodes");
                return Ok(());
            }
            for node in &nodes {
                println!("{}", node_line(node));
            }
            println!("\n{} matching nodes", nodes.len());
        }
    }

    Ok(())
}
