//! Config command

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};
use crate::output::print_json;
use crate::Cli;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get {
        /// Config key name
        key: String,
    },
    /// Validate and store one value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// Reset one value to its default
    Unset {
        /// Config key name
        key: String,
    },
    /// Print every key
    List,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = config_file_path();

    match &args.command {
        ConfigCommands::Get { key } => {
            let value = Config::load().get(key).ok_or_else(|| unknown_key(key))?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            tracing::info!("Set config {} = {}", key, value);
            println!("{} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            let default = Config::default().get(key).ok_or_else(|| unknown_key(key))?;
            let mut config = Config::load();
            config.set(key, &default)?;
            config.save()?;
            println!("{} reset to default", key);
        }
        ConfigCommands::List => {
            let config = Config::load();
            if cli.json {
                print_json(&config)?;
            } else {
                println!("# {}", path.display());
                for key in Config::keys() {
                    let value = config.get(key).filter(|v| !v.is_empty());
                    println!("{} = {}", key, value.as_deref().unwrap_or("(not set)"));
                }
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Created config file at {}", path.display());
        }
    }

    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {} (available: {})",
        key,
        Config::keys().join(", ")
    )
}
