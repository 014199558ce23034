//! CLI configuration

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use typegraph_core::limits::DEFAULT_CRITICAL_PATH_NODE_LIMIT;
use typegraph_export::ExportFormat;

const KEYS: &[&str] = &[
    "graph_file",
    "export_format",
    "critical_path_limit",
    "seed_catalogue",
];

/// Get default config directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".typegraph")
}

/// Path of the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph file used when `--graph` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_file: Option<PathBuf>,
    pub export_format: ExportFormat,
    pub critical_path_limit: usize,
    /// Start from the built-in catalogue when no graph file exists yet
    pub seed_catalogue: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_file: None,
            export_format: ExportFormat::Json,
            critical_path_limit: DEFAULT_CRITICAL_PATH_NODE_LIMIT,
            seed_catalogue: true,
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        std::fs::create_dir_all(config_dir())
            .with_context(|| format!("creating {}", config_dir().display()))?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "graph_file" => Some(
                self.graph_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "export_format" => Some(self.export_format.to_string()),
            "critical_path_limit" => Some(self.critical_path_limit.to_string()),
            "seed_catalogue" => Some(self.seed_catalogue.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "graph_file" => {
                self.graph_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "export_format" => self.export_format = value.parse()?,
            "critical_path_limit" => {
                self.critical_path_limit = value
                    .parse()
                    .with_context(|| format!("critical_path_limit must be a number, got '{}'", value))?;
            }
            "seed_catalogue" => {
                self.seed_catalogue = value
                    .parse()
                    .with_context(|| format!("seed_catalogue must be true or false, got '{}'", value))?;
            }
            _ => anyhow::bail!("Unknown config key: {} (available: {})", key, KEYS.join(", ")),
        }
        Ok(())
    }
}
