//! CLI configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Default location of `travelsim.toml`
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("travelsim")
        .join("travelsim.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format for `get` results
    pub format: String,
    /// Cap on the number of paths printed per `explore`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,
    /// Stop a script at its first failing line
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            max_paths: None,
            strict: false,
        }
    }
}

impl Config {
    /// Load the config at `path`, falling back to defaults when it is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                tracing::debug!("No config at {:?}, using defaults", path);
                return Self::default();
            }
        };

        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring malformed config at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Wrote config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["format", "max_paths", "strict"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "format" => Some(self.format.clone()),
            "max_paths" => Some(
                self.max_paths
                    .map_or_else(|| "none".to_string(), |n| n.to_string()),
            ),
            "strict" => Some(self.strict.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "format" => {
                value.parse::<OutputFormat>()?;
                self.format = value.to_lowercase();
            }
            "max_paths" => {
                self.max_paths = match value {
                    "none" | "" => None,
                    n => Some(n.parse().map_err(|_| {
                        anyhow::anyhow!("max_paths must be a non-negative integer or 'none'")
                    })?),
                };
            }
            "strict" => {
                self.strict = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("strict must be 'true' or 'false'"))?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
