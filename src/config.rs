//! TOML configuration parsing and validation.
//!
//! ```toml
//! [db]
//! path = "./data/contacts.sqlite"
//!
//! [paging]
//! default_limit = 100
//! max_limit = 1000
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! Only `[db]` is required.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagingConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u32 {
    100
}
fn default_max_limit() -> u32 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl PagingConfig {
    /// Resolve a caller-supplied limit against the configured bounds.
    pub fn resolve_limit(&self, requested: Option<u32>) -> Result<u32> {
        match requested {
            None => Ok(self.default_limit),
            Some(limit) if limit > self.max_limit => anyhow::bail!(
                "--limit {} exceeds paging.max_limit ({})",
                limit,
                self.max_limit
            ),
            Some(limit) => Ok(limit),
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate paging
    if config.paging.default_limit == 0 {
        anyhow::bail!("paging.default_limit must be >= 1");
    }
    if config.paging.max_limit == 0 {
        anyhow::bail!("paging.max_limit must be >= 1");
    }
    if config.paging.default_limit > config.paging.max_limit {
        anyhow::bail!(
            "paging.default_limit ({}) must not exceed paging.max_limit ({})",
            config.paging.default_limit,
            config.paging.max_limit
        );
    }

    // Validate logging
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        anyhow::bail!(
            "Unknown logging.level: '{}'. Must be one of {}.",
            config.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}
