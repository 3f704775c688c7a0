//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration
///
/// Sources, later ones winning: built-in defaults, the JSON config file,
/// then `NODEVIEW_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,
    /// Column `show` sorts by when `--sort` is not given
    pub sort_column: Option<String>,
    pub descending: bool,
    /// Number of synthetic records when neither `--input` nor a count is given
    pub generate_count: usize,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
            sort_column: None,
            descending: false,
            generate_count: 25,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration, reading `path` if given or the default file if present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(config::File::from(path).required(true)),
            None => Self::config_path().map(|p| config::File::from(p).required(false)),
        };

        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file.format(config::FileFormat::Json));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("NODEVIEW").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("nodeview").join("config.json"))
    }
}
