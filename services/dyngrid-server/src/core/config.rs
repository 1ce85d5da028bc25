//! Configuration management for the dyngrid adapter.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{GridError, Result};
use crate::core::grid::DEFAULT_ACTION_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Grid column configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GridConfig {
    /// Selectable columns, in protocol order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Columns hidden from output (matched by list offset)
    #[serde(default)]
    pub hidden_columns: Vec<String>,

    /// Identifier column: returned with every row, never searched
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Template id used for the actions cell
    #[serde(default = "default_action_template")]
    pub action_template: String,

    /// Column shown as "-" when zero
    #[serde(default = "default_version_column")]
    pub version_column: String,

    /// Placeholder column that produces no output cell
    #[serde(default = "default_spacer_column")]
    pub spacer_column: String,
}

/// Backing store configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON array of documents loaded into the in-memory store
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

/// Action renderer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Template id -> template text
    #[serde(default = "default_templates")]
    pub templates: HashMap<String, String>,
}

// Default value functions
fn default_columns() -> Vec<String> {
    vec!["_id".to_string()]
}

fn default_id_column() -> String {
    "_id".to_string()
}

fn default_action_template() -> String {
    DEFAULT_ACTION_TEMPLATE.to_string()
}

fn default_version_column() -> String {
    "version".to_string()
}

fn default_spacer_column() -> String {
    " ".to_string()
}

fn default_templates() -> HashMap<String, String> {
    HashMap::from([(
        DEFAULT_ACTION_TEMPLATE.to_string(),
        r#"<a class="edit" href="{{ actions.edit }}/{{ id }}">Edit</a>"#.to_string(),
    )])
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            hidden_columns: Vec::new(),
            id_column: default_id_column(),
            action_template: default_action_template(),
            version_column: default_version_column(),
            spacer_column: default_spacer_column(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GridError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default location of the config file (`~/.config/dyngrid/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dyngrid").join("config.toml"))
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. DYNGRID_CONFIG env var
    /// 2. XDG config file (~/.config/dyngrid/config.toml)
    /// 3. ./dyngrid.toml
    /// 4. Defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DYNGRID_CONFIG") {
            Self::from_file(config_path)?
        } else if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            Self::from_file(path)?
        } else if Path::new("dyngrid.toml").exists() {
            Self::from_file("dyngrid.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(columns) = env::var("DYNGRID_COLUMNS") {
            self.grid.columns = split_list(&columns);
        }
        if let Ok(hidden) = env::var("DYNGRID_HIDDEN_COLUMNS") {
            self.grid.hidden_columns = split_list(&hidden);
        }
        if let Ok(id_column) = env::var("DYNGRID_ID_COLUMN") {
            self.grid.id_column = id_column;
        }
        if let Ok(template) = env::var("DYNGRID_ACTION_TEMPLATE") {
            self.grid.action_template = template;
        }
        if let Ok(data_file) = env::var("DYNGRID_DATA_FILE") {
            self.store.data_file = Some(PathBuf::from(data_file));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns.is_empty() {
            return Err(GridError::ConfigError(
                "At least one column must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.grid.columns {
            if !seen.insert(column.as_str()) {
                return Err(GridError::ConfigError(format!(
                    "Duplicate column '{column}'"
                )));
            }
        }

        if self.grid.id_column.is_empty() {
            return Err(GridError::ConfigError(
                "Identifier column must be non-empty".to_string(),
            ));
        }

        if !self.render.templates.contains_key(&self.grid.action_template) {
            return Err(GridError::ConfigError(format!(
                "Action template '{}' is not defined in [render.templates]",
                self.grid.action_template
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Columns: {:?}", self.grid.columns);
        tracing::info!("  Hidden columns: {:?}", self.grid.hidden_columns);
        tracing::info!("  Id column: {}", self.grid.id_column);
        tracing::info!("  Action template: {}", self.grid.action_template);
        tracing::info!("  Data file: {:?}", self.store.data_file);
        tracing::info!("  Templates: {} defined", self.render.templates.len());
    }
}

// Comma-separated list; spaces inside names are kept so " " stays a column
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
