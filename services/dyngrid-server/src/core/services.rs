//! Service container for dyngrid
//!
//! Builds the grid adapter and its collaborators from configuration.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::grid::{
    ColumnRegistry, DatagridAdapter, DisplayRules, DocumentStore, MemoryStore, TemplateRenderer,
};
use std::sync::Arc;

/// Unified services container
///
/// Adapters (CLI today) use this struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Grid adapter built from the configured columns
    pub grid: Arc<DatagridAdapter>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration.
    ///
    /// Uses the configured data file for the in-memory store, or an empty
    /// store when none is set.
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn DocumentStore> = match &config.store.data_file {
            Some(path) => Arc::new(
                MemoryStore::from_json_file(path)?.with_id_field(config.grid.id_column.clone()),
            ),
            None => Arc::new(MemoryStore::default().with_id_field(config.grid.id_column.clone())),
        };
        Self::with_store(config, store)
    }

    /// Create services over an explicit document store
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        Self::with_registry(config, store, |_| Ok(()))
    }

    /// Create services, letting the caller register cell transforms on the
    /// column registry before the adapter is sealed
    pub fn with_registry<F>(config: Config, store: Arc<dyn DocumentStore>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut ColumnRegistry) -> Result<()>,
    {
        let mut registry = ColumnRegistry::new();
        registry
            .set_columns(config.grid.columns.iter().cloned())
            .set_hidden_columns(config.grid.hidden_columns.iter().cloned());
        configure(&mut registry)?;

        let renderer = TemplateRenderer::from_templates(config.render.templates.clone());

        let grid = DatagridAdapter::builder(registry)
            .store(store)
            .renderer(Arc::new(renderer))
            .action_template(config.grid.action_template.clone())
            .id_column(config.grid.id_column.clone())
            .display_rules(DisplayRules {
                version_column: config.grid.version_column.clone(),
                spacer_column: config.grid.spacer_column.clone(),
            })
            .build()?;

        Ok(Self {
            grid: Arc::new(grid),
            config: Arc::new(config),
        })
    }
}
