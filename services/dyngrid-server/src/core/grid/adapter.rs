//! The grid query adapter.
//!
//! Pipeline per request:
//!
//! ```text
//! params -> GridRequest -> GridQuery -> store.find + store.count -> rows -> GridResponse
//! ```
//!
//! Configuration (columns, hidden columns, transforms, collaborators) is
//! fixed when the adapter is built and shared read-only afterwards, so one
//! adapter can serve concurrent requests without locking.

use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{GridError, Result};
use crate::core::grid::columns::ColumnRegistry;
use crate::core::grid::projector::{DisplayRules, ResultProjector};
use crate::core::grid::query::{GridQuery, QueryBuilder};
use crate::core::grid::render::ActionRenderer;
use crate::core::grid::request::{GridRequest, RequestParams};
use crate::core::grid::response::GridResponse;
use crate::core::grid::store::DocumentStore;

/// Default template id for the actions cell
pub const DEFAULT_ACTION_TEMPLATE: &str = "datatable_action";

/// Turns grid widget requests into store queries and shaped responses
#[derive(Clone)]
pub struct DatagridAdapter {
    registry: Arc<ColumnRegistry>,
    store: Arc<dyn DocumentStore>,
    renderer: Arc<dyn ActionRenderer>,
    queries: QueryBuilder,
    action_template: String,
    id_column: String,
    rules: DisplayRules,
}

/// Builder for [`DatagridAdapter`]; store and renderer are required
pub struct DatagridAdapterBuilder {
    registry: ColumnRegistry,
    store: Option<Arc<dyn DocumentStore>>,
    renderer: Option<Arc<dyn ActionRenderer>>,
    action_template: String,
    id_column: String,
    rules: DisplayRules,
}

impl DatagridAdapterBuilder {
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn ActionRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn action_template(mut self, template_id: impl Into<String>) -> Self {
        self.action_template = template_id.into();
        self
    }

    pub fn id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    pub fn display_rules(mut self, rules: DisplayRules) -> Self {
        self.rules = rules;
        self
    }

    /// Finish the adapter
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable`: no store or no renderer was supplied
    /// - `ConfigError`: the column list is empty
    pub fn build(self) -> Result<DatagridAdapter> {
        let store = self.store.ok_or_else(|| {
            GridError::ServiceUnavailable(
                "Data source is not defined, set a document store first".to_string(),
            )
        })?;
        let renderer = self.renderer.ok_or_else(|| {
            GridError::ServiceUnavailable(
                "Action renderer is not defined, set a renderer first".to_string(),
            )
        })?;

        if self.registry.columns().is_empty() {
            return Err(GridError::ConfigError(
                "Column list must not be empty".to_string(),
            ));
        }

        for (offset, hidden, masked) in self.registry.misaligned_hidden() {
            tracing::warn!(
                offset,
                hidden,
                masked = masked.unwrap_or("<none>"),
                "Hidden column does not match the column it masks"
            );
        }

        Ok(DatagridAdapter {
            queries: QueryBuilder::new(self.id_column.clone()),
            registry: Arc::new(self.registry),
            store,
            renderer,
            action_template: self.action_template,
            id_column: self.id_column,
            rules: self.rules,
        })
    }
}

impl DatagridAdapter {
    pub fn builder(registry: ColumnRegistry) -> DatagridAdapterBuilder {
        DatagridAdapterBuilder {
            registry,
            store: None,
            renderer: None,
            action_template: DEFAULT_ACTION_TEMPLATE.to_string(),
            id_column: "_id".to_string(),
            rules: DisplayRules::default(),
        }
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Decode request parameters; never fails
    pub fn parse_request(&self, params: &RequestParams) -> GridRequest {
        GridRequest::parse(params, &self.registry)
    }

    /// Query for a request over `columns` (the registry's columns when `None`)
    pub fn build_query(&self, request: &GridRequest, columns: Option<&[String]>) -> GridQuery {
        let columns = columns.unwrap_or(self.registry.columns());
        self.queries.build(request, columns)
    }

    /// Serve one grid request.
    ///
    /// `actions` is handed to the renderer for every row. `columns`
    /// overrides the registry's column list for this call only.
    ///
    /// # Errors
    ///
    /// - `StoreError`: either store call failed
    /// - `TransformFailed`: a cell transform returned an error
    /// - `RenderFailed`: the actions cell could not be rendered
    pub async fn datatable(
        &self,
        params: &RequestParams,
        actions: &Value,
        columns: Option<&[String]>,
    ) -> Result<GridResponse> {
        let request = self.parse_request(params);
        let columns = columns.unwrap_or(self.registry.columns());
        let query = self.queries.build(&request, columns);

        tracing::debug!(
            echo = request.echo,
            search = request.search_term.as_deref().unwrap_or(""),
            skip = ?query.skip,
            limit = ?query.limit,
            sort_keys = query.sort.len(),
            "Executing grid query"
        );

        let rows = self.store.find(&query).await?;
        let total_records = self.store.count().await?;

        let projector = ResultProjector {
            registry: &self.registry,
            renderer: self.renderer.as_ref(),
            action_template: &self.action_template,
            id_column: &self.id_column,
            rules: &self.rules,
        };
        let rows = projector.project(&rows, columns, actions)?;

        tracing::debug!(
            echo = request.echo,
            returned = rows.len(),
            total = total_records,
            "Grid query complete"
        );

        Ok(GridResponse {
            echo: request.echo,
            total_records,
            filtered_record_count: rows.len() as u64,
            rows,
        })
    }
}
