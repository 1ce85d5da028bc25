//! Grid query adapter.
//!
//! Translates the positional, string-typed grid widget protocol into
//! document store queries and shapes the results back into the widget's
//! response envelope.
//!
//! - **columns**: column registry (columns, hidden offsets, transforms)
//! - **request**: request parameter decoding
//! - **query**: store-agnostic query and its builder
//! - **store**: document store trait and in-memory store
//! - **projector**: row to cell projection
//! - **render**: actions cell rendering
//! - **response**: response envelope
//! - **adapter**: the pipeline tying them together

mod adapter;
pub mod columns;
pub mod projector;
pub mod query;
pub mod render;
pub mod request;
pub mod response;
pub mod store;

pub use adapter::{DatagridAdapter, DatagridAdapterBuilder, DEFAULT_ACTION_TEMPLATE};
pub use columns::{CellTransform, ColumnRegistry, TransformResult};
pub use projector::DisplayRules;
pub use query::{Filter, GridQuery, QueryBuilder, SortKey};
pub use render::{ActionContext, ActionRenderer, TemplateRenderer};
pub use request::{parse_query_string, GridRequest, RequestParams, SortDirection, SortSpec};
pub use response::GridResponse;
pub use store::{DocumentStore, MemoryStore};
