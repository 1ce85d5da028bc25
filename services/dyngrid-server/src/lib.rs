//! dyngrid - server-side adapter for interactive data grids
//!
//! Turns a grid widget's paging, sorting and search request into a
//! document store query, runs it, and reshapes the rows into the widget's
//! response envelope.
//!
//! # Architecture
//!
//! - **core**: Domain logic (transport-agnostic)
//!   - config, error, value
//!   - grid (column registry, request parsing, query building,
//!     result projection)
//!   - services (adapter built from configuration)
//!
//! - **cli**: command-line adapter (depends on core)
//!   - query, show-config, completions

// Core domain logic (transport-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{GridError, Result};
pub use crate::core::grid::{
    ColumnRegistry, DatagridAdapter, DocumentStore, GridRequest, GridResponse, MemoryStore,
    RequestParams, TemplateRenderer,
};
pub use crate::core::services::Services;
pub use crate::core::value::{Document, FieldValue};
