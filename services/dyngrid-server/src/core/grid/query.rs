//! Store-agnostic grid query and the builder that derives it from a request.

use serde::Serialize;

use crate::core::grid::request::{GridRequest, SortDirection};

/// Document filter understood by every [`DocumentStore`](super::store::DocumentStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Case-insensitive substring match on one field, unanchored
    Contains { field: String, needle: String },
    /// Matches when any branch matches
    Or(Vec<Filter>),
}

/// One sort key, applied in order (first is primary)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// A fully specified page query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridQuery {
    /// Fields to return, in column order
    pub projection: Vec<String>,
    pub filter: Option<Filter>,
    pub sort: Vec<SortKey>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Builds [`GridQuery`] values from parsed requests
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    id_column: String,
}

impl QueryBuilder {
    /// `id_column` is projected like any other column but never searched
    pub fn new(id_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
        }
    }

    pub fn build(&self, request: &GridRequest, columns: &[String]) -> GridQuery {
        let filter = request
            .search_term
            .as_deref()
            .and_then(|term| self.search_filter(term, columns));

        let sort = request
            .sort_specs
            .iter()
            .map(|spec| SortKey {
                field: spec.column.clone(),
                direction: spec.direction,
            })
            .collect();

        GridQuery {
            projection: columns.to_vec(),
            filter,
            sort,
            skip: request.page_offset,
            limit: request.page_offset.and(request.page_limit),
        }
    }

    fn search_filter(&self, term: &str, columns: &[String]) -> Option<Filter> {
        let branches: Vec<Filter> = columns
            .iter()
            .filter(|column| **column != self.id_column)
            .map(|column| Filter::Contains {
                field: column.clone(),
                needle: term.to_string(),
            })
            .collect();

        (!branches.is_empty()).then_some(Filter::Or(branches))
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new("_id")
    }
}
