//! Document store boundary and an in-memory implementation.
//!
//! The adapter issues two independent calls per request: `find` for the
//! filtered, sorted page and `count` for the unfiltered total. No
//! transaction spans them, so under concurrent writers the total and the
//! page may disagree.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::core::error::{GridError, Result};
use crate::core::grid::query::{Filter, GridQuery};
use crate::core::grid::request::SortDirection;
use crate::core::value::{document_from_json, Document, FieldValue};

/// A collection in a document-oriented backing store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a projected, filtered, sorted and paged query
    async fn find(&self, query: &GridQuery) -> Result<Vec<Document>>;

    /// Count every document in the collection, ignoring any filter
    async fn count(&self) -> Result<u64>;
}

/// Documents held in memory, queried with document-store semantics
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
    id_field: String,
}

impl MemoryStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            id_field: "_id".to_string(),
        }
    }

    /// Field returned by every projection
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Load from a JSON array of objects
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(items) = value else {
            return Err(GridError::StoreError(
                "Expected a JSON array of documents".to_string(),
            ));
        };

        let documents = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                document_from_json(item).ok_or_else(|| {
                    GridError::StoreError(format!("Document at index {i} is not an object"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(documents))
    }

    /// Load from a file holding a JSON array of objects
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GridError::StoreError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn project(&self, doc: &Document, fields: &[String]) -> Document {
        if fields.is_empty() {
            return doc.clone();
        }
        doc.iter()
            .filter(|(key, _)| **key == self.id_field || fields.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, query: &GridQuery) -> Result<Vec<Document>> {
        let matcher = query.filter.as_ref().map(Matcher::compile).transpose()?;

        let mut rows: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| matcher.as_ref().is_none_or(|m| m.matches(doc)))
            .collect();

        // sort_by is stable, so equal keys keep insertion order
        if !query.sort.is_empty() {
            rows.sort_by(|a, b| {
                query.sort.iter().fold(Ordering::Equal, |ord, key| {
                    ord.then_with(|| {
                        let left = a.get(&key.field).unwrap_or(&FieldValue::Null);
                        let right = b.get(&key.field).unwrap_or(&FieldValue::Null);
                        match key.direction {
                            SortDirection::Asc => left.compare(right),
                            SortDirection::Desc => right.compare(left),
                        }
                    })
                })
            });
        }

        let skip = usize::try_from(query.skip.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(rows
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|doc| self.project(doc, &query.projection))
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.documents.len() as u64)
    }
}

/// Compiled form of a [`Filter`]
enum Matcher {
    Contains { field: String, pattern: Regex },
    Any(Vec<Matcher>),
}

impl Matcher {
    fn compile(filter: &Filter) -> Result<Self> {
        match filter {
            Filter::Contains { field, needle } => {
                let pattern = RegexBuilder::new(&regex::escape(needle))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| GridError::StoreError(format!("Invalid search pattern: {e}")))?;
                Ok(Matcher::Contains {
                    field: field.clone(),
                    pattern,
                })
            }
            Filter::Or(branches) => Ok(Matcher::Any(
                branches
                    .iter()
                    .map(Matcher::compile)
                    .collect::<Result<Vec<_>>>()?,
            )),
        }
    }

    fn matches(&self, doc: &Document) -> bool {
        match self {
            Matcher::Contains { field, pattern } => doc
                .get(field)
                .is_some_and(|value| value_matches(value, pattern)),
            Matcher::Any(branches) => branches.iter().any(|m| m.matches(doc)),
        }
    }
}

// Regex filters only see strings, directly or as array elements
fn value_matches(value: &FieldValue, pattern: &Regex) -> bool {
    match value {
        FieldValue::String(s) => pattern.is_match(s),
        FieldValue::Array(items) => items
            .iter()
            .any(|item| matches!(item, FieldValue::String(s) if pattern.is_match(s))),
        _ => false,
    }
}
