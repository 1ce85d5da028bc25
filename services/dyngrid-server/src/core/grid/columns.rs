//! Column registry: selectable columns, hidden columns and cell transforms.
//!
//! The column list defines the positional contract of the grid protocol:
//! sort indices sent by the widget refer to positions in the visible view,
//! and output cells follow the same order.
//!
//! Hidden columns are matched by offset, not by name. A hidden entry with
//! offset `h` masks the column at position `h + 1`. A plain list of hidden
//! names gets offsets `0..n`, so it masks positions `1..=n` whatever the
//! names are. [`ColumnRegistry::misaligned_hidden`] reports entries whose
//! name does not match the column they actually mask.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{GridError, Result};
use crate::core::value::{Document, FieldValue};

/// Result returned by a cell transform. Errors abort the whole request.
pub type TransformResult = std::result::Result<Value, Box<dyn std::error::Error + Send + Sync>>;

type TransformFn = dyn Fn(&FieldValue, &Document) -> TransformResult + Send + Sync;

/// A per-column transform applied to a stored value before output
#[derive(Clone)]
pub struct CellTransform(Arc<TransformFn>);

impl CellTransform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldValue, &Document) -> TransformResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke with the cell value and the full row
    pub fn apply(&self, cell: &FieldValue, row: &Document) -> TransformResult {
        (self.0)(cell, row)
    }
}

impl fmt::Debug for CellTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellTransform(..)")
    }
}

/// Ordered columns, hidden offsets and transforms for one grid
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: Vec<String>,
    hidden: BTreeMap<usize, String>,
    transforms: HashMap<String, CellTransform>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given columns and nothing hidden
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.set_columns(columns);
        registry
    }

    /// Replace the active column list.
    ///
    /// Transforms registered earlier are kept as they are.
    pub fn set_columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Hide columns from output. Entries get offsets `0..n` in list order.
    pub fn set_hidden_columns<I, S>(&mut self, hidden: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden = hidden
            .into_iter()
            .map(Into::into)
            .enumerate()
            .collect();
        self
    }

    /// Hide columns with explicit offsets
    pub fn set_hidden_columns_at<I, S>(&mut self, hidden: I) -> &mut Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        self.hidden = hidden
            .into_iter()
            .map(|(offset, name)| (offset, name.into()))
            .collect();
        self
    }

    /// Register a transform for a column of the current column list
    ///
    /// # Errors
    ///
    /// - `UnknownColumn`: `column` is not in the current column list
    pub fn register_transform<F>(&mut self, column: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&FieldValue, &Document) -> TransformResult + Send + Sync + 'static,
    {
        if !self.columns.iter().any(|c| c == column) {
            return Err(GridError::UnknownColumn {
                column: column.to_string(),
                known: self.columns.clone(),
            });
        }

        self.transforms
            .insert(column.to_string(), CellTransform::new(f));
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Hidden entries as `(offset, name)` pairs in offset order
    pub fn hidden_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.hidden.iter().map(|(offset, name)| (*offset, name.as_str()))
    }

    /// Whether the column at `position` is masked from output
    pub fn is_masked(&self, position: usize) -> bool {
        position
            .checked_sub(1)
            .is_some_and(|offset| self.hidden.contains_key(&offset))
    }

    /// Columns left after masking, in column order
    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(position, _)| !self.is_masked(*position))
            .map(|(_, column)| column.as_str())
            .collect()
    }

    pub fn transform(&self, column: &str) -> Option<&CellTransform> {
        self.transforms.get(column)
    }

    /// Hidden entries whose name differs from the column they mask.
    ///
    /// Returns `(offset, hidden name, masked column)`; the masked column is
    /// `None` when the offset points past the end of the column list.
    pub fn misaligned_hidden(&self) -> Vec<(usize, &str, Option<&str>)> {
        self.hidden
            .iter()
            .filter_map(|(offset, name)| {
                let masked = self.columns.get(offset + 1).map(String::as_str);
                (masked != Some(name.as_str())).then_some((*offset, name.as_str(), masked))
            })
            .collect()
    }
}
