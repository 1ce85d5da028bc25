//! Result projection: stored rows to output cells.
//!
//! For every column position of the effective column list:
//!
//! 1. masked positions (see [`ColumnRegistry::is_masked`]) are skipped
//! 2. the spacer column emits no cell at all, not even an empty one
//! 3. an absent or null value becomes `""`
//! 4. the version column shows `"-"` for a zero version, else the raw value
//! 5. anything else goes through [`ResultProjector::cell_value`]
//!
//! A rendered actions cell is appended to every row.

use serde_json::Value;

use crate::core::error::{GridError, Result};
use crate::core::grid::columns::ColumnRegistry;
use crate::core::grid::render::{ActionContext, ActionRenderer};
use crate::core::value::{document_to_json, Document, FieldValue};

/// Column names that get special display treatment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRules {
    /// Column rendered as `"-"` when its value is zero
    pub version_column: String,
    /// Placeholder column that never produces a cell
    pub spacer_column: String,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            version_column: "version".to_string(),
            spacer_column: " ".to_string(),
        }
    }
}

/// Turns stored rows into grid output rows
pub struct ResultProjector<'a> {
    pub registry: &'a ColumnRegistry,
    pub renderer: &'a dyn ActionRenderer,
    pub action_template: &'a str,
    pub id_column: &'a str,
    pub rules: &'a DisplayRules,
}

impl ResultProjector<'_> {
    /// Project every row; the first failing transform or render aborts
    pub fn project(
        &self,
        rows: &[Document],
        columns: &[String],
        actions: &Value,
    ) -> Result<Vec<Vec<Value>>> {
        rows.iter()
            .map(|row| self.project_row(row, columns, actions))
            .collect()
    }

    pub fn project_row(
        &self,
        row: &Document,
        columns: &[String],
        actions: &Value,
    ) -> Result<Vec<Value>> {
        let mut cells = Vec::with_capacity(columns.len() + 1);

        for (position, column) in columns.iter().enumerate() {
            if self.registry.is_masked(position) || *column == self.rules.spacer_column {
                continue;
            }

            let cell = match row.get(column) {
                None | Some(FieldValue::Null) => {
                    cells.push(Value::String(String::new()));
                    continue;
                }
                Some(cell) => cell,
            };

            if *column == self.rules.version_column {
                cells.push(version_cell(cell));
            } else {
                cells.push(self.cell_value(column, cell, row)?);
            }
        }

        cells.push(self.render_actions(row, actions)?);
        Ok(cells)
    }

    /// Display value of one cell.
    ///
    /// A registered transform wins and its output is used verbatim.
    /// Otherwise dates become `YYYY-MM-DD`, arrays their element count and
    /// booleans go through [`legacy_bool`]; everything else passes through.
    pub fn cell_value(&self, column: &str, cell: &FieldValue, row: &Document) -> Result<Value> {
        if let Some(transform) = self.registry.transform(column) {
            return transform
                .apply(cell, row)
                .map_err(|e| GridError::TransformFailed {
                    column: column.to_string(),
                    message: e.to_string(),
                });
        }

        Ok(match cell {
            FieldValue::Null => Value::String(String::new()),
            FieldValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            FieldValue::Array(items) => Value::from(items.len()),
            FieldValue::Bool(_) => Value::Bool(legacy_bool(cell)),
            other => other.to_json(),
        })
    }

    fn render_actions(&self, row: &Document, actions: &Value) -> Result<Value> {
        let context = ActionContext {
            actions,
            id: row
                .get(self.id_column)
                .map_or(Value::Null, FieldValue::to_json),
            data: document_to_json(row),
        };
        self.renderer.render(self.action_template, &context)
    }
}

fn version_cell(cell: &FieldValue) -> Value {
    if cell.as_display_string().as_deref() == Some("0") {
        Value::String("-".to_string())
    } else {
        cell.to_json()
    }
}

/// Boolean normalisation kept from the grid's legacy backend: a cell is
/// true only when it is exactly the integer 1, so every stored boolean
/// comes out `false`.
pub fn legacy_bool(cell: &FieldValue) -> bool {
    matches!(cell, FieldValue::Int(1))
}
