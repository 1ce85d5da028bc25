//! Rendering of the trailing "actions" cell.
//!
//! The adapter hands the renderer `{actions, id, data}` and places whatever
//! comes back into the row verbatim. [`TemplateRenderer`] covers the usual
//! case of a small HTML snippet with placeholders:
//!
//! - `{{ id }}`: row identifier
//! - `{{ actions.<key> }}`: caller-supplied action data
//! - `{{ data.<field> }}`: any field of the row
//!
//! Placeholders that resolve to nothing render as an empty string.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use crate::core::error::{GridError, Result};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_$][A-Za-z0-9_$.]*)\s*\}\}").unwrap());

/// Context passed to the renderer for each row
#[derive(Debug, Clone, Serialize)]
pub struct ActionContext<'a> {
    pub actions: &'a Value,
    pub id: Value,
    pub data: Value,
}

/// Produces the actions cell for a row
pub trait ActionRenderer: Send + Sync {
    fn render(&self, template_id: &str, context: &ActionContext<'_>) -> Result<Value>;
}

/// Named text templates with `{{ path }}` placeholders
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    templates: HashMap<String, String>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(id.into(), template.into());
        self
    }

    pub fn from_templates(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }
}

impl ActionRenderer for TemplateRenderer {
    fn render(&self, template_id: &str, context: &ActionContext<'_>) -> Result<Value> {
        let template = self
            .templates
            .get(template_id)
            .ok_or_else(|| GridError::RenderFailed(format!("Unknown template '{template_id}'")))?;

        let scope = serde_json::to_value(context)?;
        let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            lookup(&scope, &caps[1]).map(value_text).unwrap_or_default()
        });

        Ok(Value::String(rendered.into_owned()))
    }
}

fn lookup<'a>(scope: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(scope, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
