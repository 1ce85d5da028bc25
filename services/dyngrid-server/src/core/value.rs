//! Document value model.
//!
//! Rows come back from a document store as loosely typed maps. `FieldValue`
//! keeps the distinctions the result projector cares about (dates and
//! collections in particular) that plain JSON would lose.
//!
//! Dates are read from Mongo extended JSON: `{"$date": "<rfc3339>"}` or
//! `{"$date": <epoch millis>}`.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single stored document, keyed by top-level field name
pub type Document = BTreeMap<String, FieldValue>;

/// A value stored in a document field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Document(Document),
}

impl FieldValue {
    /// Decode a JSON value, recognising extended-JSON dates
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from_json).collect())
            }
            Value::Object(map) => match extended_date(&map) {
                Some(date) => FieldValue::Date(date),
                None => FieldValue::Document(
                    map.into_iter()
                        .map(|(k, v)| (k, FieldValue::from_json(v)))
                        .collect(),
                ),
            },
        }
    }

    /// Encode as JSON. Dates become RFC 3339 strings.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Date(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldValue::Array(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
            FieldValue::Document(doc) => document_to_json(doc),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Scalar string form, following loose-typed conventions
    /// (`true` is "1", `false` and null are empty).
    ///
    /// Returns `None` for dates, arrays and embedded documents.
    pub fn as_display_string(&self) -> Option<String> {
        match self {
            FieldValue::Null => Some(String::new()),
            FieldValue::Bool(true) => Some("1".to_string()),
            FieldValue::Bool(false) => Some(String::new()),
            FieldValue::Int(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Date(_) | FieldValue::Array(_) | FieldValue::Document(_) => None,
        }
    }

    // Cross-type ordering used by document stores when sorting mixed fields
    fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Document(_) => 4,
            FieldValue::Array(_) => 5,
            FieldValue::Bool(_) => 8,
            FieldValue::Date(_) => 9,
        }
    }

    /// Total order across all value types: null < numbers < strings <
    /// documents < arrays < booleans < dates.
    pub fn compare(&self, other: &Self) -> Ordering {
        let rank = self.type_rank().cmp(&other.type_rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Array(a), FieldValue::Array(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.compare(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (FieldValue::Document(a), FieldValue::Document(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    let ord = ka.cmp(kb).then_with(|| va.compare(vb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => Ordering::Equal,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(value)
    }
}

/// Convert a JSON object into a document. Non-objects yield `None`.
pub fn document_from_json(value: Value) -> Option<Document> {
    match FieldValue::from_json(value) {
        FieldValue::Document(doc) => Some(doc),
        _ => None,
    }
}

/// Encode a whole document as a JSON object
pub fn document_to_json(doc: &Document) -> Value {
    Value::Object(
        doc.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<Map<String, Value>>(),
    )
}

fn extended_date(map: &Map<String, Value>) -> Option<DateTime<Utc>> {
    if map.len() != 1 {
        return None;
    }
    match map.get("$date")? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}
