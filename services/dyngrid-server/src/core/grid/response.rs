//! Response envelope expected by the grid widget.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ sEcho, iTotalRecords, iTotalDisplayRecords, aaData }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridResponse {
    #[serde(rename = "sEcho")]
    pub echo: i64,

    /// Unfiltered count of the whole collection
    #[serde(rename = "iTotalRecords")]
    pub total_records: u64,

    /// Number of rows in this page, not the filtered total
    #[serde(rename = "iTotalDisplayRecords")]
    pub filtered_record_count: u64,

    #[serde(rename = "aaData")]
    pub rows: Vec<Vec<Value>>,
}
