//! Grid widget request decoding.
//!
//! The widget sends a flat, string-typed parameter map:
//!
//! | key               | meaning                                  |
//! |-------------------|------------------------------------------|
//! | `sEcho`           | correlation token, echoed back           |
//! | `sSearch`         | free-text search term                    |
//! | `iDisplayStart`   | page offset                              |
//! | `iDisplayLength`  | page size, `-1` for all rows             |
//! | `iSortingCols`    | number of sort specs                     |
//! | `iSortCol_<i>`    | visible column position of sort spec `i` |
//! | `bSortable_<pos>` | `"true"` if position `pos` is sortable   |
//! | `sSortDir_<i>`    | `asc` or `desc`                          |
//!
//! Decoding never fails. Missing or malformed numbers coerce leniently and
//! a broken request degrades to "no paging" or "no sort".

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::grid::columns::ColumnRegistry;

/// Raw request parameters as received from the widget
pub type RequestParams = HashMap<String, String>;

/// Sort direction for one sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case is descending, anything else ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// One accepted sort spec; specs not flagged sortable never get this far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Position in the visible column view
    pub column_index: usize,
    /// Column the position resolved to
    pub column: String,
    pub direction: SortDirection,
}

/// Structured form of a grid request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridRequest {
    pub echo: i64,
    pub search_term: Option<String>,
    pub page_offset: Option<u64>,
    /// `None` means no limit
    pub page_limit: Option<u64>,
    pub sort_specs: Vec<SortSpec>,
}

impl GridRequest {
    /// Decode a parameter map against the registry's visible column view
    pub fn parse(params: &RequestParams, registry: &ColumnRegistry) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str);

        let echo = get("sEcho").map_or(0, coerce_int);

        let search_term = get("sSearch")
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        let (page_offset, page_limit) = match get("iDisplayStart") {
            Some(start) if get("iDisplayLength").map(coerce_int) != Some(-1) => {
                let limit = get("iDisplayLength").map_or(0, coerce_int);
                // A zero limit means "no limit" to document stores
                let limit = u64::try_from(limit).ok().filter(|l| *l > 0);
                let offset = u64::try_from(coerce_int(start)).unwrap_or(0);
                (Some(offset), limit)
            }
            _ => (None, None),
        };

        let sort_specs = if get("iSortCol_0").is_some() {
            parse_sort_specs(params, registry)
        } else {
            Vec::new()
        };

        Self {
            echo,
            search_term,
            page_offset,
            page_limit,
            sort_specs,
        }
    }

    /// Whether the request asks for a single page rather than all rows
    pub fn is_paged(&self) -> bool {
        self.page_offset.is_some()
    }
}

fn parse_sort_specs(params: &RequestParams, registry: &ColumnRegistry) -> Vec<SortSpec> {
    let get = |key: String| params.get(&key).map(String::as_str);
    let visible = registry.visible_columns();
    // Each accepted spec resolves to a visible column
    let count = get("iSortingCols".to_string())
        .map_or(0, coerce_int)
        .clamp(0, visible.len() as i64);

    let mut specs = Vec::new();
    for i in 0..count {
        let position = get(format!("iSortCol_{i}")).map_or(0, coerce_int);

        if get(format!("bSortable_{position}")) != Some("true") {
            continue;
        }

        let Some((column_index, column)) = usize::try_from(position)
            .ok()
            .and_then(|idx| visible.get(idx).map(|col| (idx, *col)))
        else {
            tracing::debug!(position, "Sort column position outside visible columns");
            continue;
        };

        specs.push(SortSpec {
            column_index,
            column: column.to_string(),
            direction: SortDirection::parse(get(format!("sSortDir_{i}"))),
        });
    }

    specs
}

/// Lenient integer coercion: optional leading whitespace and sign, then
/// as many digits as are present. Anything else yields 0; overflow
/// saturates.
pub fn coerce_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Decode a URL-encoded query string into request parameters.
///
/// Later duplicates win.
pub fn parse_query_string(query: &str) -> RequestParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
