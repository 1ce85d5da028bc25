//! End-to-end grid requests against the user fixture

use crate::common::{create_test_adapter, params};
use crate::common::helpers::{create_adapter_with, RecordingStore};
use dyngrid::core::grid::Filter;
use serde_json::json;
use std::sync::Arc;

/// Full rows, no paging, no search
#[tokio::test]
async fn test_unpaged_request_returns_every_row() {
    let adapter = create_test_adapter(&[]);
    let actions = json!({"edit": "/users"});

    let response = adapter
        .datatable(&params(&[("sEcho", "3")]), &actions, None)
        .await
        .unwrap();

    assert_eq!(response.echo, 3);
    assert_eq!(response.total_records, 5);
    assert_eq!(response.filtered_record_count, 5);
    assert_eq!(
        response.rows[0],
        vec![
            json!("u1"),
            json!("Ann Lee"),
            json!("ann@example.com"),
            json!("-"),
            json!("2024-01-15"),
            json!(2),
            json!("/users/u1"),
        ]
    );
}

/// Absent and null values become empty strings
#[tokio::test]
async fn test_missing_values_render_empty() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(&params(&[]), &json!({}), None)
        .await
        .unwrap();

    // u4 has neither created nor tags
    assert_eq!(response.rows[3][4], json!(""));
    assert_eq!(response.rows[3][5], json!(""));
    // u5 stores created as null
    assert_eq!(response.rows[4][4], json!(""));
    // Non-zero versions pass through as stored
    assert_eq!(response.rows[3][3], json!(7));
    assert_eq!(response.rows[4][3], json!(1));
}

/// String "0" versions also display as "-"
#[tokio::test]
async fn test_zero_version_as_string() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(&params(&[]), &json!({}), None)
        .await
        .unwrap();

    assert_eq!(response.rows[2][0], json!("u3"));
    assert_eq!(response.rows[2][3], json!("-"));
}

/// A hidden column drops out of every row
#[tokio::test]
async fn test_hidden_column_masks_position() {
    let adapter = create_test_adapter(&["name"]);

    let response = adapter
        .datatable(&params(&[]), &json!({"edit": "/u"}), None)
        .await
        .unwrap();

    assert_eq!(
        response.rows[1],
        vec![
            json!("u2"),
            json!("bob@example.com"),
            json!(3),
            json!("2023-06-01"),
            json!(0),
            json!("/u/u2"),
        ]
    );
}

/// Search matches any searchable column, case-insensitively
#[tokio::test]
async fn test_search_filters_rows() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(&params(&[("sSearch", "ANN")]), &json!({}), None)
        .await
        .unwrap();

    let ids: Vec<_> = response.rows.iter().map(|row| row[0].clone()).collect();
    assert_eq!(ids, vec![json!("u1"), json!("u3"), json!("u5")]);

    // The total ignores the search filter; the display count is the page size
    assert_eq!(response.total_records, 5);
    assert_eq!(response.filtered_record_count, 3);
}

/// Search also matches string elements of array fields
#[tokio::test]
async fn test_search_matches_array_elements() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(&params(&[("sSearch", "finance")]), &json!({}), None)
        .await
        .unwrap();

    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0][0], json!("u5"));
}

/// Regex metacharacters in the search term are matched literally
#[tokio::test]
async fn test_search_term_is_literal() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(&params(&[("sSearch", ".*")]), &json!({}), None)
        .await
        .unwrap();

    assert!(response.rows.is_empty());
    assert_eq!(response.total_records, 5);
}

/// The id column is never searched
#[tokio::test]
async fn test_search_skips_id_column() {
    let store = Arc::new(RecordingStore::users());
    let adapter = create_adapter_with(store.clone(), |_| {});

    let response = adapter
        .datatable(&params(&[("sSearch", "u2")]), &json!({}), None)
        .await
        .unwrap();
    assert!(response.rows.is_empty());

    let query = store.last_query().unwrap();
    let Some(Filter::Or(branches)) = query.filter else {
        panic!("Expected an OR filter");
    };
    assert_eq!(branches.len(), 5);
    assert!(branches
        .iter()
        .all(|b| !matches!(b, Filter::Contains { field, .. } if field == "_id")));
}

/// Page rows come from find, the total from a separate count
#[tokio::test]
async fn test_find_then_count() {
    let store = Arc::new(RecordingStore::users());
    let adapter = create_adapter_with(store.clone(), |_| {});

    adapter
        .datatable(&params(&[("sEcho", "1")]), &json!({}), None)
        .await
        .unwrap();

    assert_eq!(store.calls(), vec!["find", "count"]);
}

/// Column override applies to this call only
#[tokio::test]
async fn test_column_override() {
    let adapter = create_test_adapter(&[]);
    let columns = vec!["_id".to_string(), "email".to_string()];

    let response = adapter
        .datatable(&params(&[]), &json!({"edit": "/e"}), Some(&columns))
        .await
        .unwrap();
    assert_eq!(
        response.rows[0],
        vec![json!("u1"), json!("ann@example.com"), json!("/e/u1")]
    );

    let response = adapter
        .datatable(&params(&[]), &json!({"edit": "/e"}), None)
        .await
        .unwrap();
    assert_eq!(response.rows[0].len(), 7);
}

/// One adapter serves concurrent requests
#[tokio::test]
async fn test_concurrent_requests_share_adapter() {
    let adapter = Arc::new(create_test_adapter(&[]));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move {
                let echo = i.to_string();
                let request = params(&[
                    ("sEcho", echo.as_str()),
                    ("iDisplayStart", "0"),
                    ("iDisplayLength", "2"),
                ]);
                adapter.datatable(&request, &json!({}), None).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.echo, i as i64);
        assert_eq!(response.rows.len(), 2);
        assert_eq!(response.total_records, 5);
    }
}

/// The JSON envelope uses the widget's legacy keys
#[tokio::test]
async fn test_response_envelope_keys() {
    let adapter = create_test_adapter(&[]);

    let response = adapter
        .datatable(
            &params(&[("sEcho", "9"), ("iDisplayStart", "0"), ("iDisplayLength", "1")]),
            &json!({}),
            None,
        )
        .await
        .unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["sEcho"], json!(9));
    assert_eq!(value["iTotalRecords"], json!(5));
    assert_eq!(value["iTotalDisplayRecords"], json!(1));
    assert_eq!(value["aaData"].as_array().unwrap().len(), 1);
}
