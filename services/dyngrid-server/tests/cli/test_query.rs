//! Tests for the query CLI command

use crate::common::create_test_services;
use dyngrid::cli::commands::query::{execute, run_query};
use dyngrid::cli::commands::QueryArgs;
use dyngrid::cli::OutputFormat;
use serde_json::json;

fn args(request: &str) -> QueryArgs {
    QueryArgs {
        request: Some(request.to_string()),
        params: Vec::new(),
        actions: r#"{"edit": "/users"}"#.to_string(),
        columns: None,
    }
}

/// Test a URL-encoded request end to end
#[tokio::test]
async fn test_query_from_url_encoded_request() {
    let services = create_test_services();

    let response = run_query(
        &args("?sEcho=4&sSearch=joanna%20park&iDisplayStart=0&iDisplayLength=10"),
        &services,
    )
    .await
    .unwrap();

    assert_eq!(response.echo, 4);
    assert_eq!(response.total_records, 5);
    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0][0], json!("u3"));
}

/// Test that `--param` pairs override the positional request
#[tokio::test]
async fn test_query_params_override_request() {
    let services = create_test_services();

    let mut query = args("sSearch=ann");
    query.params = vec![("sSearch".to_string(), "bob".to_string())];

    let response = run_query(&query, &services).await.unwrap();
    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0][0], json!("u2"));
}

/// Test the column override flag
#[tokio::test]
async fn test_query_column_override() {
    let services = create_test_services();

    let mut query = args("sEcho=1");
    query.columns = Some(vec!["_id".to_string(), "email".to_string()]);

    let response = run_query(&query, &services).await.unwrap();
    assert_eq!(response.rows[0].len(), 3);
    assert_eq!(response.rows[0][1], json!("ann@example.com"));
}

/// Test that invalid action JSON is rejected before querying
#[tokio::test]
async fn test_query_invalid_actions() {
    let services = create_test_services();

    let mut query = args("sEcho=1");
    query.actions = "{not json".to_string();

    let err = run_query(&query, &services).await.unwrap_err();
    assert!(err.to_string().contains("--actions"));
}

/// Test printing in both formats
#[tokio::test]
async fn test_query_execute_formats() {
    let services = create_test_services();

    let result = execute(args("sEcho=1"), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Query (human) should succeed");

    let result = execute(args("sEcho=1"), &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Query (JSON) should succeed");
}

/// Test a request with no parameters at all
#[tokio::test]
async fn test_query_without_request() {
    let services = create_test_services();

    let query = QueryArgs {
        request: None,
        params: Vec::new(),
        actions: "{}".to_string(),
        columns: None,
    };

    let response = run_query(&query, &services).await.unwrap();
    assert_eq!(response.echo, 0);
    assert_eq!(response.rows.len(), 5);
}
