//! Services wired from configuration

use crate::common::{create_test_services, params, DataFile, USER_COLUMNS};
use dyngrid::core::config::Config;
use dyngrid::core::grid::MemoryStore;
use dyngrid::core::services::Services;
use serde_json::json;
use std::sync::Arc;

fn user_config() -> Config {
    let mut config = Config::default();
    config.grid.columns = USER_COLUMNS.iter().map(|c| c.to_string()).collect();
    config
}

/// The default action template links to the row's edit page
#[tokio::test]
async fn test_default_action_template() {
    let services = create_test_services();

    let response = services
        .grid
        .datatable(
            &params(&[("iDisplayStart", "0"), ("iDisplayLength", "1")]),
            &json!({"edit": "/users"}),
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        response.rows[0].last().unwrap(),
        &json!(r#"<a class="edit" href="/users/u1">Edit</a>"#)
    );
}

#[tokio::test]
async fn test_data_file_from_config() {
    let data = DataFile::users();
    let mut config = user_config();
    config.store.data_file = Some(data.path().to_path_buf());
    config.grid.hidden_columns = vec!["name".to_string()];

    let services = Services::new(config).unwrap();
    let response = services
        .grid
        .datatable(&params(&[("sSearch", "carl")]), &json!({}), None)
        .await
        .unwrap();

    assert_eq!(response.total_records, 5);
    assert_eq!(response.rows.len(), 1);
    assert_eq!(response.rows[0][0], json!("u4"));
    assert_eq!(response.rows[0][1], json!("carl@example.org"));
}

#[tokio::test]
async fn test_custom_display_columns() {
    let store = MemoryStore::from_json_str(
        r#"[{"key": "a", "rev": 0, "pad": "x"}, {"key": "b", "rev": 2, "pad": "y"}]"#,
    )
    .unwrap()
    .with_id_field("key");

    let mut config = Config::default();
    config.grid.columns = vec!["key".to_string(), "rev".to_string(), "pad".to_string()];
    config.grid.id_column = "key".to_string();
    config.grid.version_column = "rev".to_string();
    config.grid.spacer_column = "pad".to_string();
    config
        .render
        .templates
        .insert("datatable_action".to_string(), "#{{ id }}".to_string());

    let services = Services::with_store(config, Arc::new(store)).unwrap();
    let response = services
        .grid
        .datatable(&params(&[]), &json!({}), None)
        .await
        .unwrap();

    assert_eq!(
        response.rows,
        vec![
            vec![json!("a"), json!("-"), json!("#a")],
            vec![json!("b"), json!(2), json!("#b")],
        ]
    );
}

#[tokio::test]
async fn test_with_registry_registers_transform() {
    let data = DataFile::users();
    let store = MemoryStore::from_json_file(data.path()).unwrap();

    let services = Services::with_registry(user_config(), Arc::new(store), |registry| {
        registry.register_transform("name", |cell, _row| {
            Ok(json!(cell
                .as_display_string()
                .unwrap_or_default()
                .to_uppercase()))
        })?;
        Ok(())
    })
    .unwrap();

    let response = services
        .grid
        .datatable(&params(&[]), &json!({}), None)
        .await
        .unwrap();
    assert_eq!(response.rows[0][1], json!("ANN LEE"));
}

#[test]
fn test_hidden_columns_from_config() {
    let mut config = user_config();
    config.grid.hidden_columns = vec!["name".to_string(), "email".to_string()];

    let services = Services::with_store(config, Arc::new(MemoryStore::default())).unwrap();
    let registry = services.grid.registry();

    assert_eq!(
        registry.visible_columns(),
        vec!["_id", "version", "created", "tags"]
    );
    assert!(registry.misaligned_hidden().is_empty());
}

/// A hidden name masks by offset, not by name
#[test]
fn test_misaligned_hidden_column() {
    let mut config = user_config();
    config.grid.hidden_columns = vec!["email".to_string()];

    let services = Services::with_store(config, Arc::new(MemoryStore::default())).unwrap();
    let registry = services.grid.registry();

    assert_eq!(
        registry.visible_columns(),
        vec!["_id", "email", "version", "created", "tags"]
    );
    assert_eq!(registry.misaligned_hidden(), vec![(0, "email", Some("name"))]);
}
