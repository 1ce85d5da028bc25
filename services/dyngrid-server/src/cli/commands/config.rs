//! Config command - show the effective grid configuration

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Include template bodies
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub columns: Vec<String>,
    pub hidden_columns: Vec<String>,
    pub visible_columns: Vec<String>,
    pub id_column: String,
    pub action_template: String,
    pub data_file: Option<String>,
    pub templates: Vec<TemplateInfo>,
}

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Build the config summary shown by the command
pub fn describe(args: &ConfigArgs, services: &Services) -> ConfigResponse {
    let config = &services.config;
    let registry = services.grid.registry();

    let mut templates: Vec<TemplateInfo> = config
        .render
        .templates
        .iter()
        .map(|(id, body)| TemplateInfo {
            id: id.clone(),
            body: args.all.then(|| body.clone()),
        })
        .collect();
    templates.sort_by(|a, b| a.id.cmp(&b.id));

    ConfigResponse {
        columns: config.grid.columns.clone(),
        hidden_columns: config.grid.hidden_columns.clone(),
        visible_columns: registry
            .visible_columns()
            .into_iter()
            .map(str::to_string)
            .collect(),
        id_column: config.grid.id_column.clone(),
        action_template: config.grid.action_template.clone(),
        data_file: config
            .store
            .data_file
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        templates,
    }
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = describe(&args, services);

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  columns: {}", join_columns(&response.columns));
            println!("  hidden_columns: {}", join_columns(&response.hidden_columns));
            println!("  visible_columns: {}", join_columns(&response.visible_columns));
            println!("  id_column: {}", colors::column(&response.id_column));
            println!("  action_template: {}", response.action_template);
            match &response.data_file {
                Some(path) => println!("  data_file: {}", colors::file_path(path)),
                None => println!("  data_file: {}", colors::dim("(none)")),
            }
            println!("  templates:");
            for template in &response.templates {
                match &template.body {
                    Some(body) => println!("    {}: {}", template.id, body),
                    None => println!("    {}", template.id),
                }
            }

            for (offset, hidden, masked) in services.grid.registry().misaligned_hidden() {
                output::print_warning(&format!(
                    "hidden column '{hidden}' (offset {offset}) masks '{}'",
                    masked.unwrap_or("<nothing>")
                ));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn join_columns(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", colors::column(c)))
        .collect::<Vec<_>>()
        .join(", ")
}
