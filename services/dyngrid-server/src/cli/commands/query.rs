//! Query command - run a grid request against the configured collection

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::grid::{parse_query_string, GridResponse, RequestParams};
use crate::core::services::Services;
use clap::Args;
use serde_json::Value;
use std::sync::Arc;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// URL-encoded request, e.g. "sEcho=1&sSearch=ann&iDisplayStart=0&iDisplayLength=10"
    pub request: Option<String>,

    /// Extra request parameter as key=value (repeatable, wins over REQUEST)
    #[arg(long = "param", short = 'p', value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Action data passed to the actions template, as JSON
    #[arg(long, short = 'a', default_value = "{}")]
    pub actions: String,

    /// Comma-separated column list overriding the configured columns
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

impl QueryArgs {
    /// Merge the positional request and `--param` pairs
    pub fn request_params(&self) -> RequestParams {
        let mut params = self
            .request
            .as_deref()
            .map(parse_query_string)
            .unwrap_or_default();
        params.extend(self.params.iter().cloned());
        params
    }
}

/// Execute the query command
pub async fn execute(
    args: QueryArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = run_query(&args, services).await?;

    match format {
        OutputFormat::Human => print_human(&response, services, args.columns.as_deref()),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Run the request described by `args` and return the response envelope
pub async fn run_query(
    args: &QueryArgs,
    services: &Services,
) -> Result<GridResponse, Box<dyn std::error::Error>> {
    let actions: Value = serde_json::from_str(&args.actions)
        .map_err(|e| format!("--actions is not valid JSON: {e}"))?;

    let params = args.request_params();
    let response = services
        .grid
        .datatable(&params, &actions, args.columns.as_deref())
        .await?;

    Ok(response)
}

fn print_human(response: &GridResponse, services: &Services, columns: Option<&[String]>) {
    let registry = services.grid.registry();
    let columns = columns.unwrap_or(registry.columns());
    let spacer = &services.config.grid.spacer_column;

    let mut header: Vec<&str> = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| !registry.is_masked(*i) && *c != spacer)
        .map(|(_, c)| c.as_str())
        .collect();
    header.push("actions");

    output::print_header(&header.join(" | "));
    for row in &response.rows {
        let cells: Vec<String> = row.iter().map(output::cell_text).collect();
        println!("{}", cells.join(" | "));
    }

    println!();
    println!(
        "{} of {} record(s) {}",
        colors::number(&response.filtered_record_count.to_string()),
        colors::number(&response.total_records.to_string()),
        colors::dim(&format!("(sEcho {})", response.echo))
    );
}
