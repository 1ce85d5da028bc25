//! dyngrid CLI - run grid widget requests from the command line
//!
//! # Examples
//!
//! ```bash
//! # First page of ten rows, searching for "ann"
//! dyngrid --data users.json query "sEcho=1&sSearch=ann&iDisplayStart=0&iDisplayLength=10"
//!
//! # Sort by the second visible column, descending
//! dyngrid query -p iSortingCols=1 -p iSortCol_0=1 -p bSortable_1=true -p sSortDir_0=desc
//!
//! # Show configuration
//! dyngrid show-config
//! ```
//!
//! Logging goes to stderr. Filter with DYNGRID_LOG (or RUST_LOG); set
//! DYNGRID_LOG_FORMAT=json for structured output.

use clap::Parser;
use dyngrid::cli::{output, run, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("DYNGRID_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("dyngrid=warn"));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries command output
        .with_env_filter(filter);

    if std::env::var("DYNGRID_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
