//! CLI adapter for dyngrid
//!
//! Runs grid requests against a configured data file from the command
//! line. Depends on `core/` only.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dyngrid - server-side adapter for interactive data grids
///
/// Decodes grid widget requests (paging, sorting, free-text search),
/// runs them against a document collection and prints the response
/// envelope.
#[derive(Parser, Debug)]
#[command(name = "dyngrid")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "Grid widget query adapter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Configuration file (overrides the default lookup)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// JSON array of documents to query (overrides [store].data_file)
    #[arg(long, short = 'd', global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a grid request and print the response
    Query(commands::QueryArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  dyngrid completions bash > ~/.local/share/bash-completion/completions/dyngrid
    ///   zsh:   dyngrid completions zsh > ~/.zfunc/_dyngrid
    ///   fish:  dyngrid completions fish > ~/.config/fish/completions/dyngrid.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.merge_env();
            config.validate()?;
            config
        }
        None => Config::load()?,
    };
    if let Some(data) = cli.data {
        config.store.data_file = Some(data);
    }
    config.log_config();

    let services = Arc::new(Services::new(config)?);

    match cli.command {
        Commands::Query(args) => commands::query::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
