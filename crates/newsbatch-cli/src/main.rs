use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsbatch_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "newsbatch")]
#[command(version, about = "Keyword news search with spreadsheet export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search news for a single keyword
    Search {
        /// Search term
        keyword: String,
        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print records as JSON instead of a listing
        #[arg(long)]
        json: bool,
        /// Also write the results to an XLSX file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Query every keyword in a file and export one combined spreadsheet
    Batch {
        /// Keyword file: newline-delimited text, or CSV (see --column)
        #[arg(short, long)]
        input: PathBuf,
        /// CSV column holding the keywords (header name or zero-based
        /// index); the first row is always read as a header, not a keyword
        #[arg(short, long)]
        column: Option<String>,
        /// Maximum results per keyword
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Delay between keyword queries in milliseconds (0 disables pacing)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Output XLSX path (default: DD_News_RSS_<timestamp>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the configuration file path
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Search {
            keyword,
            limit,
            json,
            output,
        } => commands::search::run(&config, &keyword, limit, json, output.as_deref()).await,
        Commands::Batch {
            input,
            column,
            limit,
            delay_ms,
            output,
        } => {
            commands::batch::run(
                &config,
                &input,
                column.as_deref(),
                limit,
                delay_ms,
                output.as_deref(),
            )
            .await
        }
        Commands::ConfigPath => {
            println!("{}", AppConfig::config_path().display());
            Ok(())
        }
    }
}
