//! Dealport CLI — imports data for offline storage deals.
//!
//! Set DEALPORT_API_URL (or BOOST_API_URL) and DEALPORT_API_TOKEN (or
//! BOOST_API_TOKEN), or pass --api-url / --api-token.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dealport_api_client::ApiClient;
use dealport_cli::{init_tracing, log_import_error, ImportDataArgs};
use dealport_core::ApiConfig;
use dealport_services::{ImportRequest, ImportService};
use dealport_storage::HttpFetcher;
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dealport", about = "Offline deal data import")]
struct Cli {
    /// Deal API endpoint, overrides DEALPORT_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Deal API bearer token, overrides DEALPORT_API_TOKEN
    #[arg(long, global = true)]
    api_token: Option<String>,
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import data for an offline deal: <proposal CID> <file> or <deal UUID> <file>
    ImportData(ImportDataArgs),
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = ApiConfig::from_env()
        .context("Failed to load deal API configuration")?
        .with_overrides(cli.api_url, cli.api_token);
    let client = ApiClient::new(&config).context("Failed to create deal API client")?;
    let fetcher = HttpFetcher::new().context("Failed to create payload fetcher")?;
    let service = ImportService::new(Arc::new(client), Arc::new(fetcher));

    match cli.command {
        Commands::ImportData(args) => {
            let request = ImportRequest::from(args);
            let outcome = match service.import_data(&request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log_import_error(&e);
                    return Err(e.into());
                }
            };

            if cli.json {
                print_json(&outcome)?;
            } else {
                println!("{}", outcome);
            }
        }
    }

    Ok(())
}
