//! Interactive driver: prompts for a query and a result limit, then searches
//! every source and downloads what it finds.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use paper_harvester::config::load_config;
use paper_harvester::download::Downloader;
use paper_harvester::orchestrator::Orchestrator;
use paper_harvester::sources::SourceRegistry;
use paper_harvester::utils::HttpClient;

/// Default result limit when the user enters nothing usable.
const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "paper-harvester", version, about)]
struct Args {
    /// Directory downloaded files are written to (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.downloads.output_dir.clone());

    let client = HttpClient::from_config(&config.http);
    let registry = SourceRegistry::new(client.clone());
    let downloader =
        Downloader::new(client, &output_dir).context("Failed to prepare output directory")?;
    let orchestrator = Orchestrator::new(registry, downloader);

    loop {
        let query = prompt("\nEnter your search query (or 'quit' to exit): ")?;
        if query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let limit_input =
            prompt("How many resources would you like to download? (default: 5): ")?;
        let limit = limit_input.parse().unwrap_or(DEFAULT_LIMIT);

        let downloaded = orchestrator.search_and_download(&query, limit).await;

        if downloaded.is_empty() {
            println!("Nothing downloaded.");
        } else {
            println!("\nDownloaded {} file(s):", downloaded.len());
            for item in &downloaded {
                println!("  {} -> {}", item.title, item.path.display());
            }
        }
    }

    Ok(())
}

/// Print a prompt and read one trimmed line from stdin.
fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
