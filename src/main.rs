//! Seedsift main entry point
//!
//! This is the command-line interface for the Seedsift search aggregator.

use anyhow::Context;
use clap::Parser;
use seedsift::config::{load_config_with_hash, Config};
use seedsift::output::write_results;
use seedsift::Searcher;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seedsift: a torrent index search aggregator
///
/// Seedsift searches every configured index site, attaches page comments
/// where available, removes duplicates and prints the results ranked by
/// seeders.
#[derive(Parser, Debug)]
#[command(name = "seedsift")]
#[command(version)]
#[command(about = "A torrent index search aggregator", long_about = None)]
struct Cli {
    /// Search query; prompted for when omitted
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Path to TOML configuration file (built-in site list when omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the configured sites and their search URLs without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let query = match cli.query {
        Some(query) => query,
        None => prompt_query()?,
    };

    let searcher = Searcher::new(&config).context("no usable site configuration")?;

    if cli.dry_run {
        handle_dry_run(&searcher, &query);
        return Ok(());
    }

    let results = searcher.search(&query).await;
    if results.is_empty() {
        tracing::info!("No results for \"{}\"", query);
    }

    let stdout = io::stdout();
    write_results(&mut stdout.lock(), &results)?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seedsift=info,warn"),
            1 => EnvFilter::new("seedsift=debug,info"),
            2 => EnvFilter::new("seedsift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the query from standard input
fn prompt_query() -> anyhow::Result<String> {
    println!("Enter search query:");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read query from stdin")?;

    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Handles the --dry-run mode: lists sites and the URL each would fetch
fn handle_dry_run(searcher: &Searcher, query: &str) {
    println!("=== Seedsift Dry Run ===\n");
    println!("Query: {}", query);
    println!("\nSites ({}):", searcher.registry().len());

    for site in searcher.registry().sites() {
        println!("  - {} ({})", site.name(), site.base_url());
        println!("    search: {}", site.search_url(query));
        println!(
            "    comments: {}",
            if site.enrich_comments() { "enabled" } else { "disabled" }
        );
    }
}
