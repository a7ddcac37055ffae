//! Quote-Scout main entry point
//!
//! This is the command-line interface for the Quote-Scout quote harvester.

use clap::Parser;
use quote_scout::config::{load_config, validate, Config};
use quote_scout::crawler::{crawl, TracingObserver};
use quote_scout::output::{print_report, write_csv};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Quote-Scout: a polite quote harvester
///
/// Quote-Scout walks a paginated quote listing, enriches every quote with
/// details from its author page, and writes the result as CSV.
#[derive(Parser, Debug)]
#[command(name = "quote-scout")]
#[command(version = "1.0.0")]
#[command(about = "Scrape quotes and author details into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of list pages to scrape
    #[arg(short = 'n', long = "num-pages", value_name = "N")]
    num_pages: Option<u32>,

    /// Output CSV file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Site root to crawl
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Maximum number of author pages fetched at once
    #[arg(long, value_name = "K")]
    concurrency: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    tracing::info!(
        "Crawling {} page(s) of {} into {}",
        config.crawler.page_count,
        config.crawler.base_url,
        config.output.csv_path
    );

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing with the quotes collected so far");
            ctrl_c_token.cancel();
        }
    });

    let report = crawl(&config, Arc::new(TracingObserver), &cancel).await?;

    let output_path = Path::new(&config.output.csv_path);
    write_csv(output_path, &report.records)?;

    tracing::info!("Scraping complete. Quotes found: {}", report.records.len());

    if !cli.quiet {
        print_report(&report);
        println!("✓ Quotes written to: {}", output_path.display());
    }

    Ok(())
}

/// Loads the config file (if any), applies CLI overrides, and validates
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(num_pages) = cli.num_pages {
        config.crawler.page_count = num_pages;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.to_string_lossy().into_owned();
    }
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_details = concurrency;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_scout=info,warn"),
            1 => EnvFilter::new("quote_scout=debug,info"),
            2 => EnvFilter::new("quote_scout=trace,debug"),
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
