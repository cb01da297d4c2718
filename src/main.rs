//! Sitegist main entry point
//!
//! This is the command-line interface for the Sitegist site digester.

use clap::Parser;
use std::path::{Path, PathBuf};
use sitegist::config::{
    apply_overrides, load_config_with_hash, load_env_file, Config, ConfigOverrides, CrawlConfig,
};
use sitegist::crawler::{CancelHandle, HttpFetcher};
use sitegist::pipeline::run_pipeline;
use sitegist::report::{GeminiSummarizer, ReportOutcome};
use tracing_subscriber::EnvFilter;

/// Sitegist: crawl one site and summarize it
///
/// Sitegist walks a website from a seed URL without leaving its domain,
/// collects text, links, images and tables from every page, and asks a
/// language model for a summary, which is written to a text file.
#[derive(Parser, Debug)]
#[command(name = "sitegist")]
#[command(version = "1.0.0")]
#[command(about = "Crawl one site and summarize it", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the page budget from the config
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Override the report path from the config
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Pick up GOOGLE_API_KEY and friends from ./.env when present
    match load_env_file(Path::new(".env")) {
        Ok(true) => tracing::debug!("Loaded environment from .env"),
        Ok(false) => {}
        Err(e) => {
            tracing::error!("Failed to load .env: {}", e);
            return Err(e.into());
        }
    }

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let overrides = ConfigOverrides {
        max_pages: cli.max_pages,
        report_path: cli.output.as_ref().map(|p| p.display().to_string()),
    };
    if let Err(e) = apply_overrides(&mut config, &overrides) {
        tracing::error!("Invalid command-line override: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_run(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegist=info,warn"),
            1 => EnvFilter::new("sitegist=debug,info"),
            2 => EnvFilter::new("sitegist=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let crawl = CrawlConfig::from_config(config)?;

    println!("=== Sitegist Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", crawl.seed_url);
    println!("  Allowed domain: {}", crawl.allowed_domain);
    println!("  Max pages: {}", crawl.max_pages);
    println!("  Request delay: {}ms", crawl.request_delay.as_millis());
    println!("  Fetch timeout: {}s", crawl.fetch_timeout.as_secs());
    println!("  User agent: {}", crawl.user_agent);

    println!("\nSummarizer:");
    println!("  Model: {}", config.summarizer.model);
    println!("  Endpoint: {}", config.summarizer.endpoint);
    match config.summarizer.resolve_api_key() {
        Ok(_) => println!("  Credential: found"),
        Err(e) => println!("  Credential: MISSING ({})", e),
    }

    println!("\nPrompt limits:");
    println!("  Text: {} chars", config.prompt.text_chars);
    println!(
        "  Links: {}, Images: {}",
        config.prompt.max_links, config.prompt.max_images
    );
    println!(
        "  Tables: {} (up to {} chars each)",
        config.prompt.max_tables, config.prompt.table_chars
    );

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} pages on {}",
        crawl.max_pages, crawl.allowed_domain
    );

    Ok(())
}

/// Handles the main crawl-and-report operation
async fn handle_run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let crawl = CrawlConfig::from_config(&config)?;
    let fetcher = HttpFetcher::new(&crawl.user_agent, crawl.fetch_timeout)?;

    // Ctrl-C stops the crawl at the next page boundary; the report still runs
    let cancel = CancelHandle::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page");
            on_signal.cancel();
        }
    });

    let result = run_pipeline(
        &config,
        fetcher,
        |api_key| Ok(GeminiSummarizer::from_config(&config.summarizer, api_key)?),
        Some(cancel),
    )
    .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Visited {} pages ({} fetched, {} failed)",
        outcome.crawl.visited.len(),
        outcome.crawl.pages_fetched,
        outcome.crawl.pages_failed
    );

    match &outcome.report {
        ReportOutcome::Summarized(_) => {
            println!("✓ Summary saved to: {}", outcome.report_path.display())
        }
        ReportOutcome::NoData => println!(
            "No data was scraped successfully; wrote {}",
            outcome.report_path.display()
        ),
        ReportOutcome::SummarizationFailed(message) => println!(
            "✗ {}\n  Error report saved to: {}",
            message,
            outcome.report_path.display()
        ),
    }

    Ok(())
}
