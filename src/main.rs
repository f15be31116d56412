//! Sitegraph main entry point
//!
//! Command-line interface for the Sitegraph single-site link graph mapper.

use anyhow::Context;
use clap::Parser;
use sitegraph::config::{load_config, validate, Config};
use sitegraph::crawler::{crawl, RunOutcome};
use sitegraph::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitegraph: map the link graph of a single website
///
/// Crawls the given domain starting from its root page, visiting every
/// reachable same-site URL exactly once, and prints the discovered link
/// graph.
#[derive(Parser, Debug)]
#[command(name = "sitegraph")]
#[command(version)]
#[command(about = "Map the link graph of a single website", long_about = None)]
struct Cli {
    /// Domain to crawl (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the maximum number of concurrent fetches
    #[arg(long, value_name = "N")]
    max_concurrent: Option<u32>,

    /// Override the per-fetch timeout in milliseconds
    #[arg(long, value_name = "MS")]
    fetch_timeout_ms: Option<u64>,

    /// Override the overall run timeout in milliseconds (0 = unbounded)
    #[arg(long, value_name = "MS")]
    run_timeout_ms: Option<u64>,

    /// Override the retry count for transient fetch failures
    #[arg(long, value_name = "N")]
    retries: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("loading configuration from {}", path.display());
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration after CLI overrides")?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.domain)?;
        return Ok(());
    }

    let report = crawl(&config, &cli.domain).await?;
    print_report(&report);

    if report.outcome != RunOutcome::Completed {
        tracing::warn!("crawl did not run to completion: {:?}", report.outcome);
    }

    Ok(())
}

/// Applies CLI flag overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(n) = cli.max_concurrent {
        config.crawler.max_concurrent_fetches = n;
    }
    if let Some(ms) = cli.fetch_timeout_ms {
        config.crawler.fetch_timeout_ms = ms;
    }
    if let Some(ms) = cli.run_timeout_ms {
        config.crawler.run_timeout_ms = ms;
    }
    if let Some(n) = cli.retries {
        config.crawler.retry_count = n;
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegraph=info,warn"),
            1 => EnvFilter::new("sitegraph=debug,info"),
            2 => EnvFilter::new("sitegraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --dry-run: validates input and shows what would be crawled
fn handle_dry_run(config: &Config, domain: &str) -> anyhow::Result<()> {
    let base_domain = sitegraph::url::sanitize_domain(domain)?;

    println!("=== Sitegraph Dry Run ===\n");

    println!("Target:");
    println!("  Domain: {}", base_domain);
    println!("  Root URL: {}", sitegraph::url::root_url(&base_domain));

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Fetch timeout: {}ms", config.crawler.fetch_timeout_ms);
    match config.crawler.run_timeout_ms {
        0 => println!("  Run timeout: unbounded"),
        ms => println!("  Run timeout: {}ms", ms),
    }
    println!("  Retry count: {}", config.crawler.retry_count);

    println!("\nConfiguration is valid");

    Ok(())
}
