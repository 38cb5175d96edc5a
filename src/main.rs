//! Gazeta-Scraper main entry point
//!
//! This is the command-line interface for the Gazeta-Scraper news collector.

use anyhow::Context;
use clap::Parser;
use gazeta_scraper::config::{load_config_with_hash, Config};
use gazeta_scraper::crawler::{run_scrape, ScrapeOptions};
use gazeta_scraper::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gazeta-Scraper: collects news articles from a single site
///
/// Article URLs are discovered from the configured seed pages, or by walking
/// the site's listing pages with `--recursive`. Each article is written to the
/// assets directory as raw text plus JSON metadata.
#[derive(Parser, Debug)]
#[command(name = "gazeta-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A news article scraper", long_about = None)]
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

    /// Discover articles by walking listing pages, resuming any saved crawl state
    #[arg(long)]
    recursive: bool,

    /// Discard saved crawl state before a recursive run
    #[arg(long, requires = "recursive")]
    fresh: bool,

    /// Override the configured bound on expansion steps
    #[arg(
        long,
        value_name = "N",
        requires = "recursive",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_steps: Option<usize>,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config, cli.recursive);
        return Ok(());
    }

    let options = ScrapeOptions {
        recursive: cli.recursive,
        fresh: cli.fresh,
        max_steps: cli.max_steps,
    };

    handle_scrape(config, options, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gazeta_scraper=info,warn"),
            1 => EnvFilter::new("gazeta_scraper=debug,info"),
            2 => EnvFilter::new("gazeta_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated config
fn handle_dry_run(config: &Config, recursive: bool) {
    println!("=== Gazeta-Scraper Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Target articles: {}", config.site.total_articles);
    println!("  Encoding: {}", config.site.encoding);
    println!("  Timeout: {}s", config.site.timeout);
    println!(
        "  Verify certificates: {}",
        config.site.should_verify_certificate
    );
    println!("  Headers: {}", config.site.headers.len());

    println!("\nSeed URLs ({}):", config.site.seed_urls.len());
    for seed in &config.site.seed_urls {
        println!("  - {}", seed);
    }

    println!("\nCrawler:");
    println!(
        "  Mode: {}",
        if recursive { "recursive" } else { "seed pages" }
    );
    println!("  Max expansion steps: {}", config.crawler.max_expansion_steps);
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!(
        "  Article path prefixes: {}",
        config.crawler.article_path_prefixes.join(", ")
    );
    println!("  State file: {}", config.crawler.state_path);

    println!("\nOutput:");
    println!("  Assets: {}", config.output.assets_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, options: ScrapeOptions, quiet: bool) -> anyhow::Result<()> {
    if options.recursive {
        if options.fresh {
            tracing::info!("Starting fresh recursive scrape (ignoring saved crawl state)");
        } else {
            tracing::info!("Starting recursive scrape (will resume from saved crawl state)");
        }
    } else {
        tracing::info!(
            "Starting scrape from {} seed pages",
            config.site.seed_urls.len()
        );
    }

    let report = run_scrape(config, options).await.map_err(|e| {
        tracing::error!("Scrape failed: {}", e);
        e
    })?;

    if !quiet {
        print_report(&report);
    }

    Ok(())
}
