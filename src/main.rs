//! docfetch main entry point
//!
//! Command-line interface for the docfetch document-library harvester.

use clap::Parser;
use docfetch::config::load_config;
use docfetch::report::TracingReporter;
use docfetch::timing::TokioSleeper;
use docfetch::run_harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docfetch: a paginated document-library harvester
///
/// docfetch walks a paginated website, discovers PDF and Word document
/// links, records their surrounding metadata, and downloads the documents
/// with resume support and per-item accounting.
#[derive(Parser, Debug)]
#[command(name = "docfetch")]
#[command(version = "1.0.0")]
#[command(about = "Harvest document links from a paginated website", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // Run the harvest
    let summary = run_harvest(&config, &TracingReporter, &TokioSleeper).await?;

    println!("Harvest complete.");
    println!("  Documents discovered: {}", summary.records_found);
    println!("  Downloaded:           {}", summary.downloaded);
    println!("  Failed:               {}", summary.failed);
    println!("  Metadata table:       {}", summary.metadata_path.display());
    println!("  Download directory:   {}", summary.download_dir.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docfetch=info,warn"),
            1 => EnvFilter::new("docfetch=debug,info"),
            2 => EnvFilter::new("docfetch=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &docfetch::Config) {
    println!("=== docfetch Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start page: {}", config.site.start_page);
    match config.site.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited (walk until the marker disappears)"),
    }
    match config.site.limit {
        Some(limit) => println!("  Document limit: {}", limit),
        None => println!("  Document limit: none"),
    }
    println!("  Next-page selector: {}", config.site.next_page_selector);
    println!("  Page delay: {}ms", config.site.page_delay_ms);

    println!("\nOutput:");
    println!("  Root directory: {}", config.output.output_dir);
    println!("  Download subdirectory: {}", config.output.download_dir);

    println!("\nRetrieval:");
    println!(
        "  Download delay: {}ms - {}ms",
        config.retrieval.min_delay_ms, config.retrieval.max_delay_ms
    );

    println!("\n✓ Configuration is valid");
}
