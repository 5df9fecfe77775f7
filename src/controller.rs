//! Run controller
//!
//! Orchestrates one end-to-end harvest: directory setup, the paginated walk,
//! the metadata table, and the batch download. The controller owns the full
//! record list; the retrieval engine only ever sees the URL subset.

use crate::config::Config;
use crate::crawl::{build_http_client, PaginationWalker};
use crate::output::write_metadata_table;
use crate::report::Reporter;
use crate::retrieve::RetrievalEngine;
use crate::timing::{DelayRange, Sleeper};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Summary of one completed harvest run
#[derive(Debug)]
pub struct HarvestSummary {
    /// Document records discovered by the walk
    pub records_found: usize,

    /// Documents on disk after the batch (including resumed skips)
    pub downloaded: usize,

    /// Documents recorded in the failure log
    pub failed: usize,

    /// Where the formatted metadata table was written
    pub metadata_path: PathBuf,

    /// Where downloads and the success/failure logs live
    pub download_dir: PathBuf,
}

/// Runs the full discovery-extraction-retrieval pipeline
///
/// # Arguments
///
/// * `config` - Validated run configuration
/// * `reporter` - Progress observer shared by all components
/// * `sleeper` - Courtesy-delay capability shared by all components
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - The run completed (individual downloads may
///   still have failed; see the summary counts and the failure log)
/// * `Err(HarvestError)` - Setup or artifact writing failed
pub async fn run_harvest(
    config: &Config,
    reporter: &dyn Reporter,
    sleeper: &dyn Sleeper,
) -> crate::Result<HarvestSummary> {
    let base_url = Url::parse(&config.site.base_url)?;

    // Directory setup is idempotent: create-if-missing, never truncate
    let output_root = PathBuf::from(&config.output.output_dir);
    let table_dir = output_root.join("output");
    let download_dir = output_root.join(&config.output.download_dir);
    std::fs::create_dir_all(&table_dir)?;
    std::fs::create_dir_all(&download_dir)?;

    let client = build_http_client()?;

    let walker = PaginationWalker::new(
        &client,
        reporter,
        sleeper,
        &config.site.next_page_selector,
        Duration::from_millis(config.site.page_delay_ms),
    );

    let records = walker
        .walk(
            &base_url,
            config.site.start_page,
            config.site.max_pages,
            config.site.limit,
        )
        .await;

    let metadata_path = table_dir.join("formatted_document_data.csv");
    write_metadata_table(&records, &metadata_path)?;
    tracing::info!(
        "Formatted document data saved to {}",
        metadata_path.display()
    );

    // Records with an empty url never reach the retrieval engine
    let urls: Vec<String> = records
        .iter()
        .map(|r| r.url.clone())
        .filter(|u| !u.is_empty())
        .collect();

    let delay = DelayRange::from_millis(
        config.retrieval.min_delay_ms,
        config.retrieval.max_delay_ms,
    );
    let engine = RetrievalEngine::new(&client, sleeper, reporter, delay);
    let outcome = engine.download_batch(&urls, &download_dir).await?;

    Ok(HarvestSummary {
        records_found: records.len(),
        downloaded: outcome.successes.len(),
        failed: outcome.failures.len(),
        metadata_path,
        download_dir,
    })
}
