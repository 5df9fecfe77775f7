//! Progress reporting
//!
//! Components never report progress through ambient state; they call into an
//! injected [`Reporter`] so batch accounting is observable in tests. The
//! default implementation forwards everything to `tracing`.

use std::path::Path;

/// Observer for crawl and download progress events
pub trait Reporter: Send + Sync {
    /// A page was fetched and scanned, yielding `found` document links
    fn page_fetched(&self, url: &str, found: usize) {
        let _ = (url, found);
    }

    /// Body-text extraction for a document was skipped after a failure
    fn extraction_skipped(&self, url: &str, reason: &str) {
        let _ = (url, reason);
    }

    /// A download attempt is starting (`index` is 1-based)
    fn download_progress(&self, index: usize, total: usize, url: &str) {
        let _ = (index, total, url);
    }

    /// A download finished with a file on disk
    fn download_succeeded(&self, url: &str, path: &Path) {
        let _ = (url, path);
    }

    /// A download failed and was recorded in the failure log
    fn download_failed(&self, url: &str, reason: &str) {
        let _ = (url, reason);
    }
}

/// Default reporter that logs progress via `tracing`
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn page_fetched(&self, url: &str, found: usize) {
        tracing::info!("Fetched page {} ({} document links)", url, found);
    }

    fn extraction_skipped(&self, url: &str, reason: &str) {
        tracing::warn!("Skipping text extraction for {}: {}", url, reason);
    }

    fn download_progress(&self, index: usize, total: usize, url: &str) {
        tracing::info!("Downloading document {}/{}: {}", index, total, url);
    }

    fn download_succeeded(&self, url: &str, path: &Path) {
        tracing::info!("Downloaded {} to {}", url, path.display());
    }

    fn download_failed(&self, url: &str, reason: &str) {
        tracing::error!("Failed to download {}: {}", url, reason);
    }
}
