//! Batch download engine
//!
//! One attempt per URL per batch, no retries. Bodies are streamed to disk;
//! a failed write removes the partial file so the existing-file resume check
//! only ever sees completed downloads.

use crate::crawl::{fetch_stream, FetchError};
use crate::output::{write_failure_log, write_success_log};
use crate::report::Reporter;
use crate::retrieve::filename::filename_from_url;
use crate::timing::{DelayRange, Sleeper};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Why a single download attempt failed
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not derive a filename from the URL")]
    NoFilename,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// A completed download
#[derive(Debug, Clone)]
pub struct DownloadSuccess {
    pub url: String,
    pub file_path: PathBuf,
}

/// A failed download, with the reason recorded for the failure log
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    pub url: String,
    pub error: String,
}

/// Per-batch accounting: every URL lands in exactly one of the two lists
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub successes: Vec<DownloadSuccess>,
    pub failures: Vec<DownloadFailure>,
}

/// Sequential, rate-limited document downloader
pub struct RetrievalEngine<'a> {
    client: &'a Client,
    sleeper: &'a dyn Sleeper,
    reporter: &'a dyn Reporter,
    delay: DelayRange,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(
        client: &'a Client,
        sleeper: &'a dyn Sleeper,
        reporter: &'a dyn Reporter,
        delay: DelayRange,
    ) -> Self {
        Self {
            client,
            sleeper,
            reporter,
            delay,
        }
    }

    /// Downloads one document into `output_dir`
    ///
    /// If the target file already exists the download is skipped entirely
    /// (no sleep, no network call) and the existing path is returned as a
    /// success. Otherwise the engine pauses a random duration within its
    /// delay range and streams the body to disk.
    pub async fn download_one(
        &self,
        url: &str,
        output_dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let parsed = Url::parse(url)?;
        let filename = filename_from_url(&parsed).ok_or(DownloadError::NoFilename)?;
        let file_path = output_dir.join(&filename);

        if tokio::fs::try_exists(&file_path).await? {
            tracing::warn!(
                "File already exists: {}, skipping download",
                file_path.display()
            );
            return Ok(file_path);
        }

        self.sleeper.sleep(self.delay.sample()).await;

        let response = fetch_stream(self.client, &parsed).await?;
        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(&file_path).await?;

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    discard_partial(&file_path).await;
                    return Err(DownloadError::Fetch(FetchError::Transport(e)));
                }
            };
            if let Err(e) = file.write_all(&chunk).await {
                discard_partial(&file_path).await;
                return Err(e.into());
            }
        }
        file.flush().await?;

        Ok(file_path)
    }

    /// Downloads a batch of URLs in order, accumulating per-item outcomes
    ///
    /// A single item's failure never aborts the batch. After all items, the
    /// success and failure lists are persisted as `success_log.csv` and
    /// `failure_log.csv` under `output_dir`.
    pub async fn download_batch(
        &self,
        urls: &[String],
        output_dir: &Path,
    ) -> crate::Result<BatchOutcome> {
        let total = urls.len();
        tracing::info!("Starting batch download of {} documents", total);

        let mut outcome = BatchOutcome::default();

        for (i, url) in urls.iter().enumerate() {
            self.reporter.download_progress(i + 1, total, url);

            match self.download_one(url, output_dir).await {
                Ok(file_path) => {
                    self.reporter.download_succeeded(url, &file_path);
                    outcome.successes.push(DownloadSuccess {
                        url: url.clone(),
                        file_path,
                    });
                }
                Err(e) => {
                    let reason = e.to_string();
                    self.reporter.download_failed(url, &reason);
                    outcome.failures.push(DownloadFailure {
                        url: url.clone(),
                        error: reason,
                    });
                }
            }
        }

        tracing::info!(
            "Batch download complete: {} succeeded, {} failed",
            outcome.successes.len(),
            outcome.failures.len()
        );

        write_success_log(&outcome.successes, &output_dir.join("success_log.csv"))?;
        write_failure_log(&outcome.failures, &output_dir.join("failure_log.csv"))?;

        Ok(outcome)
    }
}

/// Removes a partially written file after a failed download
async fn discard_partial(path: &Path) {
    let _ = tokio::fs::remove_file(path).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::build_http_client;
    use crate::timing::NoSleep;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Sleeper that counts how many times it was asked to pause
    struct CountingSleeper(AtomicUsize);

    #[async_trait::async_trait]
    impl Sleeper for CountingSleeper {
        async fn sleep(&self, _duration: Duration) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Reporter that swallows everything
    struct QuietReporter;
    impl Reporter for QuietReporter {}

    fn test_delay() -> DelayRange {
        DelayRange::from_millis(0, 0)
    }

    #[tokio::test]
    async fn test_download_one_writes_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF fake body".to_vec()))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();
        let engine = RetrievalEngine::new(&client, &NoSleep, &QuietReporter, test_delay());

        let url = format!("{}/report.pdf", mock_server.uri());
        let file_path = engine.download_one(&url, dir.path()).await.unwrap();

        assert_eq!(file_path, dir.path().join("report.pdf"));
        assert_eq!(std::fs::read(&file_path).unwrap(), b"%PDF fake body");
    }

    #[tokio::test]
    async fn test_existing_file_short_circuits() {
        // The mock server expects zero requests; the sleeper must also
        // never fire.
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.pdf"), b"already here").unwrap();

        let client = build_http_client().unwrap();
        let sleeper = CountingSleeper(AtomicUsize::new(0));
        let engine = RetrievalEngine::new(&client, &sleeper, &QuietReporter, test_delay());

        let url = format!("{}/report.pdf", mock_server.uri());
        let file_path = engine.download_one(&url, dir.path()).await.unwrap();

        assert_eq!(file_path, dir.path().join("report.pdf"));
        assert_eq!(std::fs::read(&file_path).unwrap(), b"already here");
        assert_eq!(sleeper.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_batch_invocation_refetches_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"body".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();
        let engine = RetrievalEngine::new(&client, &NoSleep, &QuietReporter, test_delay());

        let urls = vec![format!("{}/doc.pdf", mock_server.uri())];

        let first = engine.download_batch(&urls, dir.path()).await.unwrap();
        assert_eq!(first.successes.len(), 1);

        let second = engine.download_batch(&urls, dir.path()).await.unwrap();
        assert_eq!(second.successes.len(), 1);
        assert!(second.failures.is_empty());
    }

    #[tokio::test]
    async fn test_url_without_filename_fails() {
        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();
        let engine = RetrievalEngine::new(&client, &NoSleep, &QuietReporter, test_delay());

        let result = engine
            .download_one("https://example.com/files/", dir.path())
            .await;
        assert!(matches!(result, Err(DownloadError::NoFilename)));
    }

    #[tokio::test]
    async fn test_batch_partitions_exhaustively() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/good.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();
        let engine = RetrievalEngine::new(&client, &NoSleep, &QuietReporter, test_delay());

        let urls = vec![
            format!("{}/good.pdf", mock_server.uri()),
            format!("{}/gone.pdf", mock_server.uri()),
            "https://example.invalid/".to_string(),
        ];

        let outcome = engine.download_batch(&urls, dir.path()).await.unwrap();

        assert_eq!(outcome.successes.len() + outcome.failures.len(), urls.len());
        assert_eq!(outcome.successes.len(), 1);
        assert_eq!(outcome.failures.len(), 2);

        // No URL may appear in both logs
        for success in &outcome.successes {
            assert!(outcome.failures.iter().all(|f| f.url != success.url));
        }

        // Both logs persisted next to the downloads
        assert!(dir.path().join("success_log.csv").exists());
        assert!(dir.path().join("failure_log.csv").exists());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_no_partial_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken.pdf"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = build_http_client().unwrap();
        let engine = RetrievalEngine::new(&client, &NoSleep, &QuietReporter, test_delay());

        let url = format!("{}/broken.pdf", mock_server.uri());
        let result = engine.download_one(&url, dir.path()).await;

        assert!(matches!(result, Err(DownloadError::Fetch(_))));
        assert!(!dir.path().join("broken.pdf").exists());
    }
}
