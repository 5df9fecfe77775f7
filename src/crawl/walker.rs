//! Pagination walker
//!
//! Sequential walk over a library's numbered pages. Page 1 is the base URL
//! itself; later pages live under the `page/N/` path segment, which is the
//! single pagination convention this crate supports. The walk stops on a
//! missing next-page marker, the page cap, the document limit, or a page
//! fetch failure, always returning whatever was accumulated so far.

use crate::crawl::fetcher::fetch_page;
use crate::extract::{DocumentExtractor, DocumentRecord};
use crate::report::Reporter;
use crate::timing::Sleeper;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Walks the paginated library, collecting document records page by page
pub struct PaginationWalker<'a> {
    client: &'a Client,
    extractor: DocumentExtractor<'a>,
    reporter: &'a dyn Reporter,
    sleeper: &'a dyn Sleeper,
    next_page_selector: String,
    page_delay: Duration,
}

impl<'a> PaginationWalker<'a> {
    /// Creates a new walker
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `reporter` - Progress observer
    /// * `sleeper` - Courtesy-delay capability
    /// * `next_page_selector` - CSS selector marking the next-page anchor
    /// * `page_delay` - Pause between consecutive page fetches
    pub fn new(
        client: &'a Client,
        reporter: &'a dyn Reporter,
        sleeper: &'a dyn Sleeper,
        next_page_selector: &str,
        page_delay: Duration,
    ) -> Self {
        Self {
            client,
            extractor: DocumentExtractor::new(client, reporter),
            reporter,
            sleeper,
            next_page_selector: next_page_selector.to_string(),
            page_delay,
        }
    }

    /// Walks pages from `start_page` until a termination condition fires
    ///
    /// Termination conditions, checked in order after each page:
    /// 1. `limit` reached (the accumulator is truncated to exactly `limit`)
    /// 2. no next-page marker in the page body
    /// 3. `max_pages` cap reached
    ///
    /// A page fetch failure also terminates the walk; records accumulated
    /// before the failure are returned, not discarded. Pages are fetched
    /// strictly one at a time.
    pub async fn walk(
        &self,
        base_url: &Url,
        start_page: u32,
        max_pages: Option<u32>,
        limit: Option<usize>,
    ) -> Vec<DocumentRecord> {
        let mut records: Vec<DocumentRecord> = Vec::new();
        let mut page_num = start_page;

        loop {
            let page_url = match page_url(base_url, page_num) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!("Could not build URL for page {}: {}", page_num, e);
                    break;
                }
            };

            tracing::info!("Fetching page: {}", page_url);
            let body = match fetch_page(self.client, &page_url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::error!("Error fetching page {}: {}", page_url, e);
                    break;
                }
            };

            let page_records = self.extractor.extract_links(&body, &page_url).await;
            self.reporter.page_fetched(page_url.as_str(), page_records.len());
            records.extend(page_records);

            if let Some(limit) = limit {
                if records.len() >= limit {
                    tracing::info!("Reached document limit ({}), stopping", limit);
                    records.truncate(limit);
                    break;
                }
            }

            if !has_next_page(&body, &self.next_page_selector) {
                tracing::info!("No next-page marker found, stopping");
                break;
            }

            if let Some(max_pages) = max_pages {
                if page_num >= max_pages {
                    tracing::info!("Reached max-pages cap ({}), stopping", max_pages);
                    break;
                }
            }

            page_num += 1;
            self.sleeper.sleep(self.page_delay).await;
        }

        records
    }
}

/// Builds the URL for a given page number
///
/// Page 1 uses the base URL verbatim; page N>1 appends `page/N/`.
fn page_url(base_url: &Url, page: u32) -> Result<Url, url::ParseError> {
    if page <= 1 {
        Ok(base_url.clone())
    } else {
        Url::parse(&format!("{}page/{}/", base_url, page))
    }
}

/// Probes the page body for the next-page marker
fn has_next_page(html: &str, selector: &str) -> bool {
    let document = Html::parse_document(html);
    Selector::parse(selector)
        .map(|sel| document.select(&sel).next().is_some())
        .unwrap_or(false)
}
