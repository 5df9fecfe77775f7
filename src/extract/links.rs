//! Document link scanning and record assembly
//!
//! The structural pass ([`scan_document_links`]) is pure and synchronous:
//! it finds anchors with recognized document suffixes, resolves their hrefs
//! against the page URL, and harvests positional context. The
//! [`DocumentExtractor`] then enriches each candidate with best-effort body
//! text and a mined author field.

use crate::crawl::fetch_bytes;
use crate::extract::context::{ContextStrategy, ParentTextContext};
use crate::extract::text::{extractor_for, mine_author};
use crate::extract::DocumentKind;
use crate::report::Reporter;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// One discovered document link plus its scraped metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Absolute document URL
    pub url: String,

    /// Trimmed anchor text; may be empty
    pub document_name: String,

    /// Positional context: up to three ordered snippets from the link's
    /// enclosing element, never fabricated
    pub first: Option<String>,
    pub second: Option<String>,
    pub third: Option<String>,

    /// Author mined from the body text, if any
    pub author: Option<String>,

    /// Full extracted body text; present only when extraction succeeded
    pub document_text: Option<String>,
}

/// A scanned link before body-text enrichment
pub struct LinkCandidate {
    pub url: Url,
    pub kind: DocumentKind,
    pub document_name: String,
    pub context: [Option<String>; 3],
}

/// Scans markup for document links and their positional context
///
/// Anchors whose href does not carry a recognized document suffix are
/// skipped, as are hrefs that fail to resolve against `base_url`. Candidates
/// come back in markup order, without deduplication.
pub fn scan_document_links(
    html: &str,
    base_url: &Url,
    strategy: &dyn ContextStrategy,
) -> Vec<LinkCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return candidates;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        let Some(kind) = DocumentKind::from_href(href) else {
            continue;
        };

        // join() resolves relative hrefs and passes absolute ones through
        let url = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
                continue;
            }
        };

        let document_name = element.text().collect::<String>().trim().to_string();
        let context = strategy.harvest(element);

        candidates.push(LinkCandidate {
            url,
            kind,
            document_name,
            context,
        });
    }

    candidates
}

/// Extracts document records from one page's markup
///
/// Holds the HTTP client used to fetch document bodies and the pluggable
/// context strategy. Body-text extraction is best-effort: transport or parse
/// failures are reported and yield a record without text.
pub struct DocumentExtractor<'a> {
    client: &'a Client,
    reporter: &'a dyn Reporter,
    strategy: Box<dyn ContextStrategy>,
}

impl<'a> DocumentExtractor<'a> {
    /// Creates an extractor with the default nearest-parent context strategy
    pub fn new(client: &'a Client, reporter: &'a dyn Reporter) -> Self {
        Self::with_strategy(client, reporter, Box::new(ParentTextContext))
    }

    /// Creates an extractor with a custom context strategy
    pub fn with_strategy(
        client: &'a Client,
        reporter: &'a dyn Reporter,
        strategy: Box<dyn ContextStrategy>,
    ) -> Self {
        Self {
            client,
            reporter,
            strategy,
        }
    }

    /// Extracts all document records from the given markup
    ///
    /// # Arguments
    ///
    /// * `html` - The page markup
    /// * `base_url` - The page's own URL, used to resolve relative hrefs
    ///
    /// # Returns
    ///
    /// Records in the order their anchors appear in the markup. Every
    /// record's `url` is non-empty and absolute.
    pub async fn extract_links(&self, html: &str, base_url: &Url) -> Vec<DocumentRecord> {
        let candidates = scan_document_links(html, base_url, self.strategy.as_ref());
        let mut records = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let document_text = self.fetch_document_text(&candidate.url, candidate.kind).await;
            let author = document_text.as_deref().and_then(mine_author);
            let [first, second, third] = candidate.context;

            records.push(DocumentRecord {
                url: candidate.url.to_string(),
                document_name: candidate.document_name,
                first,
                second,
                third,
                author,
                document_text,
            });
        }

        records
    }

    /// Fetches a document and extracts its body text, best-effort
    async fn fetch_document_text(&self, url: &Url, kind: DocumentKind) -> Option<String> {
        let bytes = match fetch_bytes(self.client, url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.reporter.extraction_skipped(url.as_str(), &e.to_string());
                return None;
            }
        };

        match extractor_for(kind).extract(&bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                self.reporter.extraction_skipped(url.as_str(), &e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/library/").unwrap()
    }

    fn scan(html: &str) -> Vec<LinkCandidate> {
        scan_document_links(html, &base_url(), &ParentTextContext)
    }

    #[test]
    fn test_only_document_suffixes_match() {
        let html = r#"
            <html><body>
                <a href="/files/report.pdf">Report</a>
                <a href="/files/brief.docx">Brief</a>
                <a href="/files/chart.png">Chart</a>
            </body></html>
        "#;
        let candidates = scan(html);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].kind, DocumentKind::Pdf);
        assert_eq!(candidates[1].kind, DocumentKind::Docx);
    }

    #[test]
    fn test_relative_href_resolved_against_page() {
        let html = r#"<a href="papers/a.pdf">A</a>"#;
        let candidates = scan(html);
        assert_eq!(
            candidates[0].url.as_str(),
            "https://example.com/library/papers/a.pdf"
        );
    }

    #[test]
    fn test_absolute_href_passed_through() {
        let html = r#"<a href="https://other.org/b.pdf">B</a>"#;
        let candidates = scan(html);
        assert_eq!(candidates[0].url.as_str(), "https://other.org/b.pdf");
    }

    #[test]
    fn test_anchor_text_trimmed() {
        let html = r#"<a href="/a.pdf">  Annual Report  </a>"#;
        let candidates = scan(html);
        assert_eq!(candidates[0].document_name, "Annual Report");
    }

    #[test]
    fn test_markup_order_preserved_without_dedup() {
        let html = r#"
            <a href="/one.pdf">One</a>
            <a href="/two.pdf">Two</a>
            <a href="/one.pdf">One again</a>
        "#;
        let candidates = scan(html);
        let names: Vec<&str> = candidates
            .iter()
            .map(|c| c.document_name.as_str())
            .collect();
        assert_eq!(names, vec!["One", "Two", "One again"]);
    }

    #[test]
    fn test_context_attached_to_candidate() {
        let html = r#"<li>2024 <a href="/a.pdf">Report</a> Finance</li>"#;
        let candidates = scan(html);
        let [first, second, third] = &candidates[0].context;
        assert_eq!(first.as_deref(), Some("2024"));
        assert_eq!(second.as_deref(), Some("Report"));
        assert_eq!(third.as_deref(), Some("Finance"));
    }

    #[test]
    fn test_empty_page_yields_no_candidates() {
        assert!(scan("<html><body><p>No links here</p></body></html>").is_empty());
    }
}
