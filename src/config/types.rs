use serde::Deserialize;

/// Main configuration structure for docfetch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Crawl target and termination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the paginated library (must end with `/`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page number to start walking from
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Maximum number of pages to walk; unset means walk until the
    /// next-page marker disappears
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Cap on the number of document records to collect
    #[serde(default)]
    pub limit: Option<usize>,

    /// CSS selector for the next-page marker anchor
    #[serde(rename = "next-page-selector", default = "default_next_page_selector")]
    pub next_page_selector: String,

    /// Courtesy pause between page fetches (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

/// Output directory layout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory for all run artifacts
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Subdirectory (under the root) for downloaded documents
    #[serde(rename = "download-dir", default = "default_download_dir")]
    pub download_dir: String,
}

/// Download rate-limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Lower bound of the randomized delay before each download (milliseconds)
    #[serde(rename = "min-delay-ms", default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the randomized delay before each download (milliseconds)
    #[serde(rename = "max-delay-ms", default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_start_page() -> u32 {
    1
}

fn default_next_page_selector() -> String {
    "a.nextpostslink".to_string()
}

fn default_page_delay_ms() -> u64 {
    1000
}

fn default_download_dir() -> String {
    "downloaded_documents".to_string()
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    2000
}
