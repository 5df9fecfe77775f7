//! docfetch: a paginated document-library harvester
//!
//! This crate walks a paginated website, discovers document links (PDF and
//! Word files), scrapes nearby structural text as metadata, extracts document
//! body text, and batch-downloads the documents with resume support and
//! per-item success/failure accounting.

pub mod config;
pub mod controller;
pub mod crawl;
pub mod extract;
pub mod output;
pub mod report;
pub mod retrieve;
pub mod timing;

use thiserror::Error;

/// Main error type for docfetch operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for docfetch operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use controller::{run_harvest, HarvestSummary};
pub use extract::{DocumentKind, DocumentRecord};
pub use report::{Reporter, TracingReporter};
pub use retrieve::{BatchOutcome, DownloadError, RetrievalEngine};
pub use timing::{DelayRange, NoSleep, Sleeper, TokioSleeper};
