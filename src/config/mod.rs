//! Configuration loading, parsing, and validation
//!
//! The harvester is driven by a TOML file with three sections: `[site]` for
//! the crawl target and termination caps, `[output]` for the directory
//! layout, and `[retrieval]` for the download delay range.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, OutputConfig, RetrievalConfig, SiteConfig};
pub use validation::validate;
