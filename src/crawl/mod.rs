//! Page fetching and pagination traversal
//!
//! This module owns the HTTP client and the sequential walk over the
//! library's numbered pages. Fetches happen strictly one at a time; the walk
//! pauses a courtesy interval between pages.

mod fetcher;
mod walker;

pub use fetcher::{build_http_client, fetch_bytes, fetch_page, fetch_stream, FetchError};
pub use walker::PaginationWalker;
