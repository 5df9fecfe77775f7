//! Resumable, rate-limited batch document retrieval
//!
//! Downloads run strictly one at a time with a randomized courtesy delay
//! before each network fetch. A target file that already exists counts as a
//! success without refetching, which is what makes interrupted runs cheap to
//! resume.

mod engine;
mod filename;

pub use engine::{
    BatchOutcome, DownloadError, DownloadFailure, DownloadSuccess, RetrievalEngine,
};
pub use filename::filename_from_url;
