//! Flat tabular run artifacts
//!
//! Three CSV files per run: the formatted metadata table and the
//! success/failure download logs. One row per record, no nesting.

mod tables;

pub use tables::{write_failure_log, write_metadata_table, write_success_log};
