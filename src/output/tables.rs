//! CSV writers for the metadata table and download logs

use crate::extract::DocumentRecord;
use crate::retrieve::{DownloadFailure, DownloadSuccess};
use std::path::Path;

/// Writes the formatted metadata table: `Name,first,second,third`
///
/// Missing context fields become empty strings; record order is preserved.
pub fn write_metadata_table(records: &[DocumentRecord], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Name", "first", "second", "third"])?;

    for record in records {
        writer.write_record([
            record.document_name.as_str(),
            record.first.as_deref().unwrap_or(""),
            record.second.as_deref().unwrap_or(""),
            record.third.as_deref().unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the success log: `url,filepath`
pub fn write_success_log(successes: &[DownloadSuccess], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["url", "filepath"])?;

    for success in successes {
        let filepath = success.file_path.display().to_string();
        writer.write_record([success.url.as_str(), filepath.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the failure log: `url,error`
pub fn write_failure_log(failures: &[DownloadFailure], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["url", "error"])?;

    for failure in failures {
        writer.write_record([failure.url.as_str(), failure.error.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}
