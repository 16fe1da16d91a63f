//! CSV serialization of path records

use crate::error::ApiError;
use crate::types::PathRecord;
use std::fs::File;
use std::path::Path;

/// Output file name used when none is configured
pub const DEFAULT_OUTPUT_FILE: &str = "oci_compartment_paths.csv";

pub const CSV_HEADER: [&str; 4] = ["id", "parent_id", "level", "path"];

/// Order records by level, then path, then id.
pub fn sort_records(records: &mut [PathRecord]) {
    records.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Write the header and one row per record to `path`, in the given order.
///
/// Returns the number of data rows written. The file is created (or
/// truncated) before the first row and flushed before returning.
pub fn write_csv(path: &Path, records: &[PathRecord]) -> Result<usize, ApiError> {
    let file = File::create(path).map_err(|e| ApiError::io(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ApiError::csv(path, e))?;
    for record in records {
        let level = record.level.to_string();
        writer
            .write_record([
                record.id.as_str(),
                record.parent_id.as_str(),
                level.as_str(),
                record.path.as_str(),
            ])
            .map_err(|e| ApiError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ApiError::io(path, e))?;

    tracing::info!(path = %path.display(), rows = records.len(), "Wrote compartment CSV");
    Ok(records.len())
}
