//! Report Output
//!
//! Orders resolved compartment paths and writes them as CSV, plus the
//! human-readable run summary printed after a successful export.

pub mod summary;
pub mod writer;

pub use summary::{format_export_summary, ExportSummary};
pub use writer::{sort_records, write_csv, CSV_HEADER, DEFAULT_OUTPUT_FILE};
