//! Compartment Export
//!
//! The one-shot pipeline: list every compartment, resolve paths, optionally
//! restrict to a subtree, sort, and write the CSV.

use crate::error::ApiError;
use crate::identity::{collect_compartments, CompartmentSource};
use crate::report::{sort_records, write_csv, ExportSummary};
use crate::tree::{CompartmentTree, PathResolver, SubtreeFilter};
use crate::types::PathRecord;
use std::path::PathBuf;

/// Inputs for one export run
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub output: PathBuf,
    /// Subtree root; `None` exports the whole tenancy
    pub root: Option<String>,
}

pub struct ExportService;

impl ExportService {
    /// Resolve, filter and order every compartment in `tree`.
    pub fn build_records(
        tree: &CompartmentTree,
        root: Option<&str>,
    ) -> Result<Vec<PathRecord>, ApiError> {
        let records = PathResolver::new(tree).resolve_all()?;
        let mut records = match root.filter(|r| !r.is_empty()) {
            Some(root) => SubtreeFilter::new(tree, root)?.retain(records)?,
            None => records,
        };
        sort_records(&mut records);
        Ok(records)
    }

    /// Run the full export against `source`.
    ///
    /// Nothing is written until every page has been fetched and every path
    /// resolved, so listing failures leave no output file behind.
    pub async fn run(
        source: &dyn CompartmentSource,
        request: &ExportRequest,
    ) -> Result<ExportSummary, ApiError> {
        let listing = collect_compartments(source).await?;
        let records = Self::build_records(&listing.tree, request.root.as_deref())?;
        let rows = write_csv(&request.output, &records)?;

        Ok(ExportSummary {
            output: request.output.clone(),
            tenancy_id: source.tenancy_id().to_string(),
            pages: listing.pages,
            compartments: listing.tree.len(),
            rows,
            max_level: records.iter().map(|r| r.level).max().unwrap_or(0),
            subtree_root: request.root.clone().filter(|r| !r.is_empty()),
        })
    }
}
