//! Run summary shown after a successful export.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Counts and locations from one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub tenancy_id: String,
    pub pages: usize,
    /// Compartments known after listing, tenancy root included
    pub compartments: usize,
    pub rows: usize,
    pub max_level: u32,
    pub subtree_root: Option<String>,
}

/// Success line followed by a small table of run counts.
pub fn format_export_summary(summary: &ExportSummary) -> String {
    let mut out = format!(
        "CSV file generated successfully: {}\n\n",
        summary.output.display()
    );
    out.push_str(&format!("{}\n", "Export summary".bold().underline()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Tenancy".to_string(), summary.tenancy_id.clone()]);
    if let Some(root) = &summary.subtree_root {
        table.add_row(vec!["Subtree root".to_string(), root.clone()]);
    }
    table.add_row(vec!["Pages fetched".to_string(), summary.pages.to_string()]);
    table.add_row(vec![
        "Compartments".to_string(),
        summary.compartments.to_string(),
    ]);
    table.add_row(vec!["Rows written".to_string(), summary.rows.to_string()]);
    table.add_row(vec!["Deepest level".to_string(), summary.max_level.to_string()]);
    out.push_str(&format!("{}", table));
    out
}
