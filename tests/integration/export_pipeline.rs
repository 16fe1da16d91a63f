use compartment_paths::config::ExportConfig;
use compartment_paths::error::ApiError;
use compartment_paths::export::{ExportRequest, ExportService};
use compartment_paths::identity::collect_compartments;
use compartment_paths::tooling::CliContext;
use compartment_paths::types::CompartmentRecord;
use tempfile::TempDir;

use crate::integration::support::{five_compartments, StaticSource, TENANCY};

fn run_export(source: &StaticSource, request: &ExportRequest) -> Result<String, ApiError> {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(ExportService::run(source, request))
        .map(|summary| summary.output.display().to_string())
}

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["id", "parent_id", "level", "path"]
    );
    reader
        .records()
        .map(|row| row.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn five_compartment_export_has_expected_rows() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("oci_compartment_paths.csv");
    let source = StaticSource::new(vec![five_compartments()]);

    run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: None,
        },
    )
    .unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let expected = format!(
        "id,parent_id,level,path\n\
         {t},,0,ROOT\n\
         ocid1.compartment.oc1..a,{t},1,ROOT/A\n\
         ocid1.compartment.oc1..b,{t},1,ROOT/B\n\
         ocid1.compartment.oc1..x,ocid1.compartment.oc1..a,2,ROOT/A/X\n\
         ocid1.compartment.oc1..y,ocid1.compartment.oc1..b,2,ROOT/B/Y\n",
        t = TENANCY
    );
    assert_eq!(content, expected);
}

#[test]
fn pages_are_followed_until_token_runs_out() {
    let records = five_compartments();
    let source = StaticSource::new(vec![
        vec![records[0].clone()],
        vec![records[1].clone(), records[2].clone()],
        vec![records[3].clone()],
    ]);

    let rt = tokio::runtime::Runtime::new().unwrap();
    let listing = rt.block_on(collect_compartments(&source)).unwrap();

    assert_eq!(listing.pages, 3);
    assert_eq!(listing.tree.len(), 5);
    assert_eq!(
        source.requested(),
        vec![None, Some("page-1".to_string()), Some("page-2".to_string())]
    );
}

#[test]
fn empty_listing_exports_only_root() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.csv");
    let source = StaticSource::new(vec![Vec::new()]);

    run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: None,
        },
    )
    .unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows, vec![vec![TENANCY.to_string(), String::new(), "0".to_string(), "ROOT".to_string()]]);
}

#[test]
fn subtree_export_excludes_prefix_lookalikes() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("dev.csv");
    let source = StaticSource::new(vec![vec![
        CompartmentRecord::new("dev", "Dev", TENANCY),
        CompartmentRecord::new("devops", "DevOps", TENANCY),
        CompartmentRecord::new("dev-app", "App", "dev"),
        CompartmentRecord::new("devops-ci", "CI", "devops"),
    ]]);

    run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: Some("dev".to_string()),
        },
    )
    .unwrap();

    let rows = read_rows(&output);
    let summary: Vec<(&str, &str, &str)> = rows
        .iter()
        .map(|r| (r[0].as_str(), r[2].as_str(), r[3].as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("dev", "1", "ROOT/Dev"), ("dev-app", "2", "ROOT/Dev/App")]
    );
}

#[test]
fn rows_are_ordered_by_level_then_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.csv");
    let source = StaticSource::new(vec![vec![
        CompartmentRecord::new("z", "Zeta", TENANCY),
        CompartmentRecord::new("z1", "alpha", "z"),
        CompartmentRecord::new("a", "Alpha", TENANCY),
        CompartmentRecord::new("a1", "omega", "a"),
        CompartmentRecord::new("a11", "deep", "a1"),
    ]]);

    run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: None,
        },
    )
    .unwrap();

    let rows = read_rows(&output);
    for pair in rows.windows(2) {
        let (l0, l1): (u32, u32) = (pair[0][2].parse().unwrap(), pair[1][2].parse().unwrap());
        assert!(l0 <= l1);
        if l0 == l1 {
            assert!(pair[0][3] <= pair[1][3]);
        }
    }
    assert_eq!(rows.last().unwrap()[3], "ROOT/Alpha/omega/deep");
}

#[test]
fn listing_failure_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.csv");
    let source = StaticSource::new(vec![five_compartments(), five_compartments()]).failing_at(1);

    let err = run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::HttpStatus { status: 500, .. }));
    assert!(!output.exists());
}

#[test]
fn unknown_subtree_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.csv");
    let source = StaticSource::new(vec![five_compartments()]);

    let err = run_export(
        &source,
        &ExportRequest {
            output: output.clone(),
            root: Some("ocid1.compartment.oc1..missing".to_string()),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::UnknownCompartment(_)));
    assert!(!output.exists());
}

#[test]
fn cli_context_reports_success_summary() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("summary.csv");
    let mut config = ExportConfig::default();
    config.output = output.clone();
    config.root = Some("ocid1.compartment.oc1..a".to_string());

    let context = CliContext::from_config(config);
    let source = StaticSource::new(vec![five_compartments()]);
    let text = context.execute_with(&source).unwrap();

    assert!(text.starts_with(&format!(
        "CSV file generated successfully: {}",
        output.display()
    )));
    assert!(text.contains("Subtree root"));
    assert_eq!(read_rows(&output).len(), 2);
}
